//! Derived display state: what price, image and stock label a product view
//! shows for the current selection.

use serde::Serialize;

use crate::products::{Product, Variant};
use crate::variants::resolve::{resolve, Resolution, Selection};

/// Price to display, either a settled amount or the span across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceDisplay {
    Single { amount: i64 },
    Range { min: i64, max: i64 },
}

/// Stock messaging tier. `LastUnits` covers counts 1 through 3 so the UI can
/// nudge ("últimas N unidades") without exposing exact warehouse numbers for
/// well-stocked products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", content = "count", rename_all = "snake_case")]
pub enum StockLabel {
    SoldOut,
    LastUnits(u32),
    InStock(u32),
}

impl StockLabel {
    #[must_use]
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => StockLabel::SoldOut,
            1..=3 => StockLabel::LastUnits(count),
            _ => StockLabel::InStock(count),
        }
    }
}

/// Everything the renderer needs for one product view, recomputed
/// synchronously whenever the selection changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub price: PriceDisplay,
    pub formatted_price: String,
    /// Image to show: the resolved variant's override when present, else the
    /// first catalog image, else `None` (the view renders its placeholder —
    /// never a broken link).
    pub image_url: Option<String>,
    pub stock: StockLabel,
    /// Gate for the add-to-cart action. True only when a purchasable variant
    /// is resolved (or defaulted, for products with no selectable axes).
    pub can_add_to_cart: bool,
    /// True when the user asked for a combination nothing satisfies —
    /// distinct from "no selection made", which shows product defaults.
    pub sold_out: bool,
}

/// Formats whole guaraníes with dot thousands separators: `Gs. 185.000`.
#[must_use]
pub fn format_guaranies(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("Gs. {sign}{grouped}")
}

/// Computes the display state for a product under the given selection.
///
/// Products without any selectable axis need no user input, so an empty
/// selection defaults to the first purchasable variant there; products with
/// axes show range pricing and aggregate stock until the user chooses.
#[must_use]
pub fn display_state(product: &Product, selection: &Selection) -> DisplayState {
    let resolution = resolve(&product.variants, selection);

    let requires_selection = product.has_color_axis() || product.has_size_axis();
    let shown = match resolution {
        Resolution::NoSelection if !requires_selection => {
            product.variants.iter().find(|v| v.available)
        }
        _ => resolution.variant(),
    };

    let price = shown.map_or_else(|| unselected_price(product), |v| PriceDisplay::Single {
        amount: v.price,
    });

    let image_url = shown
        .and_then(|v| v.image_url.clone())
        .or_else(|| product.default_image().map(|i| i.url.clone()));

    let stock = shown.map_or_else(
        || StockLabel::from_count(product.aggregate_stock),
        |v| StockLabel::from_count(v.stock),
    );

    DisplayState {
        price,
        formatted_price: format_price(price),
        image_url,
        stock,
        can_add_to_cart: shown.is_some_and(|v| v.available),
        sold_out: resolution.is_sold_out(),
    }
}

/// Price shown when no variant is settled: the min–max span when variants
/// disagree, the uniform price when they agree, the product's base price
/// when there are no variants at all.
fn unselected_price(product: &Product) -> PriceDisplay {
    match product.price_span() {
        Some((min, max)) if min != max => PriceDisplay::Range { min, max },
        Some((price, _)) => PriceDisplay::Single { amount: price },
        None => PriceDisplay::Single {
            amount: product.base_price,
        },
    }
}

fn format_price(price: PriceDisplay) -> String {
    match price {
        PriceDisplay::Single { amount } => format_guaranies(amount),
        PriceDisplay::Range { min, max } => {
            format!("{} – {}", format_guaranies(min), format_guaranies(max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::ProductImage;

    fn variant(id: &str, color: Option<&str>, size: Option<&str>, price: i64) -> Variant {
        Variant {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            color: color.map(ToOwned::to_owned),
            size: size.map(ToOwned::to_owned),
            price,
            stock: 5,
            image_url: None,
            available: true,
        }
    }

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: "1001".to_string(),
            name: "Funda para notebook".to_string(),
            description: None,
            category: Some("fundas".to_string()),
            base_price: 150_000,
            aggregate_stock: 10,
            images: vec![ProductImage {
                url: "https://cdn.example.com/funda.jpg".to_string(),
                alt: None,
            }],
            variants,
        }
    }

    #[test]
    fn format_guaranies_groups_thousands() {
        assert_eq!(format_guaranies(0), "Gs. 0");
        assert_eq!(format_guaranies(950), "Gs. 950");
        assert_eq!(format_guaranies(185_000), "Gs. 185.000");
        assert_eq!(format_guaranies(1_250_000), "Gs. 1.250.000");
    }

    #[test]
    fn no_selection_shows_price_range_when_prices_differ() {
        let p = product(vec![
            variant("1", Some("Negro"), Some("14\""), 150_000),
            variant("2", Some("Negro"), Some("15\""), 185_000),
        ]);
        let state = display_state(&p, &Selection::default());
        assert_eq!(
            state.price,
            PriceDisplay::Range {
                min: 150_000,
                max: 185_000
            }
        );
        assert_eq!(state.formatted_price, "Gs. 150.000 – Gs. 185.000");
        assert!(!state.can_add_to_cart, "axes exist but nothing is selected");
        assert!(!state.sold_out);
    }

    #[test]
    fn no_selection_shows_uniform_price_when_prices_agree() {
        let p = product(vec![
            variant("1", Some("Negro"), Some("14\""), 150_000),
            variant("2", Some("Negro"), Some("15\""), 150_000),
        ]);
        let state = display_state(&p, &Selection::default());
        assert_eq!(state.price, PriceDisplay::Single { amount: 150_000 });
    }

    #[test]
    fn no_variants_falls_back_to_base_price() {
        let state = display_state(&product(vec![]), &Selection::default());
        assert_eq!(state.price, PriceDisplay::Single { amount: 150_000 });
        assert_eq!(state.stock, StockLabel::InStock(10));
        assert!(!state.can_add_to_cart);
    }

    #[test]
    fn resolved_variant_drives_price_image_and_stock() {
        let mut v = variant("2", Some("Negro"), Some("15\""), 185_000);
        v.stock = 2;
        v.image_url = Some("https://cdn.example.com/negro-15.jpg".to_string());
        let p = product(vec![variant("1", Some("Negro"), Some("14\""), 150_000), v]);

        let state = display_state(&p, &Selection::new(Some("Negro"), Some("15\"")));
        assert_eq!(state.price, PriceDisplay::Single { amount: 185_000 });
        assert_eq!(state.formatted_price, "Gs. 185.000");
        assert_eq!(
            state.image_url.as_deref(),
            Some("https://cdn.example.com/negro-15.jpg")
        );
        assert_eq!(state.stock, StockLabel::LastUnits(2));
        assert!(state.can_add_to_cart);
    }

    #[test]
    fn variant_without_image_falls_back_to_catalog_image() {
        let p = product(vec![variant("1", Some("Negro"), Some("14\""), 150_000)]);
        let state = display_state(&p, &Selection::new(Some("Negro"), None));
        assert_eq!(
            state.image_url.as_deref(),
            Some("https://cdn.example.com/funda.jpg")
        );
    }

    #[test]
    fn no_images_anywhere_yields_none_not_a_broken_url() {
        let mut p = product(vec![variant("1", Some("Negro"), Some("14\""), 150_000)]);
        p.images.clear();
        let state = display_state(&p, &Selection::new(Some("Negro"), None));
        assert!(state.image_url.is_none());
    }

    #[test]
    fn axisless_product_defaults_to_first_purchasable_variant() {
        // A billetera sold as a single SKU: no choice needed, the sole
        // variant is purchasable straight from the card.
        let mut lone = variant("1", None, None, 95_000);
        lone.stock = 7;
        let p = product(vec![lone]);
        let state = display_state(&p, &Selection::default());
        assert!(state.can_add_to_cart);
        assert_eq!(state.price, PriceDisplay::Single { amount: 95_000 });
        assert_eq!(state.stock, StockLabel::InStock(7));
    }

    #[test]
    fn sold_out_combination_shows_the_dead_variant_state() {
        // The disabled 16" row surfaces with its own zero stock, not the
        // product aggregate.
        let mut dead = variant("2", Some("Negro"), Some("16\""), 185_000);
        dead.stock = 0;
        dead.available = false;
        let p = product(vec![variant("1", Some("Negro"), Some("15\""), 150_000), dead]);

        let state = display_state(&p, &Selection::new(None, Some("16\"")));
        assert_eq!(state.stock, StockLabel::SoldOut);
        assert!(!state.can_add_to_cart);
        assert!(state.sold_out);
    }

    #[test]
    fn stock_label_tiers() {
        assert_eq!(StockLabel::from_count(0), StockLabel::SoldOut);
        assert_eq!(StockLabel::from_count(1), StockLabel::LastUnits(1));
        assert_eq!(StockLabel::from_count(3), StockLabel::LastUnits(3));
        assert_eq!(StockLabel::from_count(4), StockLabel::InStock(4));
    }
}
