use serde::{Deserialize, Serialize};

/// A storefront product as supplied by the commerce backend, with every
/// purchasable variant attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend product ID, canonicalized to a string at the wire boundary.
    pub id: String,
    pub name: String,
    /// Raw HTML description from the backend, shown as-is by the storefront.
    pub description: Option<String>,
    /// Category slug, e.g. `"fundas"` or `"cinturones"`.
    pub category: Option<String>,
    /// Fallback price in whole guaraníes, used only when the product has no
    /// variants at all.
    pub base_price: i64,
    /// Product-level stock aggregate maintained by the backend. Shown when no
    /// variant is resolved; individual variants carry their own counts.
    pub aggregate_stock: u32,
    /// Catalog images in display order. The first entry is the default image.
    pub images: Vec<ProductImage>,
    pub variants: Vec<Variant>,
}

/// A catalog image attached to a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub alt: Option<String>,
}

/// One purchasable color/size combination of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Backend variant ID, canonicalized to a string at the wire boundary.
    pub id: String,
    /// Human-readable code, unique within a product.
    pub sku: String,
    /// Color label; `None` means the product has no color axis on this row.
    pub color: Option<String>,
    /// Size label, e.g. `15"`; `None` means no size axis on this row.
    pub size: Option<String>,
    /// Price in whole guaraníes. Guaraní has no minor unit, so amounts are
    /// plain integers end to end.
    pub price: i64,
    pub stock: u32,
    /// Overrides the product's default image while this variant is resolved.
    pub image_url: Option<String>,
    /// Purchasability flag, independent of `stock` — the back office can
    /// disable a variant that still has units on hand.
    pub available: bool,
}

impl Product {
    /// Returns `true` if at least one variant is currently purchasable.
    #[must_use]
    pub fn has_available_variants(&self) -> bool {
        self.variants.iter().any(|v| v.available)
    }

    /// Returns `true` if any variant carries a color label.
    #[must_use]
    pub fn has_color_axis(&self) -> bool {
        self.variants.iter().any(|v| v.color.is_some())
    }

    /// Returns `true` if any variant carries a size label.
    #[must_use]
    pub fn has_size_axis(&self) -> bool {
        self.variants.iter().any(|v| v.size.is_some())
    }

    /// The `(min, max)` price across all variants, or `None` when the
    /// product has no variants.
    #[must_use]
    pub fn price_span(&self) -> Option<(i64, i64)> {
        let mut prices = self.variants.iter().map(|v| v.price);
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some((min, max))
    }

    /// The first catalog image, if any.
    #[must_use]
    pub fn default_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_variant(id: &str, price: i64, available: bool) -> Variant {
        Variant {
            id: id.to_string(),
            sku: format!("FND-{id}"),
            color: Some("Negro".to_string()),
            size: Some("15\"".to_string()),
            price,
            stock: 4,
            image_url: None,
            available,
        }
    }

    fn make_product(variants: Vec<Variant>) -> Product {
        Product {
            id: "1001".to_string(),
            name: "Funda para notebook".to_string(),
            description: Some("<p>Cuero vacuno curtido a mano.</p>".to_string()),
            category: Some("fundas".to_string()),
            base_price: 150_000,
            aggregate_stock: 8,
            images: vec![ProductImage {
                url: "https://cdn.example.com/funda-negro.jpg".to_string(),
                alt: Some("Funda de cuero negro".to_string()),
            }],
            variants,
        }
    }

    #[test]
    fn has_available_variants_false_when_no_variants() {
        let product = make_product(vec![]);
        assert!(!product.has_available_variants());
    }

    #[test]
    fn has_available_variants_false_when_all_unavailable() {
        let product = make_product(vec![
            make_variant("1", 150_000, false),
            make_variant("2", 165_000, false),
        ]);
        assert!(!product.has_available_variants());
    }

    #[test]
    fn has_available_variants_true_when_at_least_one_available() {
        let product = make_product(vec![
            make_variant("1", 150_000, false),
            make_variant("2", 165_000, true),
        ]);
        assert!(product.has_available_variants());
    }

    #[test]
    fn axis_detection_reflects_variant_labels() {
        let mut no_size = make_variant("1", 150_000, true);
        no_size.size = None;
        let product = make_product(vec![no_size]);
        assert!(product.has_color_axis());
        assert!(!product.has_size_axis());
    }

    #[test]
    fn price_span_none_without_variants() {
        assert!(make_product(vec![]).price_span().is_none());
    }

    #[test]
    fn price_span_covers_min_and_max() {
        let product = make_product(vec![
            make_variant("1", 185_000, true),
            make_variant("2", 150_000, true),
            make_variant("3", 165_000, false),
        ]);
        assert_eq!(product.price_span(), Some((150_000, 185_000)));
    }

    #[test]
    fn default_image_is_first_catalog_image() {
        let product = make_product(vec![]);
        assert_eq!(
            product.default_image().map(|i| i.url.as_str()),
            Some("https://cdn.example.com/funda-negro.jpg")
        );
    }

    #[test]
    fn serde_roundtrip_product() {
        let product = make_product(vec![make_variant("1", 150_000, true)]);
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded.id, product.id);
        assert_eq!(decoded.variants.len(), 1);
        assert_eq!(decoded.variants[0].price, 150_000);
    }
}
