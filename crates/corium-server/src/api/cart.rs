//! Cart view and add-to-cart, with the selection re-validated server-side.
//!
//! The storefront UI already disables the button when `can_add_to_cart` is
//! false, but the gate is enforced again here: a stale tab or a handcrafted
//! request must not put an unavailable combination in the cart. Rejections
//! are `validation_error`s with a user-facing message, never faults — the
//! shopper keeps interacting.

use axum::{
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use corium_commerce::{AddCartItemRequest, Cart, CartLine, CommerceError};
use corium_core::variants::{format_guaranies, resolve, Resolution, Selection};
use corium_core::{Product, Variant};

use crate::middleware::RequestId;

use super::{map_commerce_error, require_session, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CartView {
    id: String,
    items: Vec<CartLineView>,
    total: i64,
    formatted_total: String,
}

#[derive(Debug, Serialize)]
pub(super) struct CartLineView {
    product_id: String,
    variant_id: String,
    name: String,
    quantity: u32,
    unit_price: i64,
    formatted_unit_price: String,
    line_total: i64,
    formatted_line_total: String,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddItemBody {
    pub product_id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Why an add-to-cart attempt was refused. Both cases are expected shopper
/// states, surfaced as messages next to the button.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum AddRejection {
    SizeRequired,
    ColorRequired,
    Unavailable,
}

impl AddRejection {
    fn user_message(&self) -> &'static str {
        match self {
            AddRejection::SizeRequired => "Elegí un tamaño antes de agregar al carrito",
            AddRejection::ColorRequired => "Elegí un color antes de agregar al carrito",
            AddRejection::Unavailable => "Esta combinación está agotada",
        }
    }
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let session = require_session(&headers, &req_id.0)?;

    let cart = state
        .client
        .get_cart(&session)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: cart_view(&cart),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn add_cart_item(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(body): Json<AddItemBody>,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let session = require_session(&headers, &req_id.0)?;

    if body.quantity == 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "quantity must be at least 1",
        ));
    }

    let product = state
        .client
        .get_product(&body.product_id)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let selection = Selection::new(body.color.as_deref(), body.size.as_deref());
    let variant = purchasable_variant(&product, &selection).map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.user_message())
    })?;

    let request = AddCartItemRequest {
        product_id: product.id.clone(),
        variant_id: variant.id.clone(),
        quantity: body.quantity,
    };

    let cart = state
        .client
        .add_cart_item(&session, &request)
        .await
        .map_err(|e| match e {
            // The backend re-checks stock at write time; its rejection is a
            // shopper-facing message, not a gateway fault.
            CommerceError::Api(message) => {
                ApiError::new(req_id.0.clone(), "validation_error", message)
            }
            other => map_commerce_error(req_id.0.clone(), &other),
        })?;

    Ok(Json(ApiResponse {
        data: cart_view(&cart),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// The purchasable variant implied by the selection, or why there is none.
///
/// Mirrors the storefront gate: a product with selectable axes needs a size
/// chosen when sizes exist (a lone color can settle by wildcard, a missing
/// size cannot) and at least one axis picked overall, and the resolved
/// variant must be purchasable. Only axis-less products default to their
/// sole purchasable variant.
pub(super) fn purchasable_variant<'a>(
    product: &'a Product,
    selection: &Selection,
) -> Result<&'a Variant, AddRejection> {
    if product.has_size_axis() && selection.size().is_none() {
        return Err(AddRejection::SizeRequired);
    }

    let resolution = resolve(&product.variants, selection);
    match resolution {
        Resolution::Available(v) => Ok(v),
        Resolution::NoSelection => {
            if product.has_color_axis() {
                return Err(AddRejection::ColorRequired);
            }
            // No axes to choose: fall back to the sole purchasable variant.
            product
                .variants
                .iter()
                .find(|v| v.available)
                .ok_or(AddRejection::Unavailable)
        }
        Resolution::Unavailable(_) | Resolution::NoMatch => Err(AddRejection::Unavailable),
    }
}

fn cart_view(cart: &Cart) -> CartView {
    CartView {
        id: cart.id.clone(),
        items: cart.items.iter().map(line_view).collect(),
        total: cart.total,
        formatted_total: format_guaranies(cart.total),
    }
}

fn line_view(line: &CartLine) -> CartLineView {
    CartLineView {
        product_id: line.product_id.clone(),
        variant_id: line.variant_id.clone(),
        name: line.name.clone(),
        quantity: line.quantity,
        unit_price: line.unit_price,
        formatted_unit_price: format_guaranies(line.unit_price),
        line_total: line.line_total,
        formatted_line_total: format_guaranies(line.line_total),
        image_url: line.image_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corium_core::ProductImage;

    fn variant(id: &str, color: Option<&str>, size: Option<&str>, available: bool) -> Variant {
        Variant {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            color: color.map(ToOwned::to_owned),
            size: size.map(ToOwned::to_owned),
            price: 150_000,
            stock: u32::from(available) * 2,
            image_url: None,
            available,
        }
    }

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: "p-1001".to_string(),
            name: "Funda para notebook".to_string(),
            description: None,
            category: Some("fundas".to_string()),
            base_price: 150_000,
            aggregate_stock: 4,
            images: vec![ProductImage {
                url: "https://cdn.example.com/funda.jpg".to_string(),
                alt: None,
            }],
            variants,
        }
    }

    #[test]
    fn size_axis_without_a_size_choice_is_rejected() {
        let p = product(vec![
            variant("1", Some("Negro"), Some("14\""), true),
            variant("2", Some("Negro"), Some("15\""), true),
        ]);
        let err = purchasable_variant(&p, &Selection::new(Some("Negro"), None)).unwrap_err();
        assert_eq!(err, AddRejection::SizeRequired);
    }

    #[test]
    fn complete_selection_yields_the_variant() {
        let p = product(vec![
            variant("1", Some("Negro"), Some("14\""), true),
            variant("2", Some("Negro"), Some("15\""), true),
        ]);
        let v = purchasable_variant(&p, &Selection::new(Some("Negro"), Some("15\"")))
            .expect("purchasable");
        assert_eq!(v.id, "2");
    }

    #[test]
    fn size_only_selection_settles_the_sole_color() {
        let p = product(vec![
            variant("1", Some("Roble"), Some("14\""), true),
            variant("2", Some("Roble"), Some("15\""), true),
        ]);
        let v = purchasable_variant(&p, &Selection::new(None, Some("15\"")))
            .expect("wildcard color settles");
        assert_eq!(v.id, "2");
    }

    #[test]
    fn sold_out_combination_is_rejected() {
        let p = product(vec![
            variant("1", Some("Negro"), Some("15\""), true),
            variant("2", Some("Negro"), Some("16\""), false),
        ]);
        let err = purchasable_variant(&p, &Selection::new(None, Some("16\""))).unwrap_err();
        assert_eq!(err, AddRejection::Unavailable);
    }

    #[test]
    fn color_axis_without_any_pick_is_rejected() {
        // Color-only product, e.g. a billetera in two leathers: an empty
        // selection must not silently take the first color.
        let p = product(vec![
            variant("1", Some("Negro"), None, true),
            variant("2", Some("Suela"), None, true),
        ]);
        let err = purchasable_variant(&p, &Selection::default()).unwrap_err();
        assert_eq!(err, AddRejection::ColorRequired);
    }

    #[test]
    fn axisless_product_defaults_to_first_purchasable_variant() {
        let p = product(vec![variant("1", None, None, true)]);
        let v = purchasable_variant(&p, &Selection::default()).expect("default variant");
        assert_eq!(v.id, "1");
    }

    #[test]
    fn axisless_product_with_nothing_purchasable_is_rejected() {
        let p = product(vec![variant("1", None, None, false)]);
        let err = purchasable_variant(&p, &Selection::default()).unwrap_err();
        assert_eq!(err, AddRejection::Unavailable);
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        assert!(AddRejection::SizeRequired.user_message().contains("tamaño"));
        assert!(AddRejection::Unavailable.user_message().contains("agotada"));
    }

    #[test]
    fn cart_view_formats_amounts() {
        let cart = Cart {
            id: "c-77".to_string(),
            items: vec![CartLine {
                product_id: "p-1001".to_string(),
                variant_id: "v-10".to_string(),
                name: "Funda 15\" Negro".to_string(),
                quantity: 2,
                unit_price: 185_000,
                line_total: 370_000,
                image_url: None,
            }],
            total: 370_000,
        };
        let view = cart_view(&cart);
        assert_eq!(view.formatted_total, "Gs. 370.000");
        assert_eq!(view.items[0].formatted_unit_price, "Gs. 185.000");
        assert_eq!(view.items[0].formatted_line_total, "Gs. 370.000");
    }
}
