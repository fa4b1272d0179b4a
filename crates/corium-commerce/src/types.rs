//! Commerce backend wire types.
//!
//! ## Observed shapes from the backend API
//!
//! ### Identifiers
//! Depending on the endpoint (and on records migrated from the legacy
//! store), an id may arrive as a JSON string (`"66b2f0a1"`), a number
//! (`1001`), or an object wrapping the id (`{"id": "66b2f0a1"}`). [`RawId`]
//! accepts all three and collapses to one canonical string at this boundary,
//! so nothing downstream ever inspects the shape again.
//!
//! ### Prices
//! Whole guaraníes, sent either as a JSON number (`185000`) or as a numeric
//! string (`"185000"`). There is no minor unit. [`RawPrice`] accepts both;
//! normalization rejects anything that does not parse as a non-negative
//! integer.
//!
//! ### Optional strings
//! The backend emits empty strings rather than `null` for cleared fields
//! (`"sku": ""`, `"color": ""`). Wire types keep them as-is; normalization
//! turns empty strings into `None`.
//!
//! ### `available` on variants
//! Boolean; absent on records predating the back-office toggle. Defaults to
//! `true` (optimistic) when missing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An identifier as the backend sends it: string, number, or wrapped object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
    Object { id: Box<RawId> },
}

impl RawId {
    /// Collapses the wire shape into the canonical string form.
    #[must_use]
    pub fn canonicalize(&self) -> String {
        match self {
            RawId::Text(s) => s.clone(),
            RawId::Number(n) => n.to_string(),
            RawId::Object { id } => id.canonicalize(),
        }
    }
}

/// A whole-guaraní amount as the backend sends it: number or numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(i64),
    Text(String),
}

/// Top-level response from `GET /v1/products`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<ApiProduct>,
}

/// Top-level response from `GET /v1/products/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub product: ApiProduct,
}

/// A product as served by the catalog endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiProduct {
    pub id: RawId,
    pub name: String,
    /// Raw HTML description. May be `null` or absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Category slug. Empty string normalized to `None`.
    #[serde(default)]
    pub category: Option<String>,
    /// Product-level fallback price; used only when `variants` is empty.
    #[serde(default)]
    pub base_price: Option<RawPrice>,
    /// Aggregate stock across variants, maintained by the backend.
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<ApiImage>,
    #[serde(default)]
    pub variants: Vec<ApiVariant>,
}

/// A purchasable variant of an [`ApiProduct`].
#[derive(Debug, Deserialize)]
pub struct ApiVariant {
    pub id: RawId,
    /// May be an empty string on legacy records; normalization falls back to
    /// the variant id.
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub price: RawPrice,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Defaults to `true` when absent (optimistic assumption).
    #[serde(default = "default_available")]
    pub available: bool,
}

/// A catalog image.
#[derive(Debug, Deserialize)]
pub struct ApiImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Top-level response from the cart endpoints.
#[derive(Debug, Deserialize)]
pub struct CartResponse {
    pub cart: ApiCart,
}

#[derive(Debug, Deserialize)]
pub struct ApiCart {
    pub id: RawId,
    #[serde(default)]
    pub items: Vec<ApiCartItem>,
    /// Backend-computed total; recomputed locally when absent.
    #[serde(default)]
    pub total: Option<RawPrice>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCartItem {
    pub product_id: RawId,
    pub variant_id: RawId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: RawPrice,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body for `POST /v1/cart/items`.
#[derive(Debug, Serialize)]
pub struct AddCartItemRequest {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
}

/// Body for `POST /v1/orders`.
#[derive(Debug, Serialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Top-level response from the order endpoints.
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub order: ApiOrder,
}

#[derive(Debug, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<ApiOrder>,
}

#[derive(Debug, Deserialize)]
pub struct ApiOrder {
    pub id: RawId,
    /// Backend-assigned order number, e.g. `"COR-2031"`.
    pub number: String,
    /// Lifecycle state string (`"pendiente"`, `"pagado"`, `"enviado"`,
    /// `"entregado"`, `"cancelado"`). Kept as a string — the set belongs to
    /// the backend.
    pub status: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub total: RawPrice,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<ApiCartItem>,
}

/// Top-level response from `GET /v1/admin/users`.
#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<ApiUser>,
}

/// A back-office user account (the people operating the admin panel).
#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub id: RawId,
    pub name: String,
    pub email: String,
    /// Role string as the backend defines it (`"admin"`, `"editor"`).
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Top-level response from `GET /v1/admin/customers`.
#[derive(Debug, Deserialize)]
pub struct CustomersResponse {
    pub customers: Vec<ApiCustomer>,
}

/// A shopper record maintained by the backend.
#[derive(Debug, Deserialize)]
pub struct ApiCustomer {
    pub id: RawId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Default for `ApiVariant::available` when the field is absent. Serde's
/// `default = "..."` attribute needs a function path, not a const.
fn default_available() -> bool {
    true
}

fn default_active() -> bool {
    true
}
