//! Normalized commerce entities produced by this client.
//!
//! Everything here carries canonical string ids and whole-guaraní `i64`
//! amounts; the wire-shape tolerance lives in [`crate::types`] and the
//! conversion in [`crate::normalize`]. Product and variant data normalize
//! directly into `corium_core` types instead, since the resolution engine
//! consumes those.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A shopper's cart as the backend tracks it for one session.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: String,
    pub items: Vec<CartLine>,
    /// Whole guaraníes across all lines.
    pub total: i64,
}

/// One line in a [`Cart`] or an [`Order`].
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub line_total: i64,
    pub image_url: Option<String>,
}

/// A placed order, as shown on the confirmation page and in the admin list.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: String,
    pub number: String,
    pub status: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub total: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<CartLine>,
}

/// A back-office user account.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// A shopper record.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub order_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}
