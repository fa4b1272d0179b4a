//! Typed client for the commerce backend that owns all business state:
//! catalog, carts, orders, users, and customers. This crate is the only
//! place that talks to the backend; everything it returns is normalized into
//! domain types with canonical string ids and whole-guaraní amounts.

pub mod client;
pub mod error;
pub mod model;
pub mod normalize;
mod retry;
pub mod types;

pub use client::CommerceClient;
pub use error::CommerceError;
pub use model::{AdminUser, Cart, CartLine, Customer, Order};
pub use normalize::normalize_product;
pub use types::{AddCartItemRequest, CheckoutRequest};
