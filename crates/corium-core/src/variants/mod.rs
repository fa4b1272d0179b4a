//! Variant resolution engine.
//!
//! One shared implementation of the selection logic that the storefront's
//! product detail page, product cards, and the generic attribute selector all
//! render from. Given a product's variant list and a partial color/size
//! selection, the engine answers four questions:
//!
//! - which values on each axis are still selectable ([`index`]),
//! - which single variant the selection implies ([`resolve`]),
//! - what price, image and stock state to show ([`display`]),
//! - how a selection changes when the user picks an axis value
//!   ([`selection`]).
//!
//! Everything here is pure, synchronous computation over an in-memory variant
//! list. "No matching variant" and "axis has no options" are ordinary return
//! values, never errors.

pub mod display;
pub mod index;
pub mod resolve;
pub mod selection;

pub use display::{display_state, format_guaranies, DisplayState, PriceDisplay, StockLabel};
pub use index::{colors_for, sizes_for, AxisOption};
pub use resolve::{resolve, Resolution, Selection};
pub use selection::SelectionState;
