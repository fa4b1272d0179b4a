//! Admin back-office lists: products, orders, users, customers.
//!
//! Each endpoint fetches the full backend list, applies its independent
//! filter criteria, then slices the filtered result by page. The datasets
//! are back-office sized (hundreds of rows), so one fetch-filter-slice pass
//! per request is the whole story — one shared helper, no per-page backend
//! round trips.

pub(super) mod customers;
pub(super) mod orders;
pub(super) mod products;
pub(super) mod users;

use serde::Serialize;

/// One page of an admin list, with enough counts for the pager widget.
#[derive(Debug, Serialize)]
pub(crate) struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Slices an already-filtered list into the requested page.
///
/// Page numbers are 1-based and clamped to at least 1; `per_page` is
/// bounded to 1..=100 with a default of 20. A page past the end yields an
/// empty `items` with the counts intact, which the pager renders as-is.
pub(crate) fn slice_page<T: Serialize>(
    filtered: Vec<T>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Page<T> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);

    let total = filtered.len();
    let total_pages = u32::try_from(total.div_ceil(per_page as usize)).unwrap_or(u32::MAX);

    let items = filtered
        .into_iter()
        .skip((page as usize - 1).saturating_mul(per_page as usize))
        .take(per_page as usize)
        .collect();

    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}

/// Case-insensitive substring match across several candidate fields.
pub(crate) fn text_matches(query: &str, fields: &[Option<&str>]) -> bool {
    let needle = query.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(&needle))
}
