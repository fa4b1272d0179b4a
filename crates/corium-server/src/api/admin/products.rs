//! Admin product list with filter + page slicing.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use corium_core::variants::{display_state, DisplayState, Selection};
use corium_core::Product;

use crate::middleware::RequestId;

use super::super::{map_commerce_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::{slice_page, text_matches, Page};

#[derive(Debug, Serialize)]
pub(in crate::api) struct AdminProductItem {
    id: String,
    name: String,
    category: Option<String>,
    variant_count: usize,
    aggregate_stock: u32,
    available: bool,
    display: DisplayState,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct AdminProductQuery {
    /// Substring match against product name and variant SKUs.
    pub q: Option<String>,
    pub category: Option<String>,
    /// `true` keeps products with at least one purchasable variant,
    /// `false` keeps the rest.
    pub available: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub(in crate::api) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AdminProductQuery>,
) -> Result<Json<ApiResponse<Page<AdminProductItem>>>, ApiError> {
    let products = state
        .client
        .list_products(None)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let filtered: Vec<AdminProductItem> = products
        .iter()
        .filter(|p| matches_filters(p, &query))
        .map(item_view)
        .collect();

    Ok(Json(ApiResponse {
        data: slice_page(filtered, query.page, query.per_page),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn matches_filters(product: &Product, query: &AdminProductQuery) -> bool {
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        let mut fields: Vec<Option<&str>> = vec![Some(product.name.as_str())];
        fields.extend(product.variants.iter().map(|v| Some(v.sku.as_str())));
        if !text_matches(q, &fields) {
            return false;
        }
    }

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        if product.category.as_deref() != Some(category) {
            return false;
        }
    }

    if let Some(available) = query.available {
        if product.has_available_variants() != available {
            return false;
        }
    }

    true
}

fn item_view(product: &Product) -> AdminProductItem {
    AdminProductItem {
        id: product.id.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        variant_count: product.variants.len(),
        aggregate_stock: product.aggregate_stock,
        available: product.has_available_variants(),
        display: display_state(product, &Selection::default()),
    }
}
