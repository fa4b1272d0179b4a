//! Admin order list with filter + page slicing.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use corium_commerce::Order;
use corium_core::variants::format_guaranies;

use crate::middleware::RequestId;

use super::super::{map_commerce_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::{slice_page, text_matches, Page};

#[derive(Debug, Serialize)]
pub(in crate::api) struct AdminOrderItem {
    id: String,
    number: String,
    status: String,
    customer_name: Option<String>,
    customer_email: Option<String>,
    total: i64,
    formatted_total: String,
    item_count: usize,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct AdminOrderQuery {
    /// Substring match against order number, customer name and email.
    pub q: Option<String>,
    /// Exact lifecycle state, e.g. `pendiente` or `enviado`.
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub(in crate::api) async fn list_orders(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AdminOrderQuery>,
) -> Result<Json<ApiResponse<Page<AdminOrderItem>>>, ApiError> {
    let orders = state
        .client
        .list_orders()
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let filtered: Vec<AdminOrderItem> = orders
        .iter()
        .filter(|o| matches_filters(o, &query))
        .map(item_view)
        .collect();

    Ok(Json(ApiResponse {
        data: slice_page(filtered, query.page, query.per_page),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn matches_filters(order: &Order, query: &AdminOrderQuery) -> bool {
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        let fields = [
            Some(order.number.as_str()),
            order.customer_name.as_deref(),
            order.customer_email.as_deref(),
        ];
        if !text_matches(q, &fields) {
            return false;
        }
    }

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        if order.status != status {
            return false;
        }
    }

    true
}

fn item_view(order: &Order) -> AdminOrderItem {
    AdminOrderItem {
        id: order.id.clone(),
        number: order.number.clone(),
        status: order.status.clone(),
        customer_name: order.customer_name.clone(),
        customer_email: order.customer_email.clone(),
        total: order.total,
        formatted_total: format_guaranies(order.total),
        item_count: order.items.len(),
        created_at: order.created_at,
    }
}
