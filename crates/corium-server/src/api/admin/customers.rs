//! Admin customer list with filter + page slicing.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use corium_commerce::Customer;

use crate::middleware::RequestId;

use super::super::{map_commerce_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::{slice_page, text_matches, Page};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct AdminCustomerQuery {
    /// Substring match against customer name and email.
    pub q: Option<String>,
    /// Exact city, e.g. `Asunción`.
    pub city: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub(in crate::api) async fn list_customers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AdminCustomerQuery>,
) -> Result<Json<ApiResponse<Page<Customer>>>, ApiError> {
    let customers = state
        .client
        .list_customers()
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let filtered: Vec<Customer> = customers
        .into_iter()
        .filter(|c| matches_filters(c, &query))
        .collect();

    Ok(Json(ApiResponse {
        data: slice_page(filtered, query.page, query.per_page),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn matches_filters(customer: &Customer, query: &AdminCustomerQuery) -> bool {
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        if !text_matches(
            q,
            &[Some(customer.name.as_str()), Some(customer.email.as_str())],
        ) {
            return false;
        }
    }

    if let Some(city) = query.city.as_deref().filter(|c| !c.is_empty()) {
        if customer.city.as_deref() != Some(city) {
            return false;
        }
    }

    true
}
