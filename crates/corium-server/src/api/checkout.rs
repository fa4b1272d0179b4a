//! Checkout submission and the order confirmation view.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use corium_commerce::{CheckoutRequest, Order};
use corium_core::variants::format_guaranies;

use crate::middleware::RequestId;

use super::{map_commerce_error, require_session, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CheckoutBody {
    pub customer_name: String,
    pub customer_email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct OrderView {
    number: String,
    status: String,
    customer_name: Option<String>,
    customer_email: Option<String>,
    total: i64,
    formatted_total: String,
    created_at: Option<DateTime<Utc>>,
    items: Vec<OrderLineView>,
}

#[derive(Debug, Serialize)]
pub(super) struct OrderLineView {
    name: String,
    quantity: u32,
    unit_price: i64,
    formatted_unit_price: String,
    line_total: i64,
}

pub(super) async fn submit_checkout(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(body): Json<CheckoutBody>,
) -> Result<Json<ApiResponse<OrderView>>, ApiError> {
    let session = require_session(&headers, &req_id.0)?;

    if let Err(field) = validate_checkout(&body) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("{field} must not be empty"),
        ));
    }

    let request = CheckoutRequest {
        customer_name: body.customer_name.trim().to_owned(),
        customer_email: body.customer_email.trim().to_owned(),
        phone: body.phone.filter(|p| !p.trim().is_empty()),
        address: body.address.trim().to_owned(),
        city: body.city.trim().to_owned(),
        notes: body.notes.filter(|n| !n.trim().is_empty()),
    };

    let order = state
        .client
        .submit_order(&session, &request)
        .await
        .map_err(|e| match e {
            corium_commerce::CommerceError::Api(message) => {
                ApiError::new(req_id.0.clone(), "validation_error", message)
            }
            other => map_commerce_error(req_id.0.clone(), &other),
        })?;

    Ok(Json(ApiResponse {
        data: order_view(&order),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_order(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<OrderView>>, ApiError> {
    let order = state
        .client
        .get_order(&number)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: order_view(&order),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Checks the required checkout fields, returning the first empty one.
fn validate_checkout(body: &CheckoutBody) -> Result<(), &'static str> {
    if body.customer_name.trim().is_empty() {
        return Err("customer_name");
    }
    if body.customer_email.trim().is_empty() {
        return Err("customer_email");
    }
    if body.address.trim().is_empty() {
        return Err("address");
    }
    if body.city.trim().is_empty() {
        return Err("city");
    }
    Ok(())
}

fn order_view(order: &Order) -> OrderView {
    OrderView {
        number: order.number.clone(),
        status: order.status.clone(),
        customer_name: order.customer_name.clone(),
        customer_email: order.customer_email.clone(),
        total: order.total,
        formatted_total: format_guaranies(order.total),
        created_at: order.created_at,
        items: order
            .items
            .iter()
            .map(|line| OrderLineView {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                formatted_unit_price: format_guaranies(line.unit_price),
                line_total: line.line_total,
            })
            .collect(),
    }
}
