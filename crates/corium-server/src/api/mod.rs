mod admin;
mod cart;
mod catalog;
mod checkout;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use corium_commerce::{CommerceClient, CommerceError};
use corium_core::CategoryConfig;

use crate::middleware::{
    enforce_rate_limit, request_id, require_admin_auth, AdminAuthState, RateLimitState, RequestId,
};

/// Header carrying the shopper's backend-issued session id, forwarded as-is
/// to the commerce backend for cart and checkout calls.
pub(crate) const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<CommerceClient>,
    pub categories: Arc<Vec<CategoryConfig>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    commerce_backend: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a commerce client failure to the API envelope. Backend details stay
/// in the log; the caller sees a stable code.
pub(super) fn map_commerce_error(request_id: String, error: &CommerceError) -> ApiError {
    match error {
        CommerceError::NotFound(what) => {
            ApiError::new(request_id, "not_found", format!("not found: {what}"))
        }
        other => {
            tracing::error!(error = %other, "commerce backend request failed");
            ApiError::new(
                request_id,
                "bad_gateway",
                "commerce backend request failed",
            )
        }
    }
}

/// Reads the shopper session header, rejecting requests that lack it.
pub(super) fn require_session(headers: &HeaderMap, request_id: &str) -> Result<String, ApiError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            ApiError::new(
                request_id.to_owned(),
                "bad_request",
                format!("missing {SESSION_HEADER} header"),
            )
        })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-session-id"),
        ])
}

fn storefront_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/categories", get(catalog::list_categories))
        .route("/api/v1/catalog", get(catalog::list_catalog))
        .route("/api/v1/catalog/{product_id}", get(catalog::get_product_view))
        .route("/api/v1/cart", get(cart::get_cart))
        .route("/api/v1/cart/items", post(cart::add_cart_item))
        .route("/api/v1/checkout", post(checkout::submit_checkout))
        .route("/api/v1/orders/{number}", get(checkout::get_order))
}

fn admin_router(auth: AdminAuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/products", get(admin::products::list_products))
        .route("/api/v1/admin/orders", get(admin::orders::list_orders))
        .route("/api/v1/admin/users", get(admin::users::list_users))
        .route(
            "/api/v1/admin/customers",
            get(admin::customers::list_customers),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_admin_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AdminAuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(storefront_router())
        .merge(admin_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match state.client.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    commerce_backend: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: commerce backend unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        commerce_backend: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
