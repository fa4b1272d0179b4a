//! HTTP client for the commerce backend REST API.
//!
//! Wraps `reqwest` with backend-specific error handling, bearer-token
//! service auth, typed response deserialization, and normalization into
//! domain types. All endpoints check the `"status"` field in the JSON
//! envelope and surface API-level errors as [`CommerceError::Api`]. Reads
//! are retried with back-off; cart and order writes are issued exactly once.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use corium_core::Product;

use crate::error::CommerceError;
use crate::model::{AdminUser, Cart, Customer, Order};
use crate::normalize::{
    normalize_cart, normalize_customer, normalize_order, normalize_product, normalize_user,
};
use crate::retry::retry_with_backoff;
use crate::types::{
    AddCartItemRequest, CartResponse, CheckoutRequest, CustomersResponse, OrderResponse,
    OrdersResponse, ProductResponse, ProductsResponse, UsersResponse,
};

/// Header carrying the shopper's backend-issued session id. Session issuance
/// is the backend's concern; this client only forwards the value.
const SESSION_HEADER: &str = "x-session-id";

/// Client for the commerce backend REST API.
///
/// Manages the HTTP client, service token, base URL, and retry policy. Use
/// [`CommerceClient::new`] with the configured backend URL, or point it at a
/// mock server in tests.
pub struct CommerceClient {
    client: Client,
    base_url: Url,
    token: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CommerceClient {
    /// Creates a new client for the backend at `base_url`.
    ///
    /// The default retry policy (3 retries, 1 s base back-off) applies;
    /// override with [`CommerceClient::with_retry_policy`].
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CommerceError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> Result<Self, CommerceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("corium/0.1 (storefront-bff)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joined paths extend it rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| CommerceError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: token.to_owned(),
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy for backend reads.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the storefront catalog, optionally restricted to a category.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::Api`] if the backend reports an error status.
    /// - [`CommerceError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CommerceError::Deserialize`] / [`CommerceError::Normalization`]
    ///   if the response does not match the expected shape.
    pub async fn list_products(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Product>, CommerceError> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(category) = category {
            params.push(("category", category));
        }
        let url = self.build_url("v1/products", &params)?;
        let body = self.get_json(&url, None).await?;
        Self::check_api_error(&body)?;

        let envelope: ProductsResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "listProducts".to_owned(),
                source: e,
            })?;

        envelope
            .products
            .into_iter()
            .map(normalize_product)
            .collect()
    }

    /// Fetches one product with all its variants.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::NotFound`] if the product does not exist.
    /// - [`CommerceError::Api`] / [`CommerceError::Http`] /
    ///   [`CommerceError::Deserialize`] as for [`Self::list_products`].
    pub async fn get_product(&self, id: &str) -> Result<Product, CommerceError> {
        let url = self.build_url(&format!("v1/products/{id}"), &[])?;
        let body = self.get_json(&url, None).await?;
        Self::check_api_error(&body)?;

        let envelope: ProductResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: format!("getProduct(id={id})"),
                source: e,
            })?;

        normalize_product(envelope.product)
    }

    /// Fetches the cart for a shopper session.
    ///
    /// # Errors
    ///
    /// As for [`Self::list_products`].
    pub async fn get_cart(&self, session_id: &str) -> Result<Cart, CommerceError> {
        let url = self.build_url("v1/cart", &[])?;
        let body = self.get_json(&url, Some(session_id)).await?;
        Self::check_api_error(&body)?;

        let envelope: CartResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "getCart".to_owned(),
                source: e,
            })?;

        normalize_cart(envelope.cart)
    }

    /// Adds a variant to the session's cart and returns the updated cart.
    ///
    /// Not retried: the backend decrements reservations on this call.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::Api`] when the backend rejects the line (e.g.
    ///   insufficient stock), with the backend's message.
    /// - Otherwise as for [`Self::list_products`].
    pub async fn add_cart_item(
        &self,
        session_id: &str,
        request: &AddCartItemRequest,
    ) -> Result<Cart, CommerceError> {
        let url = self.build_url("v1/cart/items", &[])?;
        let body = self.post_json(&url, request, Some(session_id)).await?;
        Self::check_api_error(&body)?;

        let envelope: CartResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "addCartItem".to_owned(),
                source: e,
            })?;

        normalize_cart(envelope.cart)
    }

    /// Submits the session's cart as an order.
    ///
    /// Not retried: order creation is not idempotent.
    ///
    /// # Errors
    ///
    /// As for [`Self::add_cart_item`].
    pub async fn submit_order(
        &self,
        session_id: &str,
        request: &CheckoutRequest,
    ) -> Result<Order, CommerceError> {
        let url = self.build_url("v1/orders", &[])?;
        let body = self.post_json(&url, request, Some(session_id)).await?;
        Self::check_api_error(&body)?;

        let envelope: OrderResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "submitOrder".to_owned(),
                source: e,
            })?;

        normalize_order(envelope.order)
    }

    /// Fetches one order by its backend-assigned number, for the
    /// confirmation view.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::NotFound`] if the order does not exist.
    /// - Otherwise as for [`Self::list_products`].
    pub async fn get_order(&self, number: &str) -> Result<Order, CommerceError> {
        let url = self.build_url(&format!("v1/orders/{number}"), &[])?;
        let body = self.get_json(&url, None).await?;
        Self::check_api_error(&body)?;

        let envelope: OrderResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: format!("getOrder(number={number})"),
                source: e,
            })?;

        normalize_order(envelope.order)
    }

    /// Fetches every order, for the admin list.
    ///
    /// # Errors
    ///
    /// As for [`Self::list_products`].
    pub async fn list_orders(&self) -> Result<Vec<Order>, CommerceError> {
        let url = self.build_url("v1/admin/orders", &[])?;
        let body = self.get_json(&url, None).await?;
        Self::check_api_error(&body)?;

        let envelope: OrdersResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "listOrders".to_owned(),
                source: e,
            })?;

        envelope.orders.into_iter().map(normalize_order).collect()
    }

    /// Fetches every back-office user, for the admin list.
    ///
    /// # Errors
    ///
    /// As for [`Self::list_products`].
    pub async fn list_users(&self) -> Result<Vec<AdminUser>, CommerceError> {
        let url = self.build_url("v1/admin/users", &[])?;
        let body = self.get_json(&url, None).await?;
        Self::check_api_error(&body)?;

        let envelope: UsersResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "listUsers".to_owned(),
                source: e,
            })?;

        Ok(envelope.users.into_iter().map(normalize_user).collect())
    }

    /// Fetches every customer record, for the admin list.
    ///
    /// # Errors
    ///
    /// As for [`Self::list_products`].
    pub async fn list_customers(&self) -> Result<Vec<Customer>, CommerceError> {
        let url = self.build_url("v1/admin/customers", &[])?;
        let body = self.get_json(&url, None).await?;
        Self::check_api_error(&body)?;

        let envelope: CustomersResponse =
            serde_json::from_value(body).map_err(|e| CommerceError::Deserialize {
                context: "listCustomers".to_owned(),
                source: e,
            })?;

        Ok(envelope
            .customers
            .into_iter()
            .map(normalize_customer)
            .collect())
    }

    /// Probes the backend's health endpoint. A 2xx response counts as
    /// reachable; the body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Http`] when the backend is unreachable or
    /// unhealthy.
    pub async fn health(&self) -> Result<(), CommerceError> {
        let url = self.build_url("v1/health", &[])?;
        let response = self.client.get(url).bearer_auth(&self.token).send().await?;
        response.error_for_status()?;
        Ok(())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, CommerceError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| CommerceError::InvalidUrl(format!("'{path}': {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET with retry/back-off, asserts a 2xx status, and parses the
    /// body as JSON. 404 is mapped to [`CommerceError::NotFound`] and never
    /// retried.
    async fn get_json(
        &self,
        url: &Url,
        session_id: Option<&str>,
    ) -> Result<serde_json::Value, CommerceError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_json(url, session_id)
        })
        .await
    }

    /// One GET attempt, without retry.
    async fn fetch_json(
        &self,
        url: &Url,
        session_id: Option<&str>,
    ) -> Result<serde_json::Value, CommerceError> {
        let mut request = self.client.get(url.clone()).bearer_auth(&self.token);
        if let Some(session_id) = session_id {
            request = request.header(SESSION_HEADER, session_id);
        }
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CommerceError::NotFound(url.path().to_owned()));
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CommerceError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Sends a POST exactly once and parses the response body as JSON.
    ///
    /// Non-2xx responses surface the backend's `"message"` when the error
    /// body carries one, so stock rejections read as what they are instead
    /// of a bare status code.
    async fn post_json<B: serde::Serialize>(
        &self,
        url: &Url,
        body: &B,
        session_id: Option<&str>,
    ) -> Result<serde_json::Value, CommerceError> {
        let mut request = self.client.post(url.clone()).bearer_auth(&self.token);
        if let Some(session_id) = session_id {
            request = request.header(SESSION_HEADER, session_id);
        }
        let response = request.json(body).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CommerceError::NotFound(url.path().to_owned()));
        }

        let text = response.text().await?;
        if !status.is_success() {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
                if let Some(message) = value.get("message").and_then(serde_json::Value::as_str) {
                    return Err(CommerceError::Api(message.to_owned()));
                }
            }
            return Err(CommerceError::Api(format!("unexpected status {status}")));
        }

        serde_json::from_str(&text).map_err(|e| CommerceError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"status"` field and returns an error if it
    /// indicates failure.
    fn check_api_error(body: &serde_json::Value) -> Result<(), CommerceError> {
        if body.get("status").and_then(serde_json::Value::as_str) == Some("error") {
            let msg = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(CommerceError::Api(msg));
        }
        Ok(())
    }
}
