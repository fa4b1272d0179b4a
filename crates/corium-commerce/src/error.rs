use thiserror::Error;

/// Errors returned by the commerce backend client.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be built from the configured base and a path.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The requested entity does not exist (HTTP 404 from the backend).
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend returned `"status": "error"` with a message.
    #[error("commerce API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A wire value could not be converted into its domain representation.
    #[error("normalization failed for {entity}: {reason}")]
    Normalization { entity: String, reason: String },
}
