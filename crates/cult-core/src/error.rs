//! # Client Error Types
//!
//! Typed error handling for the checkout API client.
//! All client operations return `Result<T, CultError>`.

use serde::Deserialize;
use thiserror::Error;

/// Fallback message when a failed search carries no server message
pub const SEARCH_FAILED: &str = "Search failed";

/// Fallback message when a failed checkout carries no server message
pub const ORDER_CREATION_FAILED: &str = "Order creation failed";

/// Core error type for all client operations
#[derive(Debug, Error)]
pub enum CultError {
    /// Configuration errors (malformed environment values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-success status the client does not special-case
    #[error("API error: {status}")]
    Http { status: u16 },

    /// Product slug returned 404
    #[error("Product '{slug}' not found")]
    ProductNotFound { slug: String },

    /// Order id returned 404
    #[error("Order '{order_id}' not found")]
    OrderNotFound { order_id: String },

    /// Server rejected a search or checkout
    #[error("{message}")]
    Api { message: String },

    /// Network/HTTP error talking to the API
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CultError {
    /// Returns true for 404s on slug- or id-addressed resources
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CultError::ProductNotFound { .. } | CultError::OrderNotFound { .. }
        )
    }

    /// HTTP status associated with this error, when one is known
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CultError::Http { status } => Some(*status),
            CultError::ProductNotFound { .. } | CultError::OrderNotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type CultResult<T> = Result<T, CultError>;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the server-supplied message from an `{ "error": { "message" } }`
/// body, or return `fallback` when the body is not shaped that way or the
/// message is empty.
pub fn error_message(body: &str, fallback: &str) -> String {
    let server_message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty());

    match server_message {
        Some(message) => message,
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_server() {
        let body = r#"{"error":{"message":"Items must not be empty"}}"#;
        assert_eq!(
            error_message(body, ORDER_CREATION_FAILED),
            "Items must not be empty"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"error":{}}"#, SEARCH_FAILED), "Search failed");
        assert_eq!(error_message(r#"{"error":{"message":""}}"#, SEARCH_FAILED), "Search failed");
        assert_eq!(error_message("{}", ORDER_CREATION_FAILED), "Order creation failed");
        assert_eq!(error_message("<html>502</html>", SEARCH_FAILED), "Search failed");
        assert_eq!(error_message("", SEARCH_FAILED), "Search failed");
    }

    #[test]
    fn test_display() {
        assert_eq!(CultError::Http { status: 503 }.to_string(), "API error: 503");
        assert_eq!(
            CultError::ProductNotFound { slug: "hoodie".into() }.to_string(),
            "Product 'hoodie' not found"
        );
        assert_eq!(
            CultError::OrderNotFound { order_id: "ord_1".into() }.to_string(),
            "Order 'ord_1' not found"
        );
        assert_eq!(
            CultError::Api { message: "Search failed".into() }.to_string(),
            "Search failed"
        );
    }

    #[test]
    fn test_not_found_and_status() {
        let err = CultError::OrderNotFound { order_id: "x".into() };
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));

        let err = CultError::Http { status: 500 };
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), Some(500));

        assert_eq!(CultError::Network("reset".into()).status_code(), None);
    }
}
