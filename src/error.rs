//! Error types for the Kraken REST client.
//!
//! Failures fall into four families that callers usually want to tell apart:
//! missing credentials, cryptographic/configuration problems, transport
//! failures, and response decoding failures. Errors reported by Kraken itself
//! in the response envelope surface as [`KrakenError::Api`].

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for all Kraken client operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// A private endpoint was called without both API key and secret.
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,

    /// The request could not be signed.
    #[error("Signing failed: {0}")]
    Crypto(#[from] CryptoError),

    /// The transport failed or the server answered with a non-success status.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response envelope was well-formed JSON but carried no usable result.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Kraken API returned an error
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// Request parameters could not be URL-encoded.
    #[error("Invalid request parameters: {0}")]
    InvalidParams(#[from] serde_urlencoded::ser::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// A value could not be used as an HTTP header (e.g. an API key with control characters).
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The runtime behind the blocking client could not be started.
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Failures while computing a request signature.
///
/// These indicate a configuration problem with the API secret rather than a
/// problem with an individual request.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The API secret is not valid base64.
    #[error("API secret must be valid base64: {0}")]
    InvalidSecret(#[from] base64::DecodeError),

    /// The decoded secret was rejected as an HMAC key.
    #[error("API secret cannot be used as an HMAC-SHA512 key")]
    InvalidKey,
}

/// Failures reported by the HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code of the response.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// Failure raised by a custom [`Transport`](crate::transport::Transport) implementation.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary error from a custom transport.
    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(error.into())
    }

    /// The HTTP status, if the failure was a non-success response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Kraken API error codes and messages.
///
/// These are errors returned by the Kraken API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error category from Kraken (e.g., "EGeneral")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Parse the first entry of Kraken's error array (`["EGeneral:Invalid arguments"]`).
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        errors.first().map(|e| match e.split_once(':') {
            Some((code, message)) => Self::new(code, message),
            None => Self::new("Unknown", e.clone()),
        })
    }

    /// Get the full error string in Kraken's format (code:message).
    pub fn full_code(&self) -> String {
        format!("{}:{}", self.code, self.message)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.code.as_str(), "EAPI" | "EOrder") && self.message.contains("Rate limit")
    }

    /// Check if this is an invalid nonce error.
    ///
    /// Usually means another client shares the same API key, or the nonce
    /// source was reset to a lower value.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid signature")
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.code == "EGeneral" && self.message.contains("Permission denied")
    }

    /// Check if this is a service unavailable error.
    pub fn is_service_unavailable(&self) -> bool {
        self.code == "EService" && (self.message.contains("Unavailable") || self.message.contains("Busy"))
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";

    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";

    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const ORDER_NOT_FOUND: &str = "EOrder:Unknown order";

    pub const SERVICE_UNAVAILABLE: &str = "EService:Unavailable";
    pub const SERVICE_BUSY: &str = "EService:Busy";

    pub const UNKNOWN_ASSET_PAIR: &str = "EQuery:Unknown asset pair";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_array() {
        let errors = vec![error_codes::INVALID_NONCE.to_string()];
        let error = ApiError::from_error_array(&errors).unwrap();
        assert_eq!(error.code, "EAPI");
        assert_eq!(error.message, "Invalid nonce");
        assert!(error.is_invalid_nonce());
        assert!(!error.is_invalid_key());
        assert_eq!(error.full_code(), error_codes::INVALID_NONCE);
    }

    #[test]
    fn test_api_error_without_category() {
        let errors = vec!["something odd".to_string()];
        let error = ApiError::from_error_array(&errors).unwrap();
        assert_eq!(error.code, "Unknown");
        assert_eq!(error.message, "something odd");
        assert!(ApiError::from_error_array(&[]).is_none());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new("EOrder", "Insufficient funds");
        assert_eq!(error.to_string(), "EOrder: Insufficient funds");
    }

    #[test]
    fn test_transport_status_is_exposed() {
        let err = TransportError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(TransportError::other("boom").status(), None);
    }

    #[test]
    fn test_crypto_error_converts() {
        let err: KrakenError = CryptoError::InvalidKey.into();
        assert!(matches!(err, KrakenError::Crypto(CryptoError::InvalidKey)));
    }
}
