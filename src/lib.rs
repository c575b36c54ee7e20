//! # Kraken REST Client
//!
//! A Rust client for the Kraken exchange REST API.
//!
//! ## Features
//!
//! - Kraken request signing (HMAC-SHA512 over the path and a SHA-256 digest of
//!   nonce and body) with strictly increasing nonces
//! - Unsigned public queries and signed private queries over a pluggable
//!   [`Transport`](transport::Transport)
//! - Typed market data, account and trading endpoints
//! - Financial precision with `rust_decimal`
//! - Async API with a blocking facade
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_rest_client::rest::KrakenRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KrakenRestClient::new();
//!     let ticker = client.get_ticker("XBTUSD").await?;
//!     println!("Ticker: {:?}", ticker);
//!     Ok(())
//! }
//! ```
//!
//! Signing can also be used on its own:
//!
//! ```rust
//! use kraken_rest_client::auth::sign_request;
//!
//! let signature = sign_request(
//!     "c2VjcmV0",
//!     "/0/private/Balance",
//!     1_700_000_000_000_000,
//!     "nonce=1700000000000000",
//! )
//! .unwrap();
//! assert_eq!(signature.len(), 88);
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;
pub mod types;

// Re-export commonly used types at crate root
pub use error::KrakenError;
pub use rest::{BlockingRestClient, KrakenRestClient, KrakenRestClientBuilder};
pub use types::common::{BuySell, OhlcInterval, OrderStatus, OrderType};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
