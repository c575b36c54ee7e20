//! Kraken REST API access.
//!
//! Layered bottom-up:
//!
//! - [`QueryDispatcher`] builds unsigned GET requests for public endpoints and
//!   signed POST requests for private ones, sends them through a
//!   [`Transport`](crate::transport::Transport) and returns the raw body.
//! - [`decode_response`] turns a body into a typed result or an error.
//! - [`KrakenRestClient`] combines both into one method per endpoint.
//! - [`BlockingRestClient`] runs the async client for synchronous callers.
//!
//! ```rust,no_run
//! use kraken_rest_client::rest::{KrakenRestClient, public::OhlcRequest};
//! use kraken_rest_client::types::OhlcInterval;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kraken_rest_client::KrakenError> {
//!     let client = KrakenRestClient::new();
//!     let request = OhlcRequest::new("XBTUSD").interval(OhlcInterval::Hour4);
//!     let page = client.get_ohlc(&request).await?;
//!     for (pair, candles) in &page.data {
//!         println!("{pair}: {} candles, next since={}", candles.len(), page.last);
//!     }
//!     Ok(())
//! }
//! ```

pub mod blocking;
mod client;
pub mod dispatcher;
pub mod endpoints;
pub mod private;
pub mod public;
pub mod response;

pub use blocking::BlockingRestClient;
pub use client::{KrakenRestClient, KrakenRestClientBuilder};
pub use dispatcher::QueryDispatcher;
pub use endpoints::KRAKEN_BASE_URL;
pub use response::decode_response;
