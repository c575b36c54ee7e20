//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::KrakenError;
use crate::rest::KrakenRestClient;
use crate::rest::endpoints::public;
use crate::transport::Transport;

impl<T: Transport> KrakenRestClient<T> {
    /// Get the server time.
    ///
    /// Useful to check reachability and to compare the local clock against
    /// the exchange.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::rest::KrakenRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::new();
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {} ({})", time.unixtime, time.rfc1123);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ServerTime, KrakenError> {
        self.public_get(public::TIME, &()).await
    }

    /// Get the exchange status.
    pub async fn get_system_status(&self) -> Result<SystemStatus, KrakenError> {
        self.public_get(public::SYSTEM_STATUS, &()).await
    }

    /// Get asset information, optionally filtered.
    pub async fn get_assets(
        &self,
        request: Option<&AssetInfoRequest>,
    ) -> Result<HashMap<String, AssetInfo>, KrakenError> {
        self.public_get(public::ASSETS, &request).await
    }

    /// Get tradable asset pairs, optionally filtered.
    pub async fn get_asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> Result<HashMap<String, AssetPair>, KrakenError> {
        self.public_get(public::ASSET_PAIRS, &request).await
    }

    /// Get ticker information for a comma-separated list of pairs
    /// (e.g. `"XBTUSD,ETHUSD"`).
    pub async fn get_ticker(&self, pairs: &str) -> Result<HashMap<String, TickerInfo>, KrakenError> {
        self.public_get(public::TICKER, &[("pair", pairs)]).await
    }

    /// Get candles for a pair. At most 720 entries are returned per call.
    pub async fn get_ohlc(&self, request: &OhlcRequest) -> Result<OhlcResponse, KrakenError> {
        self.public_get(public::OHLC, request).await
    }

    /// Get the order book for a pair.
    pub async fn get_order_book(
        &self,
        request: &OrderBookRequest,
    ) -> Result<HashMap<String, OrderBook>, KrakenError> {
        self.public_get(public::DEPTH, request).await
    }

    /// Get recent trades for a pair.
    pub async fn get_recent_trades(
        &self,
        request: &RecentTradesRequest,
    ) -> Result<RecentTradesResponse, KrakenError> {
        self.public_get(public::TRADES, request).await
    }

    /// Get recent best bid/ask spreads for a pair.
    pub async fn get_recent_spreads(
        &self,
        request: &RecentSpreadsRequest,
    ) -> Result<RecentSpreadsResponse, KrakenError> {
        self.public_get(public::SPREAD, request).await
    }
}
