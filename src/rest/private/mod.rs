//! Private REST API endpoints (authentication required).
//!
//! Every call here is signed with the client's credentials and fails with
//! [`KrakenError::MissingCredentials`] before any network traffic when none
//! are configured.

mod types;

pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::KrakenError;
use crate::rest::KrakenRestClient;
use crate::rest::endpoints::private;
use crate::transport::Transport;

impl<T: Transport> KrakenRestClient<T> {
    /// Get the balance of every asset in the account.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::rest::KrakenRestClient;
    /// use kraken_rest_client::auth::StaticCredentials;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "c2VjcmV0"));
    ///     let client = KrakenRestClient::builder().credentials(credentials).build();
    ///
    ///     for (asset, balance) in client.get_account_balance().await? {
    ///         println!("{asset}: {balance}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_account_balance(&self) -> Result<HashMap<String, Decimal>, KrakenError> {
        self.private_post(private::BALANCE, &()).await
    }

    /// Get balances together with the amounts held by open orders.
    pub async fn get_extended_balance(&self) -> Result<ExtendedBalances, KrakenError> {
        self.private_post(private::BALANCE_EX, &()).await
    }

    /// Get the margin summary of the account.
    pub async fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<TradeBalance, KrakenError> {
        self.private_post(private::TRADE_BALANCE, &request).await
    }

    pub async fn get_open_orders(
        &self,
        request: Option<&OpenOrdersRequest>,
    ) -> Result<OpenOrders, KrakenError> {
        self.private_post(private::OPEN_ORDERS, &request).await
    }

    /// Get closed orders, 50 per page. Use `ofs` to page through the rest.
    pub async fn get_closed_orders(
        &self,
        request: Option<&ClosedOrdersRequest>,
    ) -> Result<ClosedOrders, KrakenError> {
        self.private_post(private::CLOSED_ORDERS, &request).await
    }

    /// Look up orders by transaction id.
    pub async fn query_orders(
        &self,
        request: &QueryOrdersRequest,
    ) -> Result<HashMap<String, Order>, KrakenError> {
        self.private_post(private::QUERY_ORDERS, request).await
    }

    /// Get the account's fills, 50 per page.
    pub async fn get_trades_history(
        &self,
        request: Option<&TradesHistoryRequest>,
    ) -> Result<TradesHistory, KrakenError> {
        self.private_post(private::TRADES_HISTORY, &request).await
    }

    /// Look up fills by trade id.
    pub async fn query_trades(
        &self,
        request: &QueryTradesRequest,
    ) -> Result<HashMap<String, Trade>, KrakenError> {
        self.private_post(private::QUERY_TRADES, request).await
    }

    pub async fn get_open_positions(
        &self,
        request: Option<&OpenPositionsRequest>,
    ) -> Result<HashMap<String, Position>, KrakenError> {
        self.private_post(private::OPEN_POSITIONS, &request).await
    }

    /// Get ledger entries, 50 per page.
    pub async fn get_ledgers(
        &self,
        request: Option<&LedgersRequest>,
    ) -> Result<LedgersInfo, KrakenError> {
        self.private_post(private::LEDGERS, &request).await
    }

    /// Look up ledger entries by id.
    pub async fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> Result<HashMap<String, LedgerEntry>, KrakenError> {
        self.private_post(private::QUERY_LEDGERS, request).await
    }

    /// Get the 30-day volume and, for requested pairs, the fee tier.
    pub async fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<TradeVolume, KrakenError> {
        self.private_post(private::TRADE_VOLUME, &request).await
    }

    /// Place an order, or only validate it when `validate` is set.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest_client::rest::{KrakenRestClient, private::AddOrderRequest};
    /// use kraken_rest_client::auth::EnvCredentials;
    /// use kraken_rest_client::BuySell;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()?))
    ///         .build();
    ///
    ///     let request = AddOrderRequest::limit(
    ///         "XBTUSD",
    ///         BuySell::Buy,
    ///         Decimal::from_str("0.001")?,
    ///         Decimal::from_str("50000")?,
    ///     )
    ///     .validate(true);
    ///
    ///     let result = client.add_order(&request).await?;
    ///     println!("{}", result.descr.order);
    ///     Ok(())
    /// }
    /// ```
    pub async fn add_order(&self, request: &AddOrderRequest) -> Result<AddOrderResponse, KrakenError> {
        self.private_post(private::ADD_ORDER, request).await
    }

    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<CancelOrderResponse, KrakenError> {
        self.private_post(private::CANCEL_ORDER, request).await
    }

    /// Cancel every open order of the account.
    pub async fn cancel_all_orders(&self) -> Result<CancelOrderResponse, KrakenError> {
        self.private_post(private::CANCEL_ALL, &()).await
    }
}
