//! Request and response types for private account and trading endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BuySell, LedgerType, OrderStatus, OrderType};

/// Result of `BalanceEx`, keyed by asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ExtendedBalances {
    pub balances: HashMap<String, ExtendedBalance>,
}

impl ExtendedBalances {
    pub fn get(&self, asset: &str) -> Option<&ExtendedBalance> {
        self.balances.get(asset)
    }
}

/// Balance of a single asset including funds held by open orders.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedBalance {
    pub balance: Decimal,
    #[serde(default)]
    pub credit: Option<Decimal>,
    #[serde(default)]
    pub credit_used: Option<Decimal>,
    /// Amount reserved by open orders.
    #[serde(default)]
    pub hold_trade: Option<Decimal>,
}

impl ExtendedBalance {
    /// Balance not reserved by open orders.
    pub fn available(&self) -> Decimal {
        self.balance - self.hold_trade.unwrap_or_default()
    }
}

/// Parameters for `TradeBalance`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeBalanceRequest {
    /// Asset the balance is expressed in, `ZUSD` by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

/// Result of `TradeBalance`.
///
/// Kraken abbreviates the field names; the Rust names spell them out.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    #[serde(rename = "eb")]
    pub equivalent_balance: Decimal,
    #[serde(rename = "tb")]
    pub trade_balance: Decimal,
    #[serde(rename = "m", default)]
    pub margin: Decimal,
    #[serde(rename = "n", default)]
    pub unrealized_pnl: Decimal,
    #[serde(rename = "c", default)]
    pub cost_basis: Decimal,
    #[serde(rename = "v", default)]
    pub floating_valuation: Decimal,
    /// Trade balance plus unrealized profit and loss.
    #[serde(rename = "e")]
    pub equity: Decimal,
    #[serde(rename = "mf")]
    pub free_margin: Decimal,
    /// Equity over initial margin, in percent. Absent without open positions.
    #[serde(rename = "ml", default)]
    pub margin_level: Option<Decimal>,
    #[serde(rename = "uv", default)]
    pub unexecuted_value: Option<Decimal>,
}

/// Parameters for `OpenOrders`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersRequest {
    /// Include the ids of related trades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
}

/// Result of `OpenOrders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrders {
    /// Orders keyed by transaction id.
    pub open: HashMap<String, Order>,
}

/// Parameters for `ClosedOrders`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClosedOrdersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Unix timestamp or order transaction id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Unix timestamp or order transaction id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Offset into the result set, for paging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
    /// One of `open`, `close` or `both`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closetime: Option<String>,
}

/// Result of `ClosedOrders`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrders {
    pub closed: HashMap<String, Order>,
    /// Total number of matching orders, across all pages.
    pub count: u32,
}

/// Parameters for `QueryOrders`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOrdersRequest {
    /// Comma-separated transaction ids, at most 50.
    pub txid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
}

impl QueryOrdersRequest {
    pub fn new(txids: impl Into<String>) -> Self {
        Self {
            txid: txids.into(),
            trades: None,
            userref: None,
        }
    }

    /// Query several orders at once.
    pub fn for_ids<I, S>(txids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = txids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::new(joined)
    }

    pub fn with_trades(mut self) -> Self {
        self.trades = Some(true);
        self
    }
}

/// An order as reported by `OpenOrders`, `ClosedOrders` and `QueryOrders`.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Referral order transaction id that created this order.
    #[serde(default)]
    pub refid: Option<String>,
    #[serde(default)]
    pub userref: Option<i64>,
    pub status: OrderStatus,
    pub opentm: f64,
    #[serde(default)]
    pub starttm: Option<f64>,
    #[serde(default)]
    pub expiretm: Option<f64>,
    #[serde(default)]
    pub closetm: Option<f64>,
    pub descr: OrderDescription,
    pub vol: Decimal,
    pub vol_exec: Decimal,
    /// Total cost in quote currency.
    pub cost: Decimal,
    pub fee: Decimal,
    /// Average execution price.
    pub price: Decimal,
    #[serde(default)]
    pub stopprice: Option<Decimal>,
    #[serde(default)]
    pub limitprice: Option<Decimal>,
    /// Comma-separated flags such as `stopped` or `touched`.
    #[serde(default)]
    pub misc: String,
    /// Comma-separated order flags such as `post` or `fciq`.
    #[serde(default)]
    pub oflags: String,
    #[serde(default)]
    pub trades: Vec<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Open)
    }

    /// Volume not yet executed.
    pub fn remaining_volume(&self) -> Decimal {
        self.vol - self.vol_exec
    }
}

/// Order parameters echoed back by the exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub price: Decimal,
    pub price2: Decimal,
    pub leverage: String,
    /// Human readable summary, e.g. `buy 1.25 XBTUSD @ limit 30000.0`.
    pub order: String,
    #[serde(default)]
    pub close: Option<String>,
}

/// Parameters for `TradesHistory`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesHistoryRequest {
    /// `all`, `any position`, `closed position`, `closing position` or `no position`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
}

/// Result of `TradesHistory`.
#[derive(Debug, Clone, Deserialize)]
pub struct TradesHistory {
    /// Trades keyed by trade id.
    pub trades: HashMap<String, Trade>,
    pub count: u32,
}

/// Parameters for `QueryTrades`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryTradesRequest {
    /// Comma-separated trade ids, at most 20.
    pub txid: String,
    /// Include the trades belonging to related positions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
}

impl QueryTradesRequest {
    pub fn new(txids: impl Into<String>) -> Self {
        Self {
            txid: txids.into(),
            trades: None,
        }
    }
}

/// A fill of one of the account's orders.
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub ordertxid: String,
    #[serde(default)]
    pub postxid: Option<String>,
    pub pair: String,
    pub time: f64,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub price: Decimal,
    pub cost: Decimal,
    pub fee: Decimal,
    pub vol: Decimal,
    #[serde(default)]
    pub margin: Option<Decimal>,
    #[serde(default)]
    pub misc: String,
    /// Whether the trade was the maker side.
    #[serde(default)]
    pub maker: Option<bool>,
}

/// Parameters for `OpenPositions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenPositionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Include profit and loss calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docalcs: Option<bool>,
}

/// An open margin position.
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub ordertxid: String,
    pub posstatus: String,
    pub pair: String,
    pub time: f64,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub cost: Decimal,
    pub fee: Decimal,
    pub vol: Decimal,
    pub vol_closed: Decimal,
    pub margin: Decimal,
    /// Current value, only present with `docalcs`.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Unrealized profit and loss, only present with `docalcs`.
    #[serde(default)]
    pub net: Option<Decimal>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub rollovertm: Option<String>,
    #[serde(default)]
    pub misc: String,
    #[serde(default)]
    pub oflags: String,
}

/// Parameters for `Ledgers`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgersRequest {
    /// Comma-separated assets, `all` by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ledger_type: Option<LedgerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
    /// Skip the count to speed up the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub without_count: Option<bool>,
}

/// Result of `Ledgers`.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgersInfo {
    /// Entries keyed by ledger id.
    pub ledger: HashMap<String, LedgerEntry>,
    /// Absent when `without_count` was set.
    #[serde(default)]
    pub count: Option<u32>,
}

/// Parameters for `QueryLedgers`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLedgersRequest {
    /// Comma-separated ledger ids, at most 20.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
}

impl QueryLedgersRequest {
    pub fn new(ids: impl Into<String>) -> Self {
        Self {
            id: ids.into(),
            trades: None,
        }
    }
}

/// A single movement of funds.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    pub refid: String,
    pub time: f64,
    #[serde(rename = "type")]
    pub ledger_type: LedgerType,
    #[serde(default)]
    pub subtype: Option<String>,
    pub aclass: String,
    pub asset: String,
    /// Signed change of the balance.
    pub amount: Decimal,
    pub fee: Decimal,
    /// Balance after the movement.
    pub balance: Decimal,
}

/// Parameters for `TradeVolume`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeVolumeRequest {
    /// Comma-separated pairs to include fee tiers for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}

/// Result of `TradeVolume`.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    pub currency: String,
    /// 30-day volume in `currency`.
    pub volume: Decimal,
    /// Taker fees keyed by pair.
    #[serde(default)]
    pub fees: HashMap<String, FeeInfo>,
    /// Maker fees keyed by pair.
    #[serde(default)]
    pub fees_maker: HashMap<String, FeeInfo>,
}

/// Fee tier of a pair.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeInfo {
    /// Current fee, in percent.
    pub fee: Decimal,
    #[serde(default)]
    pub minfee: Option<Decimal>,
    #[serde(default)]
    pub maxfee: Option<Decimal>,
    /// Fee at the next tier. Absent at the lowest tier.
    #[serde(default)]
    pub nextfee: Option<Decimal>,
    #[serde(default)]
    pub nextvolume: Option<Decimal>,
    #[serde(default)]
    pub tiervolume: Option<Decimal>,
}

/// Parameters for `AddOrder`.
///
/// ```rust
/// use kraken_rest_client::rest::private::AddOrderRequest;
/// use kraken_rest_client::{BuySell, OrderType};
/// use rust_decimal::Decimal;
///
/// let order = AddOrderRequest::new("XBTUSD", BuySell::Buy, OrderType::Limit, Decimal::new(125, 2))
///     .price(Decimal::new(30000, 0))
///     .validate(true);
///
/// let encoded = serde_urlencoded::to_string(&order).unwrap();
/// assert_eq!(
///     encoded,
///     "pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=30000&validate=true"
/// );
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AddOrderRequest {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub volume: Decimal,
    /// Visible volume of an iceberg order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayvol: Option<Decimal>,
    /// Limit price, or trigger price for stop and take-profit orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Limit price of stop-limit and take-profit-limit orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price2: Option<Decimal>,
    /// `last` or `index`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    /// Self trade prevention: `cancel-newest`, `cancel-oldest` or `cancel-both`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stptype: Option<String>,
    /// Comma-separated order flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oflags: Option<String>,
    /// `GTC`, `IOC` or `GTD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeinforce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starttm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiretm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Validate the order without placing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
    #[serde(rename = "close[ordertype]", skip_serializing_if = "Option::is_none")]
    pub close_ordertype: Option<OrderType>,
    #[serde(rename = "close[price]", skip_serializing_if = "Option::is_none")]
    pub close_price: Option<Decimal>,
    #[serde(rename = "close[price2]", skip_serializing_if = "Option::is_none")]
    pub close_price2: Option<Decimal>,
}

impl AddOrderRequest {
    pub fn new(pair: impl Into<String>, side: BuySell, ordertype: OrderType, volume: Decimal) -> Self {
        Self {
            pair: pair.into(),
            side,
            ordertype,
            volume,
            displayvol: None,
            price: None,
            price2: None,
            trigger: None,
            leverage: None,
            reduce_only: None,
            stptype: None,
            oflags: None,
            timeinforce: None,
            starttm: None,
            expiretm: None,
            userref: None,
            validate: None,
            close_ordertype: None,
            close_price: None,
            close_price2: None,
        }
    }

    /// A market order.
    pub fn market(pair: impl Into<String>, side: BuySell, volume: Decimal) -> Self {
        Self::new(pair, side, OrderType::Market, volume)
    }

    /// A limit order at `price`.
    pub fn limit(pair: impl Into<String>, side: BuySell, volume: Decimal, price: Decimal) -> Self {
        Self::new(pair, side, OrderType::Limit, volume).price(price)
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn price2(mut self, price2: Decimal) -> Self {
        self.price2 = Some(price2);
        self
    }

    pub fn leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn userref(mut self, userref: i64) -> Self {
        self.userref = Some(userref);
        self
    }

    pub fn oflags(mut self, flags: impl Into<String>) -> Self {
        self.oflags = Some(flags.into());
        self
    }

    /// Reject the order if it would take liquidity.
    pub fn post_only(self) -> Self {
        self.oflags("post")
    }

    pub fn time_in_force(mut self, tif: impl Into<String>) -> Self {
        self.timeinforce = Some(tif.into());
        self
    }

    /// Attach a conditional close order.
    pub fn close(mut self, ordertype: OrderType, price: Decimal, price2: Option<Decimal>) -> Self {
        self.close_ordertype = Some(ordertype);
        self.close_price = Some(price);
        self.close_price2 = price2;
        self
    }
}

/// Result of `AddOrder`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderResponse {
    pub descr: AddOrderDescription,
    /// Transaction ids of the placed order. Empty for validate-only requests.
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Summary of a placed or validated order.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderDescription {
    pub order: String,
    #[serde(default)]
    pub close: Option<String>,
}

/// Parameters for `CancelOrder`.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Transaction id, user reference or client order id.
    pub txid: String,
}

impl CancelOrderRequest {
    pub fn new(txid: impl Into<String>) -> Self {
        Self { txid: txid.into() }
    }
}

/// Result of `CancelOrder` and `CancelAll`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    /// Number of orders canceled.
    pub count: u32,
    #[serde(default)]
    pub pending: Option<bool>,
}
