//! Request and response types for public market data endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::types::{OhlcInterval, Paginated};

/// Result of `Time`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// Seconds since the Unix epoch.
    pub unixtime: i64,
    /// The same instant formatted per RFC 1123.
    pub rfc1123: String,
}

impl ServerTime {
    /// The server time as a UTC timestamp.
    pub fn datetime(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.unixtime).ok()
    }

    /// Difference between `local` and the server clock, in seconds.
    ///
    /// Positive when the local clock is ahead.
    pub fn skew_seconds(&self, local: OffsetDateTime) -> i64 {
        local.unix_timestamp() - self.unixtime
    }
}

/// Result of `SystemStatus`.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    /// One of `online`, `maintenance`, `cancel_only` or `post_only`.
    pub status: String,
    /// RFC 3339 timestamp of the status report.
    pub timestamp: String,
}

impl SystemStatus {
    /// Whether the exchange accepts new orders.
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// Filters for `Assets`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetInfoRequest {
    /// Comma-separated asset names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Asset class, `currency` by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
}

impl AssetInfoRequest {
    /// Restrict the result to the given comma-separated assets.
    pub fn for_assets(assets: impl Into<String>) -> Self {
        Self {
            asset: Some(assets.into()),
            ..Self::default()
        }
    }
}

/// One entry of the `Assets` result.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    pub aclass: String,
    pub altname: String,
    /// Decimal places used for record keeping.
    pub decimals: u8,
    /// Decimal places used for display.
    pub display_decimals: u8,
    #[serde(default)]
    pub collateral_value: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Filters for `AssetPairs`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPairsRequest {
    /// Comma-separated pair names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// One of `info`, `leverage`, `fees` or `margin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl AssetPairsRequest {
    /// Restrict the result to the given comma-separated pairs.
    pub fn for_pairs(pairs: impl Into<String>) -> Self {
        Self {
            pair: Some(pairs.into()),
            ..Self::default()
        }
    }
}

/// One entry of the `AssetPairs` result.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPair {
    pub altname: String,
    #[serde(default)]
    pub wsname: Option<String>,
    pub aclass_base: String,
    pub base: String,
    pub aclass_quote: String,
    pub quote: String,
    pub cost_decimals: u8,
    pub pair_decimals: u8,
    pub lot_decimals: u8,
    pub lot_multiplier: u32,
    #[serde(default)]
    pub leverage_buy: Vec<u32>,
    #[serde(default)]
    pub leverage_sell: Vec<u32>,
    /// Taker fee tiers as `(30-day volume, percent fee)`.
    #[serde(default)]
    pub fees: Vec<(u64, Decimal)>,
    /// Maker fee tiers as `(30-day volume, percent fee)`.
    #[serde(default)]
    pub fees_maker: Vec<(u64, Decimal)>,
    /// Minimum order volume in the base asset.
    #[serde(default)]
    pub ordermin: Option<Decimal>,
    /// Minimum order cost in the quote asset.
    #[serde(default)]
    pub costmin: Option<Decimal>,
    #[serde(default)]
    pub tick_size: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One entry of the `Ticker` result.
///
/// Field names follow the single-letter keys of the wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Ask: price, whole lot volume, lot volume.
    pub a: Vec<Decimal>,
    /// Bid: price, whole lot volume, lot volume.
    pub b: Vec<Decimal>,
    /// Last trade closed: price, lot volume.
    pub c: Vec<Decimal>,
    /// Volume: today, last 24 hours.
    pub v: Vec<Decimal>,
    /// Volume weighted average price: today, last 24 hours.
    pub p: Vec<Decimal>,
    /// Number of trades: today, last 24 hours.
    pub t: Vec<u64>,
    /// Low: today, last 24 hours.
    pub l: Vec<Decimal>,
    /// High: today, last 24 hours.
    pub h: Vec<Decimal>,
    /// Opening price of the day.
    pub o: Decimal,
}

impl TickerInfo {
    pub fn ask_price(&self) -> Option<Decimal> {
        self.a.first().copied()
    }

    pub fn bid_price(&self) -> Option<Decimal> {
        self.b.first().copied()
    }

    pub fn last_price(&self) -> Option<Decimal> {
        self.c.first().copied()
    }

    /// Ask minus bid, when both sides are present.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask_price()? - self.bid_price()?)
    }

    /// Volume over the last 24 hours.
    pub fn volume_24h(&self) -> Option<Decimal> {
        self.v.get(1).copied()
    }
}

/// Parameters for `OHLC`.
#[derive(Debug, Clone, Serialize)]
pub struct OhlcRequest {
    pub pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<OhlcInterval>,
    /// Only return candles after this cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

impl OhlcRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            interval: None,
            since: None,
        }
    }

    pub fn interval(mut self, interval: OhlcInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

/// Candles keyed by pair, with the cursor for the next page.
pub type OhlcResponse = Paginated<Vec<OhlcEntry>>;

/// A single candle, sent as `[time, open, high, low, close, vwap, volume, count]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcEntry {
    /// Start of the candle, in seconds since the epoch.
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub vwap: Decimal,
    pub volume: Decimal,
    /// Number of trades in the candle.
    pub count: u64,
}

impl<'de> Deserialize<'de> for OhlcEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (time, open, high, low, close, vwap, volume, count) =
            <(i64, Decimal, Decimal, Decimal, Decimal, Decimal, Decimal, u64)>::deserialize(
                deserializer,
            )?;
        Ok(Self {
            time,
            open,
            high,
            low,
            close,
            vwap,
            volume,
            count,
        })
    }
}

/// Parameters for `Depth`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBookRequest {
    pub pair: String,
    /// Levels per side, at most 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u16>,
}

impl OrderBookRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: None,
        }
    }

    /// Set the depth, clamped to the exchange maximum of 500.
    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count.min(500));
        self
    }
}

/// One side-by-side snapshot from `Depth`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<OrderBookLevel>,
    pub bids: Vec<OrderBookLevel>,
}

impl OrderBook {
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }
}

/// A price level, sent as `[price, volume, timestamp]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookLevel {
    pub price: Decimal,
    pub volume: Decimal,
    pub timestamp: i64,
}

impl<'de> Deserialize<'de> for OrderBookLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (price, volume, timestamp) = <(Decimal, Decimal, i64)>::deserialize(deserializer)?;
        Ok(Self {
            price,
            volume,
            timestamp,
        })
    }
}

/// Parameters for `Trades`.
#[derive(Debug, Clone, Serialize)]
pub struct RecentTradesRequest {
    pub pair: String,
    /// Cursor from a previous response's `last`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u16>,
}

impl RecentTradesRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
            count: None,
        }
    }

    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count);
        self
    }
}

/// Trades keyed by pair, with the cursor for the next page.
pub type RecentTradesResponse = Paginated<Vec<PublicTrade>>;

/// A public trade, sent as
/// `[price, volume, time, side, order type, misc, trade id]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicTrade {
    pub price: Decimal,
    pub volume: Decimal,
    /// Seconds since the epoch with sub-second precision.
    pub time: Decimal,
    /// `b` for buy, `s` for sell.
    pub side: String,
    /// `m` for market, `l` for limit.
    pub order_type: String,
    pub misc: String,
    pub trade_id: i64,
}

impl PublicTrade {
    pub fn is_buy(&self) -> bool {
        self.side == "b"
    }
}

impl<'de> Deserialize<'de> for PublicTrade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (price, volume, time, side, order_type, misc, trade_id) =
            <(Decimal, Decimal, Decimal, String, String, String, i64)>::deserialize(deserializer)?;
        Ok(Self {
            price,
            volume,
            time,
            side,
            order_type,
            misc,
            trade_id,
        })
    }
}

/// Parameters for `Spread`.
#[derive(Debug, Clone, Serialize)]
pub struct RecentSpreadsRequest {
    pub pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

impl RecentSpreadsRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
        }
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

/// Spreads keyed by pair, with the cursor for the next page.
pub type RecentSpreadsResponse = Paginated<Vec<SpreadEntry>>;

/// Best bid and ask at a point in time, sent as `[time, bid, ask]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadEntry {
    pub time: i64,
    pub bid: Decimal,
    pub ask: Decimal,
}

impl<'de> Deserialize<'de> for SpreadEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (time, bid, ask) = <(i64, Decimal, Decimal)>::deserialize(deserializer)?;
        Ok(Self { time, bid, ask })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_server_time_datetime() {
        let server_time: ServerTime = serde_json::from_str(
            r#"{"unixtime":1700000000,"rfc1123":"Tue, 14 Nov 23 22:13:20 +0000"}"#,
        )
        .unwrap();
        let datetime = server_time.datetime().unwrap();
        assert_eq!(datetime.year(), 2023);
        assert_eq!(u8::from(datetime.month()), 11);
        assert_eq!(datetime.day(), 14);
        assert_eq!(server_time.skew_seconds(datetime + time::Duration::seconds(3)), 3);
    }

    #[test]
    fn test_ticker_accessors() {
        let json = r#"{
            "a": ["30300.10000", "1", "1.000"],
            "b": ["30300.00000", "1", "1.000"],
            "c": ["30303.20000", "0.00067643"],
            "v": ["4083.67001100", "4412.73601799"],
            "p": ["30706.77771", "30689.13205"],
            "t": [34619, 38907],
            "l": ["29868.30000", "29868.30000"],
            "h": ["31631.00000", "31631.00000"],
            "o": "30502.80000"
        }"#;
        let ticker: TickerInfo = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.ask_price(), Some(dec("30300.1")));
        assert_eq!(ticker.spread(), Some(dec("0.1")));
        assert_eq!(ticker.volume_24h(), Some(dec("4412.73601799")));
        assert_eq!(ticker.t, vec![34619, 38907]);
    }

    #[test]
    fn test_ohlc_page() {
        let json = r#"{
            "XXBTZUSD": [
                [1688671200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896", 23]
            ],
            "last": 1688672160
        }"#;
        let page: OhlcResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.last, "1688672160");
        let candle = &page.pair("XXBTZUSD").unwrap()[0];
        assert_eq!(candle.time, 1_688_671_200);
        assert_eq!(candle.volume, dec("3.39243896"));
        assert_eq!(candle.count, 23);
    }

    #[test]
    fn test_recent_trades_page() {
        let json = r#"{
            "XXBTZUSD": [
                ["30243.40000", "0.34507674", 1688669597.8277369, "b", "m", "", 60696397]
            ],
            "last": "1688671969993150842"
        }"#;
        let page: RecentTradesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.last, "1688671969993150842");
        let trade = &page.pair("XXBTZUSD").unwrap()[0];
        assert!(trade.is_buy());
        assert_eq!(trade.price, dec("30243.4"));
        assert_eq!(trade.time, dec("1688669597.8277369"));
        assert_eq!(trade.trade_id, 60_696_397);
    }

    #[test]
    fn test_order_book_levels() {
        let json = r#"{
            "asks": [["30384.10000", "2.059", 1688671659]],
            "bids": [["30297.00000", "0.115", 1688671656]]
        }"#;
        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.best_ask().unwrap().price, dec("30384.1"));
        assert_eq!(book.best_bid().unwrap().timestamp, 1_688_671_656);
    }

    #[test]
    fn test_request_encoding() {
        let ohlc = OhlcRequest::new("XBTUSD").interval(OhlcInterval::Hour1).since(1);
        assert_eq!(
            serde_urlencoded::to_string(&ohlc).unwrap(),
            "pair=XBTUSD&interval=60&since=1"
        );

        let depth = OrderBookRequest::new("XBTUSD").count(1000);
        assert_eq!(
            serde_urlencoded::to_string(&depth).unwrap(),
            "pair=XBTUSD&count=500"
        );

        assert_eq!(
            serde_urlencoded::to_string(&AssetInfoRequest::default()).unwrap(),
            ""
        );
    }
}
