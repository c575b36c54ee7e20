//! Common domain types for Kraken API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for BuySell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuySell::Buy => write!(f, "buy"),
            BuySell::Sell => write!(f, "sell"),
        }
    }
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Execute immediately at the best available price
    Market,
    /// Execute at the given price or better
    Limit,
    /// Market order triggered at the stop price
    StopLoss,
    /// Market order triggered at the profit target
    TakeProfit,
    /// Limit order triggered at the stop price
    StopLossLimit,
    /// Limit order triggered at the profit target
    TakeProfitLimit,
    TrailingStop,
    TrailingStopLimit,
    /// Close a margin position
    SettlePosition,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::StopLoss => "stop-loss",
            OrderType::TakeProfit => "take-profit",
            OrderType::StopLossLimit => "stop-loss-limit",
            OrderType::TakeProfitLimit => "take-profit-limit",
            OrderType::TrailingStop => "trailing-stop",
            OrderType::TrailingStopLimit => "trailing-stop-limit",
            OrderType::SettlePosition => "settle-position",
        };
        f.write_str(s)
    }
}

/// Status of an order as reported by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order pending book entry
    Pending,
    /// Open order
    Open,
    /// Closed order
    Closed,
    /// Order canceled
    Canceled,
    /// Order expired
    Expired,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// Ledger entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerType {
    Trade,
    Deposit,
    Withdrawal,
    Transfer,
    Margin,
    Adjustment,
    Rollover,
    Credit,
    Settled,
    Staking,
    Dividend,
    Sale,
    #[serde(rename = "nft")]
    Nft,
    /// Any type this client does not know about yet.
    #[serde(other)]
    Other,
}

/// Candle width accepted by the OHLC endpoint.
///
/// Serializes to the number of minutes Kraken expects in the `interval`
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum OhlcInterval {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
    Week1,
    Day15,
}

impl OhlcInterval {
    /// Every interval the exchange supports, shortest first.
    pub const ALL: [OhlcInterval; 9] = [
        OhlcInterval::Min1,
        OhlcInterval::Min5,
        OhlcInterval::Min15,
        OhlcInterval::Min30,
        OhlcInterval::Hour1,
        OhlcInterval::Hour4,
        OhlcInterval::Day1,
        OhlcInterval::Week1,
        OhlcInterval::Day15,
    ];

    /// Interval length in minutes.
    pub const fn minutes(self) -> u32 {
        match self {
            OhlcInterval::Min1 => 1,
            OhlcInterval::Min5 => 5,
            OhlcInterval::Min15 => 15,
            OhlcInterval::Min30 => 30,
            OhlcInterval::Hour1 => 60,
            OhlcInterval::Hour4 => 240,
            OhlcInterval::Day1 => 1440,
            OhlcInterval::Week1 => 10080,
            OhlcInterval::Day15 => 21600,
        }
    }

    /// Interval length in seconds, matching the spacing of OHLC timestamps.
    pub const fn seconds(self) -> i64 {
        self.minutes() as i64 * 60
    }
}

impl From<OhlcInterval> for u32 {
    fn from(interval: OhlcInterval) -> u32 {
        interval.minutes()
    }
}

impl TryFrom<u32> for OhlcInterval {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        OhlcInterval::ALL
            .into_iter()
            .find(|interval| interval.minutes() == value)
            .ok_or_else(|| format!("Invalid OHLC interval: {value}"))
    }
}

impl std::fmt::Display for OhlcInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.minutes())
    }
}
