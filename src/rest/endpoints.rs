//! Kraken REST API endpoint paths.
//!
//! Private paths are also the `path` input of the request signature, so they
//! must match what is sent on the wire byte for byte.

/// Base URL for the Kraken REST API.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Public endpoints (no authentication required).
pub mod public {
    pub const TIME: &str = "/0/public/Time";
    pub const SYSTEM_STATUS: &str = "/0/public/SystemStatus";
    pub const ASSETS: &str = "/0/public/Assets";
    pub const ASSET_PAIRS: &str = "/0/public/AssetPairs";
    pub const TICKER: &str = "/0/public/Ticker";
    pub const OHLC: &str = "/0/public/OHLC";
    /// Order book.
    pub const DEPTH: &str = "/0/public/Depth";
    /// Recent trades.
    pub const TRADES: &str = "/0/public/Trades";
    /// Recent spreads.
    pub const SPREAD: &str = "/0/public/Spread";
}

/// Private endpoints (authentication required).
pub mod private {
    // Account data
    pub const BALANCE: &str = "/0/private/Balance";
    pub const BALANCE_EX: &str = "/0/private/BalanceEx";
    pub const TRADE_BALANCE: &str = "/0/private/TradeBalance";
    pub const OPEN_ORDERS: &str = "/0/private/OpenOrders";
    pub const CLOSED_ORDERS: &str = "/0/private/ClosedOrders";
    pub const QUERY_ORDERS: &str = "/0/private/QueryOrders";
    pub const TRADES_HISTORY: &str = "/0/private/TradesHistory";
    pub const QUERY_TRADES: &str = "/0/private/QueryTrades";
    pub const OPEN_POSITIONS: &str = "/0/private/OpenPositions";
    pub const LEDGERS: &str = "/0/private/Ledgers";
    pub const QUERY_LEDGERS: &str = "/0/private/QueryLedgers";
    pub const TRADE_VOLUME: &str = "/0/private/TradeVolume";

    // Trading
    pub const ADD_ORDER: &str = "/0/private/AddOrder";
    pub const CANCEL_ORDER: &str = "/0/private/CancelOrder";
    pub const CANCEL_ALL: &str = "/0/private/CancelAll";
}
