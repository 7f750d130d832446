//! Canonical feature-frame column names.
//!
//! Indicator column names keep the original pipeline's spelling so the
//! processed parquet partitions stay drop-in compatible with the model
//! training code.

/// Candle open time, ms epoch (Int64).
pub const OPEN_TIME: &str = "open_time";
/// Candle close time, ms epoch (Int64).
pub const CLOSE_TIME: &str = "close_time";
/// Open price.
pub const OPEN: &str = "open";
/// High price.
pub const HIGH: &str = "high";
/// Low price.
pub const LOW: &str = "low";
/// Close price.
pub const CLOSE: &str = "close";
/// Base-asset volume.
pub const VOLUME: &str = "volume";
/// Quote-asset volume.
pub const QUOTE_VOLUME: &str = "quote_volume";
/// Trade count (Int64).
pub const TRADES: &str = "trades";
/// Taker buy base-asset volume.
pub const TAKER_BUY_BASE_VOLUME: &str = "taker_buy_base_volume";
/// Taker buy quote-asset volume.
pub const TAKER_BUY_QUOTE_VOLUME: &str = "taker_buy_quote_volume";

/// Exponential moving average of close.
pub const EMA: &str = "EMA";
/// Simple moving average of close.
pub const SMA: &str = "SMA";
/// Volume-weighted average price.
pub const VWAP: &str = "VWAP";
/// Relative strength index.
pub const RSI: &str = "RSI";
/// Donchian lower band.
pub const DC_DOWN: &str = "DCdown";
/// Donchian upper band.
pub const DC_UP: &str = "DCup";
/// Donchian mid band.
pub const DC_MID: &str = "DCmid";
/// Bollinger basis band.
pub const BOLLINGER_BASIS: &str = "BollingerBasis";
/// Bollinger upper band.
pub const BOLLINGER_UPPER: &str = "BollingerUpper";
/// Bollinger lower band.
pub const BOLLINGER_LOWER: &str = "BollingerLower";
/// Upper candle shadow.
pub const UPPER_SHADOW: &str = "UpperShadow";
/// Lower candle shadow.
pub const LOWER_SHADOW: &str = "LowerShadow";
/// Next row's close price (regression target).
pub const TARGET: &str = "target";

/// Past-trend score column name for window `w`.
#[must_use]
pub fn past_trend(w: usize) -> String {
    format!("Past_trend_Open_{w}h")
}

/// Future-trend score column name for window `w`.
#[must_use]
pub fn future_trend(w: usize) -> String {
    format!("Future_trend_Open_{w}h")
}

/// Binary-flag column name derived from a trend score column.
#[must_use]
pub fn flag(score_column: &str) -> String {
    format!("{score_column}_flag")
}
