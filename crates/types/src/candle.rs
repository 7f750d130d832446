/// One OHLCV record per exchange interval.
/// `open_time_ms` is the **open time** (not close time).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    /// Unix epoch milliseconds UTC (open time)
    pub open_time_ms: i64,
    /// Unix epoch milliseconds UTC (close time = open + interval - 1ms)
    pub close_time_ms: i64,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Base-asset volume
    pub volume: f64,
    /// Quote-asset volume
    pub quote_volume: f64,
    /// Number of trades in the interval
    pub trades: i64,
    /// Taker buy base-asset volume
    pub taker_buy_base_volume: f64,
    /// Taker buy quote-asset volume
    pub taker_buy_quote_volume: f64,
}

impl Candle {
    /// Typical price used by VWAP: (high + low + close) / 3.
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}
