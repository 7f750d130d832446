//! Binance spot klines client.
//!
//! Fetches `/api/v3/klines` in pages of up to 1000 rows and converts
//! the mixed-type JSON rows into [`Candle`] values. Each page request
//! is retried a bounded number of times before the fetch fails.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use candlemill_types::Candle;

use crate::error::IngestError;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const KLINES_PATH: &str = "/api/v3/klines";
const PAGE_LIMIT: usize = 1000;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Blocking client for the Binance spot REST API.
#[derive(Debug)]
pub struct BinanceClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::blocking::Client,
}

impl BinanceClient {
    /// Creates a client against the public Binance endpoint.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a client against a custom base URL (test servers).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Fetches all klines for `symbol`/`interval` with open times in
    /// `[start_ms, end_ms]`, oldest first.
    ///
    /// Pagination follows the close time of each page's last row, so
    /// gaps in exchange data are skipped rather than looped on.
    ///
    /// # Errors
    /// - [`IngestError::Http`] / [`IngestError::Api`] when a page
    ///   request fails after retries.
    /// - [`IngestError::Malformed`] when a row cannot be parsed.
    pub fn fetch_klines(
        &self,
        symbol: &str,
        interval: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Candle>, IngestError> {
        let mut candles = Vec::new();
        let mut cursor = start_ms;

        while cursor <= end_ms {
            let rows = self.fetch_page(symbol, interval, cursor, end_ms)?;
            if rows.is_empty() {
                break;
            }

            let page_len = rows.len();
            for row in &rows {
                candles.push(parse_kline(row)?);
            }

            let last = candles.last().map_or(cursor, |c| c.close_time_ms);
            debug!(symbol, rows = page_len, cursor, "fetched kline page");

            cursor = last + 1;
            if page_len < PAGE_LIMIT {
                break;
            }
        }

        candles.sort_by_key(|c| c.open_time_ms);
        candles.dedup_by_key(|c| c.open_time_ms);
        Ok(candles)
    }

    fn fetch_page(
        &self,
        symbol: &str,
        interval: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Value>, IngestError> {
        let url = format!("{}{KLINES_PATH}", self.base_url);
        let mut last_error = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.request_page(&url, symbol, interval, start_ms, end_ms) {
                Ok(rows) => return Ok(rows),
                Err(e) => {
                    warn!(symbol, attempt, error = %e, "kline page request failed");
                    last_error = Some(e);
                    if attempt < MAX_ATTEMPTS {
                        std::thread::sleep(Duration::from_millis(
                            RETRY_BASE_DELAY_MS * u64::from(attempt),
                        ));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            IngestError::Malformed("page request produced no result".to_string())
        }))
    }

    fn request_page(
        &self,
        url: &str,
        symbol: &str,
        interval: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Value>, IngestError> {
        let mut request = self.http.get(url).query(&[
            ("symbol", symbol),
            ("interval", interval),
            ("startTime", &start_ms.to_string()),
            ("endTime", &end_ms.to_string()),
            ("limit", &PAGE_LIMIT.to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body: Value = response.json()?;
        match body {
            Value::Array(rows) => Ok(rows),
            other => Err(IngestError::Malformed(format!(
                "expected kline array, got {other}"
            ))),
        }
    }
}

/// Converts one kline row into a [`Candle`].
///
/// Binance rows mix types: timestamps and trade counts are JSON
/// numbers, prices and volumes are decimal strings.
///
/// # Errors
/// - [`IngestError::Malformed`] when the row is short or a field does
///   not parse.
pub fn parse_kline(row: &Value) -> Result<Candle, IngestError> {
    let fields = row
        .as_array()
        .ok_or_else(|| IngestError::Malformed(format!("kline row is not an array: {row}")))?;
    if fields.len() < 11 {
        return Err(IngestError::Malformed(format!(
            "kline row has {} fields, expected at least 11",
            fields.len()
        )));
    }

    Ok(Candle {
        open_time_ms: int_field(fields, 0)?,
        open: float_field(fields, 1)?,
        high: float_field(fields, 2)?,
        low: float_field(fields, 3)?,
        close: float_field(fields, 4)?,
        volume: float_field(fields, 5)?,
        close_time_ms: int_field(fields, 6)?,
        quote_volume: float_field(fields, 7)?,
        trades: int_field(fields, 8)?,
        taker_buy_base_volume: float_field(fields, 9)?,
        taker_buy_quote_volume: float_field(fields, 10)?,
    })
}

fn int_field(fields: &[Value], index: usize) -> Result<i64, IngestError> {
    fields[index]
        .as_i64()
        .ok_or_else(|| IngestError::Malformed(format!("field {index} is not an integer")))
}

fn float_field(fields: &[Value], index: usize) -> Result<f64, IngestError> {
    let value = &fields[index];
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|_| IngestError::Malformed(format!("field {index} is not a decimal: {s}"))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| IngestError::Malformed(format!("field {index} is not a number"))),
        _ => Err(IngestError::Malformed(format!(
            "field {index} has unexpected type"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> Value {
        json!([
            1_709_596_800_000_i64,
            "61000.10000000",
            "61500.00000000",
            "60800.50000000",
            "61250.25000000",
            "148.11427815",
            1_709_600_399_999_i64,
            "9056432.19055334",
            308,
            "75.87402397",
            "4640512.46694368",
            "0"
        ])
    }

    #[test]
    fn test_parse_kline_row() {
        let candle = parse_kline(&sample_row()).unwrap();
        assert_eq!(candle.open_time_ms, 1_709_596_800_000);
        assert_eq!(candle.close_time_ms, 1_709_600_399_999);
        assert!((candle.open - 61000.1).abs() < 1e-10);
        assert!((candle.close - 61250.25).abs() < 1e-10);
        assert!((candle.volume - 148.114_278_15).abs() < 1e-10);
        assert_eq!(candle.trades, 308);
        assert!((candle.taker_buy_base_volume - 75.874_023_97).abs() < 1e-10);
    }

    #[test]
    fn test_parse_kline_rejects_short_row() {
        let err = parse_kline(&json!([1_709_596_800_000_i64, "61000.1"])).unwrap_err();
        assert!(matches!(err, IngestError::Malformed(_)));
    }

    #[test]
    fn test_parse_kline_rejects_bad_decimal() {
        let mut row = sample_row();
        row[4] = json!("not-a-price");
        let err = parse_kline(&row).unwrap_err();
        assert!(matches!(err, IngestError::Malformed(_)));
    }

    #[test]
    fn test_parse_kline_rejects_non_array() {
        let err = parse_kline(&json!({"open": 1.0})).unwrap_err();
        assert!(matches!(err, IngestError::Malformed(_)));
    }
}
