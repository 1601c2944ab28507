// =============================================================================
// Yahoo Finance Chart Client - daily OHLC history
// =============================================================================
//
// Uses the public `v8/finance/chart/{symbol}` endpoint.  No authentication.
// The response is column-oriented: one `timestamp` array plus parallel
// `open/high/low/close` arrays in which any entry may be `null`.
// =============================================================================

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use super::Candle;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) market-brief/1.0";

/// HTTP client for the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a client against the public endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against an alternative base URL (mirrors, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("failed to build reqwest client")?;

        let base_url = base_url.into();
        debug!(base_url = %base_url, "YahooClient initialised");

        Ok(Self { base_url, client })
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart/{symbol}?range=..&interval=..
    ///
    /// `range` is a provider period such as `"5d"`, `"3mo"`, `"6mo"`;
    /// `interval` is a bar size such as `"1d"`.
    #[instrument(skip(self), name = "yahoo::get_history")]
    pub async fn get_history(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Candle>> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .with_context(|| format!("GET chart/{symbol} request failed"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("failed to parse chart/{symbol} response"))?;

        if !status.is_success() {
            anyhow::bail!("Yahoo GET chart/{} returned {}: {}", symbol, status, body);
        }

        let candles = parse_chart(&body).with_context(|| format!("malformed chart for {symbol}"))?;
        debug!(symbol, range, interval, count = candles.len(), "history fetched");
        Ok(candles)
    }
}

impl std::fmt::Debug for YahooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Response parsing
// -----------------------------------------------------------------------------

/// Convert a chart response into daily candles, oldest first.
///
/// Timestamps are shifted by the exchange's `gmtoffset` so each row lands on
/// its local trading date.  When two rows share a date (the live session is
/// sometimes repeated), the later row wins.
pub fn parse_chart(body: &serde_json::Value) -> Result<Vec<Candle>> {
    let chart = body.get("chart").context("response missing 'chart'")?;

    if let Some(err) = chart.get("error").filter(|e| !e.is_null()) {
        let code = err["code"].as_str().unwrap_or("unknown");
        let description = err["description"].as_str().unwrap_or("");
        anyhow::bail!("provider error {code}: {description}");
    }

    let result = chart["result"]
        .as_array()
        .and_then(|arr| arr.first())
        .context("chart response has no result")?;

    let offset = result["meta"]["gmtoffset"].as_i64().unwrap_or(0);

    // A symbol with no trading history has no timestamp array at all.
    let timestamps = match result.get("timestamp").and_then(|v| v.as_array()) {
        Some(ts) => ts,
        None => return Ok(Vec::new()),
    };

    let quote = &result["indicators"]["quote"][0];
    let column = |name: &str| -> Vec<Option<f64>> {
        quote[name]
            .as_array()
            .map(|arr| arr.iter().map(|v| v.as_f64()).collect())
            .unwrap_or_default()
    };
    let opens = column("open");
    let highs = column("high");
    let lows = column("low");
    let closes = column("close");
    let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    let mut candles: Vec<Candle> = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let Some(ts) = ts.as_i64() else {
            warn!(index = i, "skipping chart row with non-integer timestamp");
            continue;
        };
        let Some(candle) = Candle::from_unix(
            ts + offset,
            at(&opens, i),
            at(&highs, i),
            at(&lows, i),
            at(&closes, i),
        ) else {
            warn!(timestamp = ts, "skipping chart row with out-of-range timestamp");
            continue;
        };

        match candles.last().map(|c| c.date) {
            Some(prev) if prev == candle.date => {
                if let Some(last) = candles.last_mut() {
                    *last = candle;
                }
            }
            Some(prev) if prev > candle.date => {
                warn!(date = %candle.date, "skipping out-of-order chart row");
            }
            _ => candles.push(candle),
        }
    }

    Ok(candles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn chart(timestamps: serde_json::Value, closes: serde_json::Value) -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": "^NSEI", "gmtoffset": 19800 },
                    "timestamp": timestamps,
                    "indicators": { "quote": [{
                        "open": [100.0, 101.0, 102.0],
                        "high": [110.0, 111.0, 112.0],
                        "low":  [90.0, 91.0, 92.0],
                        "close": closes
                    }]}
                }],
                "error": null
            }
        })
    }

    #[test]
    fn parses_rows_with_null_close() {
        // 2024-01-02, 2024-01-03, 2024-01-04 at 03:45 UTC
        let body = chart(
            json!([1_704_167_100_i64, 1_704_253_500_i64, 1_704_339_900_i64]),
            json!([105.0, null, 107.5]),
        );
        let candles = parse_chart(&body).unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(candles[0].close, Some(105.0));
        assert_eq!(candles[1].close, None);
        assert_eq!(candles[1].open, Some(101.0));
        assert_eq!(candles[2].close, Some(107.5));
    }

    #[test]
    fn duplicate_date_keeps_latest_row() {
        // Second and third timestamps fall on the same local date.
        let body = chart(
            json!([1_704_167_100_i64, 1_704_253_500_i64, 1_704_270_000_i64]),
            json!([1.0, 2.0, 3.0]),
        );
        let candles = parse_chart(&body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, Some(3.0));
    }

    #[test]
    fn provider_error_is_rejected() {
        let body = json!({
            "chart": {
                "result": null,
                "error": {
                    "code": "Not Found",
                    "description": "No data found, symbol may be delisted"
                }
            }
        });
        let err = parse_chart(&body).unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn missing_timestamps_means_empty_history() {
        let body = json!({
            "chart": {
                "result": [{ "meta": {}, "indicators": { "quote": [{}] } }],
                "error": null
            }
        });
        assert!(parse_chart(&body).unwrap().is_empty());
    }

    #[test]
    fn missing_chart_is_an_error() {
        assert!(parse_chart(&json!({})).is_err());
    }
}
