use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single daily OHLC row from the market-data provider.
///
/// The provider reports `null` for fields it has no value for (holidays,
/// partially-filled current sessions), so every price is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl Candle {
    pub fn new(
        date: NaiveDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Build a candle from a UNIX timestamp in seconds.  Returns `None` for an
    /// out-of-range timestamp.
    pub fn from_unix(
        timestamp: i64,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
    ) -> Option<Self> {
        let date = DateTime::from_timestamp(timestamp, 0)?.date_naive();
        Some(Self::new(date, open, high, low, close))
    }

    /// `true` when the row carries a usable close.
    pub fn has_close(&self) -> bool {
        self.close.is_some_and(|c| c.is_finite())
    }
}
