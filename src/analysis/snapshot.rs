// =============================================================================
// Price Snapshots
// =============================================================================
//
// Latest-session view of an instrument: today's open and close, the change
// versus the previous session's close, and the last traded price.

use serde::{Deserialize, Serialize};

use crate::market_data::Candle;

/// Percentage change from `base` to `value`.
///
/// Returns `None` when `base` is zero or the result is not finite.
pub fn pct_change(value: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let pct = (value - base) / base * 100.0;
    pct.is_finite().then_some(pct)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub open: Option<f64>,
    pub close: f64,
    pub prev_close: f64,
    pub change_pct: Option<f64>,
    /// Last traded price; the provider's latest close.
    pub ltp: f64,
}

impl Snapshot {
    /// Build a snapshot from the last two sessions that carry a close.
    ///
    /// With a single usable session the previous close equals the current
    /// one (change 0 %).  Returns `None` when no session has a close.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let mut usable = candles.iter().rev().filter(|c| c.has_close());
        let last = usable.next()?;
        let prev = usable.next().unwrap_or(last);

        let close = last.close?;
        let prev_close = prev.close?;

        Some(Self {
            open: last.open,
            close,
            prev_close,
            change_pct: pct_change(close, prev_close),
            ltp: close,
        })
    }
}

/// A snapshot tagged with the instrument's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSnapshot {
    pub name: String,
    pub symbol: String,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}
