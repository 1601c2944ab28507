// =============================================================================
// MACD - Moving Average Convergence Divergence
// =============================================================================
//
//   macd_line   = EMA(close, fast) - EMA(close, slow)
//   signal_line = EMA(macd_line, signal)
//   histogram   = macd_line - signal_line
//
// Both EMAs are computed over the same input, so the subtraction is a plain
// element-wise zip.

use serde::{Deserialize, Serialize};

use super::ema::calculate_ema;
use super::error::{require_positive, IndicatorError};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// The three aligned MACD series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdResult {
    /// Most recent `(macd, signal, histogram)` triple.
    pub fn last(&self) -> Option<(f64, f64, f64)> {
        Some((
            *self.macd_line.last()?,
            *self.signal_line.last()?,
            *self.histogram.last()?,
        ))
    }
}

/// Compute MACD for `closes`.
///
/// Returns three empty series for an empty input.  All periods are validated
/// up front, so a zero period fails even when there is no data.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdResult, IndicatorError> {
    require_positive("fast", fast)?;
    require_positive("slow", slow)?;
    require_positive("signal", signal)?;

    if closes.is_empty() {
        return Ok(MacdResult::default());
    }

    let fast_ema = calculate_ema(closes, fast)?;
    let slow_ema = calculate_ema(closes, slow)?;

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = calculate_ema(&macd_line, signal)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdResult {
        macd_line,
        signal_line,
        histogram,
    })
}

/// MACD with the conventional 12 / 26 / 9 periods.
pub fn calculate_macd_default(closes: &[f64]) -> Result<MacdResult, IndicatorError> {
    calculate_macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
