// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used in the daily
// report.  Every public function validates its integer parameters and returns
// `Result<_, IndicatorError>`; insufficient data is encoded as a sentinel
// result (empty series, `Levels::UNDEFINED`, `TrendReading::FLAT`).
//
// Missing observations are represented as `NaN` in the input slices.

pub mod ema;
pub mod error;
pub mod levels;
pub mod macd;
pub mod trend;

pub use ema::calculate_ema;
pub use error::IndicatorError;
pub use levels::{calculate_support_resistance, Levels};
pub use macd::{calculate_macd, calculate_macd_default, MacdResult};
pub use trend::{calculate_trend, linear_slope, TrendDirection, TrendReading};

/// The valid values among the last `window` entries of `values`, oldest first.
///
/// Missing entries inside the window are dropped, not replaced by older ones.
pub(crate) fn trailing_window(values: &[f64], window: usize) -> Vec<f64> {
    let start = values.len().saturating_sub(window);
    values[start..].iter().copied().filter(|v| !v.is_nan()).collect()
}
