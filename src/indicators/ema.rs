// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula (no bias adjustment):
//   alpha  = 2 / (span + 1)
//   EMA_0  = close_0
//   EMA_t  = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// The output has exactly one value per input value, so two EMAs of the same
// series always line up index-for-index.
// =============================================================================

use super::error::{require_positive, IndicatorError};

/// Smoothing factor for the given span.
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Compute the EMA series for `closes` with smoothing period `span`.
///
/// A `NaN` entry marks a missing observation.  The previous EMA value is
/// repeated at that position, but the gap still decays its weight: the next
/// valid close is blended as
///
///   EMA = (w * EMA_prev + alpha * close) / (w + alpha),  w = (1 - alpha)^(gap + 1)
///
/// which reduces to the plain recursion when there is no gap.  Leading missing
/// entries stay `NaN` until the first valid close seeds the recursion.
///
/// # Edge cases
/// - `closes.is_empty()` => empty vec
/// - `span == 0` => [`IndicatorError::InvalidParameter`]
pub fn calculate_ema(closes: &[f64], span: usize) -> Result<Vec<f64>, IndicatorError> {
    require_positive("span", span)?;

    let alpha = smoothing_factor(span);
    let mut result = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;
    // Weight still carried by `prev`; reset to 1 after every observation.
    let mut old_weight = 1.0_f64;

    for &close in closes {
        if let Some(p) = prev {
            old_weight *= 1.0 - alpha;
            if !close.is_nan() {
                prev = Some((old_weight * p + alpha * close) / (old_weight + alpha));
                old_weight = 1.0;
            }
        } else if !close.is_nan() {
            prev = Some(close);
        }
        result.push(prev.unwrap_or(f64::NAN));
    }

    Ok(result)
}
