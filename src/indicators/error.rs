// =============================================================================
// Indicator Errors
// =============================================================================
//
// Only invalid arguments are errors.  Insufficient data is never an error: each
// indicator encodes it as a documented sentinel result instead.

use thiserror::Error;

/// Invalid-argument failures raised synchronously by the indicator engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// A span, period, or window was zero.
    #[error("invalid parameter `{name}`: must be >= 1, got {value}")]
    InvalidParameter { name: &'static str, value: usize },

    /// The trend tolerance was negative or NaN.
    #[error("invalid tolerance: must be a non-negative number, got {0}")]
    InvalidTolerance(f64),
}

/// Reject a zero span/period/window, naming the offending parameter.
pub(crate) fn require_positive(name: &'static str, value: usize) -> Result<(), IndicatorError> {
    if value == 0 {
        return Err(IndicatorError::InvalidParameter { name, value });
    }
    Ok(())
}
