// =============================================================================
// Support / Resistance
// =============================================================================
//
// Support is the lowest and resistance the highest close over the trailing
// `window` entries, ignoring missing ones.  With no valid observation in the
// window the pair is the (0.0, 0.0) sentinel, which callers must read as
// "undefined".

use serde::{Deserialize, Serialize};

use super::error::{require_positive, IndicatorError};
use super::trailing_window;

pub const DEFAULT_WINDOW: usize = 20;

/// Floor/ceiling levels over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub support: f64,
    pub resistance: f64,
}

impl Levels {
    /// Sentinel returned when the window holds no valid close.
    pub const UNDEFINED: Levels = Levels {
        support: 0.0,
        resistance: 0.0,
    };

    /// `false` for the insufficient-data sentinel.
    ///
    /// A genuine window of zero prices is indistinguishable from the sentinel
    /// and also reports `false`.
    pub fn is_defined(&self) -> bool {
        *self != Self::UNDEFINED
    }
}

/// Compute support and resistance over the trailing `window` closes.
///
/// `NaN` entries still occupy a slot in the window but are excluded from the
/// min/max.
pub fn calculate_support_resistance(
    closes: &[f64],
    window: usize,
) -> Result<Levels, IndicatorError> {
    require_positive("window", window)?;

    let tail = trailing_window(closes, window);
    if tail.is_empty() {
        return Ok(Levels::UNDEFINED);
    }

    let (support, resistance) = tail
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    Ok(Levels {
        support,
        resistance,
    })
}
