// =============================================================================
// Trend Direction - Least-Squares Slope
// =============================================================================
//
// Takes the trailing `window` closes, drops the missing ones, fits y = a + b*x
// by ordinary least squares with x = 0, 1, ..., k-1 over what remains
// (position, not calendar date), and classifies the slope b:
//
//   b >  tol  =>  Up
//   b < -tol  =>  Down
//   otherwise =>  Sideways
//
// Closed form:  b = Σ((x-x̄)(y-ȳ)) / Σ((x-x̄)²)

use serde::{Deserialize, Serialize};

use super::error::{require_positive, IndicatorError};
use super::trailing_window;

pub const DEFAULT_WINDOW: usize = 10;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Short-term direction label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}

impl Default for TrendDirection {
    fn default() -> Self {
        Self::Sideways
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Sideways => write!(f, "Sideways"),
        }
    }
}

impl TrendDirection {
    /// Classify `slope` against a symmetric `tolerance` band.
    pub fn classify(slope: f64, tolerance: f64) -> Self {
        if slope > tolerance {
            Self::Up
        } else if slope < -tolerance {
            Self::Down
        } else {
            Self::Sideways
        }
    }
}

/// Direction label together with the fitted slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub direction: TrendDirection,
    pub slope: f64,
}

impl TrendReading {
    /// Sentinel returned when fewer than two valid closes are available.
    pub const FLAT: TrendReading = TrendReading {
        direction: TrendDirection::Sideways,
        slope: 0.0,
    };
}

/// Slope of the least-squares line through `ys` against their positions.
///
/// Returns `0.0` for fewer than two points.
pub fn linear_slope(ys: &[f64]) -> f64 {
    if ys.len() < 2 {
        return 0.0;
    }

    let n = ys.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    for (i, &y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    // denominator > 0 whenever there are two or more points.
    numerator / denominator
}

/// Detect the short-term trend over the trailing `window` closes.
///
/// Fewer than two valid closes in the window gives [`TrendReading::FLAT`].
pub fn calculate_trend(
    closes: &[f64],
    window: usize,
    tolerance: f64,
) -> Result<TrendReading, IndicatorError> {
    require_positive("window", window)?;
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(IndicatorError::InvalidTolerance(tolerance));
    }

    let tail = trailing_window(closes, window);
    if tail.len() < 2 {
        return Ok(TrendReading::FLAT);
    }

    let slope = linear_slope(&tail);
    Ok(TrendReading {
        direction: TrendDirection::classify(slope, tolerance),
        slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_empty_input_is_flat() {
        let r = calculate_trend(&[], DEFAULT_WINDOW, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r, TrendReading::FLAT);
        assert_eq!(r.direction.to_string(), "Sideways");
    }

    #[test]
    fn trend_single_point_is_flat() {
        let r = calculate_trend(&[f64::NAN, 3.0], 5, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r, TrendReading::FLAT);
    }

    #[test]
    fn trend_window_one_is_flat() {
        let r = calculate_trend(&[1.0, 2.0, 3.0], 1, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r, TrendReading::FLAT);
    }

    #[test]
    fn trend_invalid_arguments() {
        assert_eq!(
            calculate_trend(&[1.0, 2.0], 0, DEFAULT_TOLERANCE).unwrap_err(),
            IndicatorError::InvalidParameter { name: "window", value: 0 }
        );
        assert!(matches!(
            calculate_trend(&[1.0, 2.0], 5, -1.0),
            Err(IndicatorError::InvalidTolerance(_))
        ));
        assert!(matches!(
            calculate_trend(&[1.0, 2.0], 5, f64::NAN),
            Err(IndicatorError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn trend_ascending_last_five() {
        let closes: Vec<f64> = (10..=20).map(|x| x as f64).collect();
        let r = calculate_trend(&closes, 5, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r.direction, TrendDirection::Up);
        assert!((r.slope - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trend_descending_is_down() {
        let closes: Vec<f64> = (0..20).map(|x| 100.0 - 2.5 * x as f64).collect();
        let r = calculate_trend(&closes, 10, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r.direction, TrendDirection::Down);
        assert!((r.slope + 2.5).abs() < 1e-12);
    }

    #[test]
    fn trend_constant_is_sideways() {
        let r = calculate_trend(&[5.0; 26], DEFAULT_WINDOW, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r.direction, TrendDirection::Sideways);
        assert!(r.slope.abs() < 1e-12);
    }

    #[test]
    fn trend_tolerance_band() {
        let closes: Vec<f64> = (0..10).map(|x| 1.0 + 0.01 * x as f64).collect();
        let tight = calculate_trend(&closes, 10, 1e-6).unwrap();
        let loose = calculate_trend(&closes, 10, 0.05).unwrap();
        assert_eq!(tight.direction, TrendDirection::Up);
        assert_eq!(loose.direction, TrendDirection::Sideways);
        // The slope itself does not depend on the tolerance.
        assert!((tight.slope - loose.slope).abs() < 1e-15);
    }

    #[test]
    fn trend_uses_positions_not_gaps() {
        // Missing entries are dropped; remaining points are evenly spaced.
        let closes = [1.0, f64::NAN, 2.0, f64::NAN, f64::NAN, 3.0];
        let r = calculate_trend(&closes, 10, DEFAULT_TOLERANCE).unwrap();
        assert!((r.slope - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trend_missing_entries_use_up_the_window() {
        // Last 3 entries are NaN, NaN, 3.0: a single valid close.
        let closes = [10.0, 1.0, f64::NAN, f64::NAN, 3.0];
        let r = calculate_trend(&closes, 3, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r, TrendReading::FLAT);

        // Widening the window brings 10.0 and 1.0 back in.
        let r = calculate_trend(&closes, 5, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(r.direction, TrendDirection::Down);
    }

    #[test]
    fn linear_slope_matches_hand_computation() {
        // x = 0..3, y = [1, 3, 2, 5] => slope = 1.1
        let slope = linear_slope(&[1.0, 3.0, 2.0, 5.0]);
        assert!((slope - 1.1).abs() < 1e-12);
    }

    #[test]
    fn classify_boundaries_are_sideways() {
        assert_eq!(TrendDirection::classify(1e-6, 1e-6), TrendDirection::Sideways);
        assert_eq!(TrendDirection::classify(-1e-6, 1e-6), TrendDirection::Sideways);
        assert_eq!(TrendDirection::classify(2e-6, 1e-6), TrendDirection::Up);
        assert_eq!(TrendDirection::classify(-2e-6, 1e-6), TrendDirection::Down);
    }
}
