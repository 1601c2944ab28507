// =============================================================================
// Price Series - date-keyed closes with optional gaps
// =============================================================================
//
// The indicator engine works on plain `f64` slices.  This type owns the dates
// and the notion of a missing observation, and hands the engine the dense
// valid closes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::market_data::Candle;

/// A single observation.  `close == None` is a missing entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("dates must be strictly increasing: {previous} is followed by {next}")]
    NonIncreasingDate { previous: NaiveDate, next: NaiveDate },
}

/// Ordered close-price series.  Dates are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicate dates.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NonIncreasingDate {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { points })
    }

    /// Close series of a candle history.
    pub fn from_candles(candles: &[Candle]) -> Result<Self, SeriesError> {
        Self::new(
            candles
                .iter()
                .map(|c| PricePoint {
                    date: c.date,
                    close: c.close,
                })
                .collect(),
        )
    }

    /// Valid closes only, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.points
            .iter()
            .filter_map(|p| p.close.filter(|c| !c.is_nan()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn point(d: u32, close: Option<f64>) -> PricePoint {
        PricePoint { date: day(d), close }
    }

    #[test]
    fn rejects_non_increasing_dates() {
        let err = PriceSeries::new(vec![point(2, Some(1.0)), point(2, Some(2.0))]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NonIncreasingDate {
                previous: day(2),
                next: day(2)
            }
        );
        assert!(PriceSeries::new(vec![point(3, None), point(1, None)]).is_err());
    }

    #[test]
    fn closes_drop_missing() {
        let s = PriceSeries::new(vec![
            point(1, Some(10.0)),
            point(2, None),
            point(3, Some(f64::NAN)),
            point(4, Some(12.0)),
        ])
        .unwrap();
        assert_eq!(s.closes(), vec![10.0, 12.0]);
    }

    #[test]
    fn from_candles_keeps_missing_closes_out() {
        let candles = [
            Candle::new(day(1), None, None, None, Some(5.0)),
            Candle::new(day(4), Some(5.5), None, None, None),
            Candle::new(day(5), None, None, None, Some(6.0)),
        ];
        let s = PriceSeries::from_candles(&candles).unwrap();
        assert_eq!(s.closes(), vec![5.0, 6.0]);
        assert!(PriceSeries::from_candles(&[candles[2], candles[0]]).is_err());
    }
}
