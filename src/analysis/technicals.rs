// =============================================================================
// Technical Summary - per-index indicator readout
// =============================================================================
//
// Composes the indicator engine into the block shown for each technical index:
// support/resistance, trend, short/long EMA, MACD and the resulting bias.

use serde::{Deserialize, Serialize};

use crate::config::IndicatorParams;
use crate::indicators::{
    calculate_ema, calculate_macd, calculate_support_resistance, calculate_trend, IndicatorError,
    Levels, TrendReading,
};
use crate::series::PriceSeries;
use crate::types::Bias;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSummary {
    pub name: String,
    /// Valid closes the summary was computed from.
    pub observations: usize,
    pub levels: Levels,
    pub trend: TrendReading,
    pub ema_short: f64,
    pub ema_long: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub bias: Bias,
}

impl TechnicalSummary {
    /// Compute the summary over the valid closes of `series`.
    ///
    /// Returns `Ok(None)` when the series has no valid close, so the report can
    /// omit the section instead of showing sentinel values.
    pub fn compute(
        name: &str,
        series: &PriceSeries,
        params: &IndicatorParams,
    ) -> Result<Option<Self>, IndicatorError> {
        params.validate()?;

        let closes = series.closes();
        if closes.is_empty() {
            return Ok(None);
        }

        let levels = calculate_support_resistance(&closes, params.sr_window)?;
        let trend = calculate_trend(&closes, params.trend_window, params.tolerance)?;
        let ema_short = calculate_ema(&closes, params.ema_short)?;
        let ema_long = calculate_ema(&closes, params.ema_long)?;
        let macd = calculate_macd(&closes, params.fast, params.slow, params.signal)?;

        // Non-empty input => every series has a last value.
        let (Some(&ema_short), Some(&ema_long), Some((macd, signal, histogram))) =
            (ema_short.last(), ema_long.last(), macd.last())
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            name: name.to_string(),
            observations: closes.len(),
            levels,
            trend,
            ema_short,
            ema_long,
            macd,
            signal,
            histogram,
            bias: Bias::from_macd(macd, signal),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::TrendDirection;
    use crate::series::PricePoint;
    use chrono::{Duration, NaiveDate};

    fn series(closes: &[Option<f64>]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: start + Duration::days(i as i64),
                    close,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_series_has_no_summary() {
        let params = IndicatorParams::default();
        assert_eq!(TechnicalSummary::compute("X", &series(&[]), &params).unwrap(), None);
        assert_eq!(
            TechnicalSummary::compute("X", &series(&[None, None]), &params).unwrap(),
            None
        );
    }

    #[test]
    fn ascending_series_summary() {
        let closes: Vec<Option<f64>> = (10..=20).map(|x| Some(x as f64)).collect();
        let params = IndicatorParams {
            sr_window: 5,
            trend_window: 5,
            ..IndicatorParams::default()
        };
        let s = TechnicalSummary::compute("NIFTY 50", &series(&closes), &params)
            .unwrap()
            .unwrap();
        assert_eq!(s.name, "NIFTY 50");
        assert_eq!(s.observations, 11);
        assert_eq!(s.levels.support, 16.0);
        assert_eq!(s.levels.resistance, 20.0);
        assert_eq!(s.trend.direction, TrendDirection::Up);
        assert!((s.trend.slope - 1.0).abs() < 1e-12);
        assert!(s.ema_short > s.ema_long);
        assert!(s.macd > 0.0);
        assert_eq!(s.bias, Bias::from_macd(s.macd, s.signal));
        assert!((s.histogram - (s.macd - s.signal)).abs() < 1e-12);
    }

    #[test]
    fn flat_series_summary() {
        let closes = vec![Some(5.0); 26];
        let s = TechnicalSummary::compute("FLAT", &series(&closes), &IndicatorParams::default())
            .unwrap()
            .unwrap();
        assert!(s.macd.abs() < 1e-9);
        assert!(s.signal.abs() < 1e-9);
        assert!(s.histogram.abs() < 1e-9);
        assert_eq!(s.trend.direction, TrendDirection::Sideways);
        assert_eq!(s.levels.support, 5.0);
        assert_eq!(s.levels.resistance, 5.0);
    }

    #[test]
    fn missing_entries_are_dropped() {
        let closes = [Some(1.0), None, Some(2.0), None, Some(3.0)];
        let s = TechnicalSummary::compute("GAPPY", &series(&closes), &IndicatorParams::default())
            .unwrap()
            .unwrap();
        assert_eq!(s.observations, 3);
        assert!((s.trend.slope - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_params_fail_fast() {
        let params = IndicatorParams {
            ema_long: 0,
            ..IndicatorParams::default()
        };
        let err = TechnicalSummary::compute("X", &series(&[Some(1.0)]), &params).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidParameter { name: "ema_long", value: 0 }
        );
    }
}
