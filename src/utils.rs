//! Utility functions for forecasting workflows

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// Calendar dates for each forecast day, starting the day after `last_date`.
///
/// The forecaster itself knows only array positions; this is the seam a
/// presentation layer uses to pair each prediction with its calendar day.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as i64)
        .map(|i| last_date + Duration::days(i))
        .collect()
}

/// Split a price history into chronological training and test segments
pub fn train_test_split(prices: &[f64], test_ratio: f64) -> (Vec<f64>, Vec<f64>) {
    if prices.is_empty() || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return (prices.to_vec(), Vec::new());
    }

    let test_size = (prices.len() as f64 * test_ratio).round() as usize;
    let split = prices.len() - test_size;

    (prices[..split].to_vec(), prices[split..].to_vec())
}

/// Accuracy metrics comparing a forecast against realized prices
#[derive(Debug, Clone)]
pub struct ForecastAccuracy {
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute percentage error
    pub mape: f64,
    /// Symmetric mean absolute percentage error
    pub smape: f64,
    /// Share of day-over-day moves whose direction the forecast matched,
    /// in percent
    pub direction_accuracy: f64,
}

/// Evaluate a forecast against realized prices
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::ValidationError(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut pct_sum = 0.0;
    let mut sym_sum = 0.0;

    for (&f, &a) in forecast.iter().zip(actual.iter()) {
        let err = a - f;
        abs_sum += err.abs();
        sq_sum += err * err;

        if a != 0.0 {
            pct_sum += err.abs() / a.abs() * 100.0;
        }

        let denom = a.abs() + f.abs();
        if denom != 0.0 {
            sym_sum += 200.0 * err.abs() / denom;
        }
    }

    // Direction accuracy only counts pairs where both series actually moved
    let mut direction_correct = 0usize;
    let mut direction_total = 0usize;
    for (f, a) in forecast.windows(2).zip(actual.windows(2)) {
        let f_move = f[1] - f[0];
        let a_move = a[1] - a[0];
        if f_move.abs() > 1e-10 && a_move.abs() > 1e-10 {
            direction_total += 1;
            if (f_move > 0.0) == (a_move > 0.0) {
                direction_correct += 1;
            }
        }
    }
    let direction_accuracy = if direction_total > 0 {
        direction_correct as f64 / direction_total as f64 * 100.0
    } else {
        0.0
    };

    let mse = sq_sum / n;

    Ok(ForecastAccuracy {
        mae: abs_sum / n,
        mse,
        rmse: mse.sqrt(),
        mape: pct_sum / n,
        smape: sym_sum / n,
        direction_accuracy,
    })
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:       {:.4}", self.mae)?;
        writeln!(f, "  MSE:       {:.4}", self.mse)?;
        writeln!(f, "  RMSE:      {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:      {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE:     {:.4}%", self.smape)?;
        writeln!(f, "  Direction: {:.1}%", self.direction_accuracy)?;
        Ok(())
    }
}
