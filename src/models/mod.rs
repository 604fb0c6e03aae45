//! Forecasting models for daily price series

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use rand::Rng;
use serde::Serialize;
use std::fmt::Debug;

/// Forecast result containing predicted values
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Forecasted values, one per future day
    values: Vec<f64>,
    /// Number of days forecasted
    horizon: usize,
    /// 95% confidence intervals, when the model provides them
    intervals: Option<Vec<(f64, f64)>>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizon: usize) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match horizon ({})",
                values.len(),
                horizon
            )));
        }

        Ok(Self {
            values,
            horizon,
            intervals: None,
        })
    }

    /// Create a new forecast result with confidence intervals
    pub fn new_with_intervals(
        values: Vec<f64>,
        horizon: usize,
        intervals: Vec<(f64, f64)>,
    ) -> Result<Self> {
        if intervals.len() != values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Intervals length ({}) doesn't match values length ({})",
                intervals.len(),
                values.len()
            )));
        }

        let mut result = Self::new(values, horizon)?;
        result.intervals = Some(intervals);
        Ok(result)
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of days forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Get the confidence intervals, if available
    pub fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.intervals.as_deref()
    }
}

/// Forecast model that can be trained on a price series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a price series
    fn train(&self, data: &PriceSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Trained forecast model.
///
/// The random source is a parameter so tests and reproducible pipelines can
/// supply a seeded generator; `forecast` defers to the thread-local one.
pub trait TrainedForecastModel: Debug {
    /// Generate forecasts for future days using the supplied random source
    fn forecast_with<R: Rng + ?Sized>(&self, horizon: usize, rng: &mut R)
        -> Result<ForecastResult>;

    /// Generate forecasts using the thread-local random source
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        self.forecast_with(horizon, &mut rand::thread_rng())
    }

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod moving_average;
pub mod trend;
