//! Moving-average baseline for price forecasting

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use rand::Rng;
use statrs::statistics::Statistics;

/// Simple moving-average model.
///
/// Forecasts the trailing-window mean for every day of the horizon. Fully
/// deterministic, which makes it the comparison baseline for the trend
/// model in accuracy evaluation.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

/// Trained moving-average model
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    /// Name of the model
    name: String,
    /// Mean of the trailing window at training time
    last_average: f64,
}

impl MovingAverage {
    /// Create a new moving-average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
        })
    }

    /// Get the window size
    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for MovingAverage {
    type Trained = TrainedMovingAverage;

    fn train(&self, data: &PriceSeries) -> Result<Self::Trained> {
        if data.len() < self.window {
            return Err(ForecastError::InsufficientData(format!(
                "Need at least {} observations for the moving-average window, got {}",
                self.window,
                data.len()
            )));
        }

        let window = data.tail(self.window);

        Ok(TrainedMovingAverage {
            name: self.name.clone(),
            last_average: window.iter().copied().mean(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedMovingAverage {
    fn forecast_with<R: Rng + ?Sized>(
        &self,
        horizon: usize,
        _rng: &mut R,
    ) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be positive".to_string(),
            ));
        }

        // The forecast is constant at the last trailing average
        ForecastResult::new(vec![self.last_average; horizon], horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
