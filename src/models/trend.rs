//! Moving-window trend forecaster

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::MIN_PRICE;
use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use statrs::statistics::Statistics;

/// Number of trailing observations used to estimate the trend
pub const DEFAULT_WINDOW: usize = 30;

/// Noise fraction of the recent-window average on the trend path
pub const DEFAULT_TREND_NOISE: f64 = 0.015;

/// Noise fraction of the series average on the fallback path
pub const DEFAULT_FALLBACK_NOISE: f64 = 0.02;

/// Trend-extrapolation forecasting model.
///
/// With at least `window` observations, the per-day drift is estimated from
/// the trailing window and extrapolated linearly from the last observed
/// price. With fewer, trend estimation is unreliable, so predictions fall
/// back to independent draws around the series average. Every prediction is
/// floored at the configured minimum price.
#[derive(Debug, Clone)]
pub struct TrendModel {
    /// Name of the model
    name: String,
    /// Trailing window length
    window: usize,
    /// Minimum permissible prediction
    floor: f64,
    /// Noise fraction applied on the trend path
    trend_noise: f64,
    /// Noise fraction applied on the fallback path
    fallback_noise: f64,
}

/// Trained trend model
#[derive(Debug, Clone)]
pub struct TrainedTrendModel {
    /// Name of the model
    name: String,
    /// Minimum permissible prediction
    floor: f64,
    /// Fitted forecasting path
    kind: TrendKind,
}

#[derive(Debug, Clone)]
enum TrendKind {
    /// Too little history for a trend estimate: independent draws around
    /// the series average
    NoisyMean { avg: f64, sigma: f64 },
    /// Linear extrapolation from the last observed price
    Trend {
        last_price: f64,
        trend_factor: f64,
        sigma: f64,
    },
}

impl TrendModel {
    /// Create a trend model with the standard window, floor, and noise levels
    pub fn new() -> Self {
        Self {
            name: format!("Trend Extrapolation (window={})", DEFAULT_WINDOW),
            window: DEFAULT_WINDOW,
            floor: MIN_PRICE,
            trend_noise: DEFAULT_TREND_NOISE,
            fallback_noise: DEFAULT_FALLBACK_NOISE,
        }
    }

    /// Create a trend model with custom parameters.
    ///
    /// Setting both noise fractions to zero makes the model deterministic.
    pub fn with_params(
        window: usize,
        floor: f64,
        trend_noise: f64,
        fallback_noise: f64,
    ) -> Result<Self> {
        if window < 2 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be at least 2".to_string(),
            ));
        }
        if !floor.is_finite() || floor < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Price floor must be finite and non-negative".to_string(),
            ));
        }
        if !trend_noise.is_finite() || trend_noise < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Trend noise fraction must be finite and non-negative".to_string(),
            ));
        }
        if !fallback_noise.is_finite() || fallback_noise < 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Fallback noise fraction must be finite and non-negative".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Trend Extrapolation (window={})", window),
            window,
            floor,
            trend_noise,
            fallback_noise,
        })
    }

    /// Get the trailing window length
    pub fn window(&self) -> usize {
        self.window
    }

    /// Get the minimum permissible prediction
    pub fn floor(&self) -> f64 {
        self.floor
    }
}

impl Default for TrendModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for TrendModel {
    type Trained = TrainedTrendModel;

    fn train(&self, data: &PriceSeries) -> Result<Self::Trained> {
        if data.is_empty() {
            return Err(ForecastError::InsufficientData(
                "cannot forecast from an empty price series".to_string(),
            ));
        }

        let kind = if data.len() < self.window {
            debug!(
                "{} observations is under the {}-observation window, using noisy-mean fallback",
                data.len(),
                self.window
            );
            let avg = data.mean()?;

            TrendKind::NoisyMean {
                avg,
                sigma: self.fallback_noise * avg,
            }
        } else {
            let window = data.tail(self.window);
            let half = self.window / 2;
            let first_avg = window[..half].iter().copied().mean();
            let second_avg = window[half..].iter().copied().mean();

            // Per-day drift, normalized by the full window length rather
            // than the half-window span
            let trend_factor = (second_avg - first_avg) / self.window as f64;

            TrendKind::Trend {
                // Extrapolation starts from the last observation of the
                // whole series, not from the recent-window average
                last_price: data.last_price()?,
                trend_factor,
                sigma: self.trend_noise * second_avg,
            }
        };

        Ok(TrainedTrendModel {
            name: self.name.clone(),
            floor: self.floor,
            kind,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedTrendModel {
    fn forecast_with<R: Rng + ?Sized>(
        &self,
        horizon: usize,
        rng: &mut R,
    ) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be positive".to_string(),
            ));
        }

        // Sigma was fixed at training time and is reused for every day
        let sigma = match &self.kind {
            TrendKind::NoisyMean { sigma, .. } => *sigma,
            TrendKind::Trend { sigma, .. } => *sigma,
        };
        let noise = Normal::new(0.0, sigma)
            .map_err(|e| ForecastError::ForecastingError(format!("noise distribution: {}", e)))?;

        let mut values = Vec::with_capacity(horizon);
        let mut intervals = Vec::with_capacity(horizon);

        for day in 1..=horizon {
            let central = match &self.kind {
                TrendKind::NoisyMean { avg, .. } => *avg,
                TrendKind::Trend {
                    last_price,
                    trend_factor,
                    ..
                } => last_price + trend_factor * day as f64,
            };

            values.push((central + noise.sample(rng)).max(self.floor));

            let margin = 1.96 * sigma;
            intervals.push((
                (central - margin).max(self.floor),
                (central + margin).max(self.floor),
            ));
        }

        ForecastResult::new_with_intervals(values, horizon, intervals)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
