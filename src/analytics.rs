//! Descriptive analytics over historical price series

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Window used when comparing recent prices against the preceding period
const TREND_WINDOW: usize = 30;

/// Direction of the recent price movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    /// Recent prices average higher than the preceding period
    Up,
    /// Recent prices average lower than the preceding period
    Down,
    /// No detectable movement, or too little history to compare
    Stable,
}

/// Summary statistics for a price series
#[derive(Debug, Clone, Serialize)]
pub struct PriceSummary {
    /// Mean price over the whole series
    pub avg_price: f64,
    /// Lowest observed price
    pub min_price: f64,
    /// Highest observed price
    pub max_price: f64,
    /// Most recent observed price
    pub current_price: f64,
    /// Direction of the recent movement
    pub price_trend: PriceTrend,
    /// Number of observations
    pub total_points: usize,
    /// Date of the first observation
    pub start_date: NaiveDate,
    /// Date of the most recent observation
    pub end_date: NaiveDate,
}

/// Compute summary statistics for a price series
pub fn summarize(series: &PriceSeries) -> Result<PriceSummary> {
    if series.is_empty() {
        return Err(ForecastError::InsufficientData(
            "cannot summarize an empty price series".to_string(),
        ));
    }

    let prices = series.prices();

    Ok(PriceSummary {
        avg_price: series.mean()?,
        min_price: series.min_price()?,
        max_price: series.max_price()?,
        current_price: series.last_price()?,
        price_trend: detect_trend(&prices),
        total_points: series.len(),
        start_date: series.first_date()?,
        end_date: series.last_date()?,
    })
}

/// Compare the mean of the most recent window against the window before it.
/// Series shorter than two windows report `Stable`.
fn detect_trend(prices: &[f64]) -> PriceTrend {
    if prices.len() < 2 * TREND_WINDOW {
        return PriceTrend::Stable;
    }

    let recent = &prices[prices.len() - TREND_WINDOW..];
    let previous = &prices[prices.len() - 2 * TREND_WINDOW..prices.len() - TREND_WINDOW];
    let recent_avg = recent.iter().copied().mean();
    let previous_avg = previous.iter().copied().mean();

    if recent_avg > previous_avg {
        PriceTrend::Up
    } else if recent_avg < previous_avg {
        PriceTrend::Down
    } else {
        PriceTrend::Stable
    }
}

/// Day-over-day fractional price changes.
///
/// Returns one entry per consecutive pair, so the result is one shorter
/// than the input; series with fewer than two observations yield nothing.
pub fn daily_returns(series: &PriceSeries) -> Vec<f64> {
    let prices = series.prices();
    if prices.len() < 2 {
        return Vec::new();
    }

    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Trailing moving average aligned to the input.
///
/// Positions before a full window is available hold `None`.
pub fn rolling_mean(prices: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(ForecastError::InvalidParameter(
            "Window size must be positive".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(prices.len());
    for i in 0..prices.len() {
        if i + 1 < window {
            out.push(None);
        } else {
            out.push(Some(prices[i + 1 - window..=i].iter().copied().mean()));
        }
    }

    Ok(out)
}
