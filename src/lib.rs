//! # Ginger Forecast
//!
//! A Rust library for forecasting ginger commodity prices from historical
//! daily price data.
//!
//! ## Features
//!
//! - Validated daily price series with CSV loading
//! - Trend-extrapolation forecasting over a trailing window, with a
//!   noisy-mean fallback for short histories
//! - Moving-average baseline model
//! - Descriptive analytics (price summary, daily returns, rolling mean)
//! - Forecast accuracy evaluation (MAE, RMSE, MAPE, direction accuracy)
//!
//! Randomness is injected through the forecast call, so callers that need
//! reproducible output pass a seeded generator instead of relying on
//! process-wide state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ginger_forecast::data::DataLoader;
//! use ginger_forecast::models::trend::TrendModel;
//! use ginger_forecast::models::{ForecastModel, TrainedForecastModel};
//!
//! fn main() -> ginger_forecast::error::Result<()> {
//!     // Load historical prices
//!     let series = DataLoader::from_csv("data/ginger_prices.csv")?;
//!
//!     // Train the trend model
//!     let model = TrendModel::new();
//!     let trained = model.train(&series)?;
//!
//!     // Forecast the next 7 days
//!     let forecast = trained.forecast(7)?;
//!     println!("{:?}", forecast.values());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod data;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use crate::analytics::{summarize, PriceSummary, PriceTrend};
pub use crate::data::{DataLoader, PricePoint, PriceSeries};
pub use crate::error::ForecastError;
pub use crate::models::trend::TrendModel;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};

/// Minimum permissible price, in the local currency unit. Predicted and
/// generated prices are floored at this value.
pub const MIN_PRICE: f64 = 10_000.0;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
