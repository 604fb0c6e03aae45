use chrono::NaiveDate;
use ginger_forecast::data::PriceSeries;
use ginger_forecast::models::moving_average::MovingAverage;
use ginger_forecast::models::trend::TrendModel;
use ginger_forecast::models::{ForecastModel, TrainedForecastModel};
use ginger_forecast::utils::{forecast_accuracy, train_test_split};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ginger Forecast: Model Comparison");
    println!("=================================\n");

    // Synthetic history with a known upward drift
    let mut rng = StdRng::seed_from_u64(99);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let series = PriceSeries::synthetic(start, 120, &mut rng)?;

    // Hold out the most recent tenth of the observations
    let prices = series.prices();
    let (train_prices, test_prices) = train_test_split(&prices, 0.1);
    let horizon = test_prices.len();
    let train_series = PriceSeries::from_prices(start, train_prices)?;
    println!(
        "Training on {} observations, evaluating on {}\n",
        train_series.len(),
        horizon
    );

    // Trend extrapolation
    let trend = TrendModel::new().train(&train_series)?;
    let trend_forecast = trend.forecast_with(horizon, &mut rng)?;
    let trend_accuracy = forecast_accuracy(trend_forecast.values(), &test_prices)?;
    println!("{}", trend.name());
    println!("{}", trend_accuracy);

    // Moving-average baseline
    let baseline = MovingAverage::new(7)?.train(&train_series)?;
    let baseline_forecast = baseline.forecast_with(horizon, &mut rng)?;
    let baseline_accuracy = forecast_accuracy(baseline_forecast.values(), &test_prices)?;
    println!("{}", baseline.name());
    println!("{}", baseline_accuracy);

    Ok(())
}
