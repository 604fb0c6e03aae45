use chrono::NaiveDate;
use ginger_forecast::analytics;
use ginger_forecast::data::PriceSeries;
use ginger_forecast::models::trend::TrendModel;
use ginger_forecast::models::{ForecastModel, TrainedForecastModel};
use ginger_forecast::utils::future_dates;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ginger Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Generate a year of synthetic daily prices
    let mut rng = StdRng::seed_from_u64(7);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let series = PriceSeries::synthetic(start, 365, &mut rng)?;
    println!("Sample data created: {} daily points\n", series.len());

    // Train the trend model and forecast a week ahead
    let model = TrendModel::new();
    let trained = model.train(&series)?;
    let forecast = trained.forecast_with(7, &mut rng)?;

    println!("{}, 7-day forecast:", trained.name());
    let last_date = series.last_date()?;
    for (date, value) in future_dates(last_date, 7).iter().zip(forecast.values()) {
        println!("  {}: {:.0}", date, value);
    }

    if let Some(intervals) = forecast.intervals() {
        println!("\n95% confidence intervals:");
        for (i, (lower, upper)) in intervals.iter().enumerate() {
            println!("  Day {}: ({:.0}, {:.0})", i + 1, lower, upper);
        }
    }

    // Summary statistics, serialized the way a dashboard would consume them
    let summary = analytics::summarize(&series)?;
    println!("\nPrice summary:\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
