use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use ginger_forecast::data::PriceSeries;
use ginger_forecast::error::ForecastError;
use ginger_forecast::models::moving_average::MovingAverage;
use ginger_forecast::models::trend::TrendModel;
use ginger_forecast::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use ginger_forecast::MIN_PRICE;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn series_from(prices: Vec<f64>) -> PriceSeries {
    PriceSeries::from_prices(start_date(), prices).unwrap()
}

/// Trend model with all noise disabled, so forecasts are exactly the
/// central estimate.
fn noiseless_model() -> TrendModel {
    TrendModel::with_params(30, MIN_PRICE, 0.0, 0.0).unwrap()
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(30)]
fn forecast_has_requested_length(#[case] horizon: usize) {
    let mut rng = StdRng::seed_from_u64(1);

    // Both the fallback path (5 observations) and the trend path (30, 90)
    for len in [5usize, 30, 90] {
        let series = series_from((0..len).map(|i| 20_000.0 + i as f64).collect());
        let trained = TrendModel::new().train(&series).unwrap();
        let forecast = trained.forecast_with(horizon, &mut rng).unwrap();

        assert_eq!(forecast.values().len(), horizon);
        assert_eq!(forecast.horizon(), horizon);
    }
}

#[test]
fn every_prediction_respects_the_floor() {
    let mut rng = StdRng::seed_from_u64(2);

    // Prices sit just above the floor, so unclamped draws would cross it
    let series = series_from(vec![10_050.0; 40]);
    let trained = TrendModel::new().train(&series).unwrap();
    let forecast = trained.forecast_with(200, &mut rng).unwrap();

    for &value in forecast.values() {
        assert!(value >= MIN_PRICE, "prediction {} fell below the floor", value);
    }
}

#[test]
fn short_history_falls_back_to_noisy_mean() {
    let mut rng = StdRng::seed_from_u64(3);

    // Strong downward trend that the fallback path must ignore
    let prices: Vec<f64> = (0..10).map(|i| 30_000.0 - 500.0 * i as f64).collect();
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;

    let series = series_from(prices);
    let trained = TrendModel::new().train(&series).unwrap();
    let forecast = trained.forecast_with(500, &mut rng).unwrap();

    // Draws are centered on the series average with sigma = 0.02 * avg,
    // so the sample mean stays within a few standard errors of it
    let sample_mean = forecast.values().iter().sum::<f64>() / 500.0;
    let std_err = 0.02 * avg / (500f64).sqrt();
    assert!(
        (sample_mean - avg).abs() < 8.0 * std_err,
        "sample mean {} strayed from series average {}",
        sample_mean,
        avg
    );

    // Predictions are independent across the horizon: no drift between the
    // first and second half, unlike the 500/day slope in the input
    let first_half = forecast.values()[..250].iter().sum::<f64>() / 250.0;
    let second_half = forecast.values()[250..].iter().sum::<f64>() / 250.0;
    assert!(
        (first_half - second_half).abs() < 500.0,
        "fallback predictions drifted: {} vs {}",
        first_half,
        second_half
    );
}

#[test]
fn trend_path_extrapolates_from_last_price() {
    // 30 prices rising by 100 per day
    let prices: Vec<f64> = (0..30).map(|i| 20_000.0 + 100.0 * i as f64).collect();
    let series = series_from(prices.clone());

    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let forecast = trained.forecast_with(5, &mut rng).unwrap();

    let first_avg = prices[..15].iter().sum::<f64>() / 15.0;
    let second_avg = prices[15..].iter().sum::<f64>() / 15.0;
    let trend_factor = (second_avg - first_avg) / 30.0;
    let last_price = prices[29];

    for (i, &value) in forecast.values().iter().enumerate() {
        let expected = (last_price + trend_factor * (i as f64 + 1.0)).max(MIN_PRICE);
        assert_approx_eq!(value, expected, 1e-9);
    }
}

#[test]
fn trend_window_uses_only_the_most_recent_observations() {
    // Early history is far above the recent regime; the estimate must come
    // from the trailing 30 observations alone
    let mut prices: Vec<f64> = vec![50_000.0; 30];
    prices.extend((0..30).map(|i| 20_000.0 + 100.0 * i as f64));
    let series = series_from(prices.clone());

    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let forecast = trained.forecast_with(3, &mut rng).unwrap();

    let window = &prices[30..];
    let first_avg = window[..15].iter().sum::<f64>() / 15.0;
    let second_avg = window[15..].iter().sum::<f64>() / 15.0;
    let trend_factor = (second_avg - first_avg) / 30.0;
    let last_price = prices[59];

    for (i, &value) in forecast.values().iter().enumerate() {
        let expected = last_price + trend_factor * (i as f64 + 1.0);
        assert_approx_eq!(value, expected, 1e-9);
    }
}

#[test]
fn flat_window_forecasts_the_last_price() {
    let series = series_from(vec![20_000.0; 30]);
    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(6);
    let forecast = trained.forecast_with(7, &mut rng).unwrap();

    // Identical halves give a zero trend factor
    for &value in forecast.values() {
        assert_approx_eq!(value, 20_000.0, 1e-12);
    }
}

#[test]
fn rising_window_yields_increasing_forecasts() {
    // 30 prices rising linearly from 10 000 to 19 000
    let step = 9_000.0 / 29.0;
    let prices: Vec<f64> = (0..30).map(|i| 10_000.0 + step * i as f64).collect();
    let last_price = prices[29];
    let series = series_from(prices);

    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let forecast = trained.forecast_with(10, &mut rng).unwrap();

    for pair in forecast.values().windows(2) {
        assert!(pair[1] > pair[0], "forecast must rise day over day");
    }
    for &value in forecast.values() {
        assert!(value > last_price);
    }
}

#[test]
fn window_minus_one_uses_the_fallback_path() {
    // 29 rising prices: the trend path would predict above the last price,
    // the fallback predicts the series average exactly when noise is off
    let prices: Vec<f64> = (0..29).map(|i| 20_000.0 + 100.0 * i as f64).collect();
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;
    let series = series_from(prices);

    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let forecast = trained.forecast_with(4, &mut rng).unwrap();

    for &value in forecast.values() {
        assert_approx_eq!(value, avg, 1e-9);
    }
}

#[test]
fn empty_series_is_insufficient_data() {
    let series = PriceSeries::new(Vec::new()).unwrap();
    let result = TrendModel::new().train(&series);

    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[test]
fn steep_decline_clamps_to_the_floor() {
    // Falling 1 000 per day; the fitted drift of -500 per day crosses the
    // floor on the second forecast day
    let prices: Vec<f64> = (0..30).map(|i| 40_000.0 - 1_000.0 * i as f64).collect();
    let series = series_from(prices);

    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let forecast = trained.forecast_with(6, &mut rng).unwrap();

    assert_approx_eq!(forecast.values()[0], 10_500.0, 1e-9);
    for &value in &forecast.values()[1..] {
        assert_approx_eq!(value, MIN_PRICE, 1e-9);
    }
}

#[test]
fn identical_seeds_give_identical_forecasts() {
    let series = series_from((0..40).map(|i| 20_000.0 + 50.0 * i as f64).collect());
    let trained = TrendModel::new().train(&series).unwrap();

    let a = trained
        .forecast_with(7, &mut StdRng::seed_from_u64(11))
        .unwrap();
    let b = trained
        .forecast_with(7, &mut StdRng::seed_from_u64(11))
        .unwrap();

    assert_eq!(a.values(), b.values());
}

#[test]
fn zero_horizon_is_rejected() {
    let series = series_from(vec![20_000.0; 30]);
    let trained = TrendModel::new().train(&series).unwrap();

    assert!(matches!(
        trained.forecast(0),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn intervals_bracket_the_prediction() {
    let series = series_from(vec![20_000.0; 30]);
    let trained = noiseless_model().train(&series).unwrap();
    let mut rng = StdRng::seed_from_u64(12);
    let forecast = trained.forecast_with(5, &mut rng).unwrap();

    let intervals = forecast.intervals().unwrap();
    assert_eq!(intervals.len(), 5);
    for ((lower, upper), &value) in intervals.iter().zip(forecast.values()) {
        assert!(lower <= upper);
        assert!(*lower >= MIN_PRICE);
        assert!(value >= *lower && value <= *upper);
    }
}

#[test]
fn model_parameter_validation() {
    assert!(TrendModel::with_params(1, MIN_PRICE, 0.015, 0.02).is_err());
    assert!(TrendModel::with_params(30, -1.0, 0.015, 0.02).is_err());
    assert!(TrendModel::with_params(30, MIN_PRICE, -0.1, 0.02).is_err());
    assert!(TrendModel::with_params(30, MIN_PRICE, 0.015, f64::NAN).is_err());
    assert!(MovingAverage::new(0).is_err());

    // And valid parameters go through
    let model = TrendModel::with_params(10, 5_000.0, 0.01, 0.03).unwrap();
    assert_eq!(model.window(), 10);
    assert_approx_eq!(model.floor(), 5_000.0);
}

#[test]
fn moving_average_forecasts_the_trailing_mean() {
    let prices: Vec<f64> = (1..=10).map(|i| i as f64 * 1_000.0).collect();
    let series = series_from(prices);

    let trained = MovingAverage::new(4).unwrap().train(&series).unwrap();
    let forecast = trained.forecast(3).unwrap();

    let expected = (7_000.0 + 8_000.0 + 9_000.0 + 10_000.0) / 4.0;
    for &value in forecast.values() {
        assert_approx_eq!(value, expected, 1e-9);
    }
}

#[test]
fn moving_average_needs_a_full_window() {
    let series = series_from(vec![20_000.0; 3]);
    let result = MovingAverage::new(5).unwrap().train(&series);

    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[test]
fn forecast_result_validates_lengths() {
    assert!(ForecastResult::new(vec![20_000.0; 3], 3).is_ok());
    assert!(ForecastResult::new(vec![20_000.0; 3], 4).is_err());
    assert!(
        ForecastResult::new_with_intervals(vec![20_000.0; 3], 3, vec![(19_000.0, 21_000.0); 2])
            .is_err()
    );
}
