use ginger_forecast::error::ForecastError;
use std::io;

#[test]
fn io_errors_convert() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);

    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let text = format!("{}", forecast_error);
    assert!(text.contains("IO error"));
    assert!(text.contains("file not found"));
}

#[test]
fn display_messages_carry_context() {
    let error = ForecastError::InsufficientData("empty price series".to_string());
    assert!(format!("{}", error).contains("Insufficient data"));
    assert!(format!("{}", error).contains("empty price series"));

    let error = ForecastError::InvalidParameter("Window size must be at least 2".to_string());
    assert!(format!("{}", error).contains("Invalid parameter"));

    let error = ForecastError::DataError("dates must be unique and ascending".to_string());
    assert!(format!("{}", error).contains("Data error"));
}
