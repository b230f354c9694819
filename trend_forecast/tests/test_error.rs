use std::io;
use trend_forecast::error::ForecastError;
use trend_math::MathError;

#[test]
fn test_error_conversion() {
    // IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Math error conversion
    let math_error = MathError::InsufficientData("need 2 points".to_string());
    let forecast_error = ForecastError::from(math_error);
    assert!(matches!(forecast_error, ForecastError::Math(_)));

    // JSON error conversion
    let json_error = serde_json::from_str::<Vec<f64>>("[1,").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::JsonError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidSeries("deflator at index 4 is zero".to_string());
    assert_eq!(error.to_string(), "Invalid series: deflator at index 4 is zero");

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));

    let error = ForecastError::from(MathError::CalculationError("divisor is zero".to_string()));
    assert_eq!(
        error.to_string(),
        "Math error: Calculation error: divisor is zero"
    );
}
