use approx::assert_relative_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use trend_forecast::{ForecastModel, ModelConfig, ReferenceLoader};
use trend_math::{ordinary_least_squares, to_indexed_series};

// Twelve months of 1% monthly growth with a flat CPI
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "date,price,deflator").unwrap();
    for i in 0..12 {
        let price = 100.0 * (0.01 * i as f64).exp();
        writeln!(file, "1988-{:02},{},116.0", i + 1, price).unwrap();
    }

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Load data
    let data_file = create_sample_data();
    let reference = ReferenceLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(reference.len(), 12);

    // 2. Log-space trend of the indexed prices
    let log_prices = to_indexed_series(&reference).log_transform();
    let trend = ordinary_least_squares(&log_prices);
    assert_relative_eq!(trend.slope, 0.01, epsilon = 1e-9);
    assert_relative_eq!(trend.intercept, 100.0_f64.ln(), epsilon = 1e-9);

    // 3. Generate the model with default configuration
    let config = ModelConfig::default();
    let model = ForecastModel::with_config(&reference, &config).unwrap();
    assert_eq!(model.data_len(), 12);

    // 4. Forecast two years out
    assert_relative_eq!(
        model.forecast_price(24),
        100.0 * 0.24_f64.exp(),
        max_relative = 1e-9
    );

    // 5. Query through the calendar: index 24 is January 1990
    let calendar = config.calendar().unwrap();
    let estimate = model.estimate_on(&calendar, "01/1990").unwrap();
    assert_eq!(estimate.index, 24);
    assert!(estimate.forecast);
    assert_relative_eq!(estimate.price, model.forecast_price(24));
    assert_relative_eq!(
        estimate.upper - estimate.lower,
        2.0 * estimate.std_dev,
        max_relative = 1e-9
    );
}

#[test]
fn test_historical_query_uses_stored_series() {
    let data_file = create_sample_data();
    let reference = ReferenceLoader::from_csv(data_file.path()).unwrap();
    let model = ForecastModel::try_generate(&reference).unwrap();
    let calendar = ModelConfig::default().calendar().unwrap();

    let estimate = model.estimate_on(&calendar, "6/1988").unwrap();
    assert_eq!(estimate.index, 5);
    assert!(!estimate.forecast);
    assert_eq!(estimate.price, model.current_price(5).unwrap());
    assert_eq!(estimate.std_dev, model.current_std_dev(5).unwrap());
}

#[test]
fn test_date_before_base_is_rejected() {
    let data_file = create_sample_data();
    let reference = ReferenceLoader::from_csv(data_file.path()).unwrap();
    let model = ForecastModel::try_generate(&reference).unwrap();
    let calendar = ModelConfig::default().calendar().unwrap();

    assert!(model.estimate_on(&calendar, "12/1987").is_err());
    assert!(model.estimate_on(&calendar, "1988-01").is_err());
}
