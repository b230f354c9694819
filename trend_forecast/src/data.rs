//! Loading reference data (nominal price + deflator per month)

use crate::error::{ForecastError, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};
use trend_math::{ReferencePoint, ReferenceSeries};

/// One CSV row. Columns other than price and deflator (e.g. `date`) are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Price", alias = "close", alias = "Close")]
    price: f64,
    #[serde(alias = "Deflator", alias = "cpi", alias = "CPI")]
    deflator: f64,
}

impl From<CsvRow> for ReferencePoint {
    fn from(row: CsvRow) -> Self {
        ReferencePoint {
            price: row.price,
            deflator: row.deflator,
        }
    }
}

/// Data loader for reference series
#[derive(Debug)]
pub struct ReferenceLoader;

impl ReferenceLoader {
    /// Load a reference series from a CSV file with a header row.
    ///
    /// The expected format is:
    /// date,price,deflator
    /// 1988-01,256.98,116.0
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<ReferenceSeries> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Load a reference series from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<ReferenceSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let series = csv_reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(ReferencePoint::from))
            .collect::<std::result::Result<ReferenceSeries, csv::Error>>()?;

        Self::non_empty(series)
    }

    /// Parse the bundled `[[price, deflator], ...]` JSON layout
    pub fn from_json_str(json: &str) -> Result<ReferenceSeries> {
        let pairs: Vec<(f64, f64)> = serde_json::from_str(json)?;
        Self::non_empty(ReferenceSeries::from_pairs(pairs))
    }

    /// Load the bundled `[[price, deflator], ...]` JSON layout from a file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ReferenceSeries> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Pick the parser from the file extension; anything but `.json` is read as CSV
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ReferenceSeries> {
        let is_json = path
            .as_ref()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_csv(path)
        }
    }

    fn non_empty(series: ReferenceSeries) -> Result<ReferenceSeries> {
        if series.is_empty() {
            return Err(ForecastError::DataError(
                "No data found in input".to_string(),
            ));
        }
        debug!(points = series.len(), "loaded reference series");
        Ok(series)
    }
}
