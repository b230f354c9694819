//! Mapping between calendar months and series indices
//!
//! Reference data is monthly, so index `i` is `i` months after the base
//! month: `index = (year - base_year) * 12 + (month - base_month)`.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Monthly calendar anchored at the month of series index 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    base_year: i32,
    base_month: u32,
}

impl MonthCalendar {
    pub fn new(base_year: i32, base_month: u32) -> Result<Self> {
        check_month(base_month)?;
        Ok(Self {
            base_year,
            base_month,
        })
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    pub fn base_month(&self) -> u32 {
        self.base_month
    }

    /// Signed month offset of `year`/`month` from the base month
    pub fn offset(&self, year: i32, month: u32) -> i64 {
        (i64::from(year) - i64::from(self.base_year)) * 12
            + (i64::from(month) - i64::from(self.base_month))
    }

    /// Series index of `year`/`month`; months before the base are rejected
    pub fn index_of(&self, year: i32, month: u32) -> Result<usize> {
        check_month(month)?;

        let offset = self.offset(year, month);
        usize::try_from(offset).map_err(|_| {
            ForecastError::InvalidDate(format!(
                "Earliest date is {:02}/{}, got {:02}/{}",
                self.base_month, self.base_year, month, year
            ))
        })
    }

    /// Series index of the month containing `date`
    pub fn index_of_date(&self, date: NaiveDate) -> Result<usize> {
        self.index_of(date.year(), date.month())
    }

    /// Series index of a `MM/YYYY` string
    pub fn index_of_str(&self, input: &str) -> Result<usize> {
        let (year, month) = parse_month_year(input)?;
        self.index_of(year, month)
    }

    /// First day of the month at `index`
    pub fn date_of(&self, index: usize) -> Result<NaiveDate> {
        let months = i64::from(self.base_month - 1)
            + i64::try_from(index)
                .map_err(|_| ForecastError::InvalidDate(format!("Index {} is too large", index)))?;

        let year = i64::from(self.base_year) + months / 12;
        let month = (months % 12) as u32 + 1;

        i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
            .ok_or_else(|| {
                ForecastError::InvalidDate(format!("Index {} is outside the supported range", index))
            })
    }

    /// `MM/YYYY` label of the month at `index`
    pub fn label_of(&self, index: usize) -> Result<String> {
        let date = self.date_of(index)?;
        Ok(format!("{:02}/{}", date.month(), date.year()))
    }
}

fn check_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ForecastError::InvalidDate(format!(
            "Month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// Parse `M/YYYY` or `MM/YYYY` into `(year, month)`.
///
/// The month is one or two digits in 1-12 (a leading zero is allowed);
/// the year is one or more digits.
pub fn parse_month_year(input: &str) -> Result<(i32, u32)> {
    let format_error =
        || ForecastError::InvalidDate(format!("Incorrect date format: {:?}, expected MM/YYYY", input));

    let (month_part, year_part) = input.trim().split_once('/').ok_or_else(format_error)?;

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if month_part.len() > 2 || !is_digits(month_part) || !is_digits(year_part) {
        return Err(format_error());
    }

    let month: u32 = month_part.parse().map_err(|_| format_error())?;
    check_month(month)?;

    let year: i32 = year_part
        .parse()
        .map_err(|_| ForecastError::InvalidDate(format!("Year out of range: {}", year_part)))?;

    Ok((year, month))
}
