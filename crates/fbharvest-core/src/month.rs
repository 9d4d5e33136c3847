//! The calendar month a harvest run targets.
//!
//! Built once per run from a six-digit `YYYYMM` argument. Validation happens
//! here, before any page session is opened, so a malformed month never costs
//! a network round-trip.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::CoreError;

/// First year with timeline data.
pub const FIRST_YEAR: i32 = 2004;

/// First month of [`FIRST_YEAR`] with timeline data.
pub const FIRST_MONTH: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    year: i32,
    month: u32,
    start: NaiveDateTime,
}

impl TargetMonth {
    /// Parses a `YYYYMM` string, bounding the year by the local clock.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTargetMonth`] when the input is not six
    /// ASCII digits or names a month outside the harvestable range.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::parse_with_current_year(raw, chrono::Local::now().year())
    }

    /// Same as [`TargetMonth::parse`] with an explicit upper bound for the year.
    ///
    /// # Errors
    ///
    /// See [`TargetMonth::parse`].
    pub fn parse_with_current_year(raw: &str, current_year: i32) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidTargetMonth {
            raw: raw.to_owned(),
            reason: reason.to_owned(),
        };

        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected six digits in YYYYMM form"));
        }

        let year: i32 = raw[..4]
            .parse()
            .map_err(|_| invalid("year is not a number"))?;
        let month: u32 = raw[4..]
            .parse()
            .map_err(|_| invalid("month is not a number"))?;

        Self::new(year, month, current_year).map_err(|e| match e {
            CoreError::InvalidTargetMonth { reason, .. } => invalid(&reason),
            other => other,
        })
    }

    /// Builds a target month from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTargetMonth`] when `month` is not in
    /// `1..=12`, `year` is outside `[2004, current_year]`, or the month
    /// predates February 2004.
    pub fn new(year: i32, month: u32, current_year: i32) -> Result<Self, CoreError> {
        let invalid = |reason: String| CoreError::InvalidTargetMonth {
            raw: format!("{year:04}{month:02}"),
            reason,
        };

        if !(1..=12).contains(&month) {
            return Err(invalid(format!("month {month} is not in 1..=12")));
        }
        if year < FIRST_YEAR || year > current_year {
            return Err(invalid(format!("no timeline data is available for {year}")));
        }
        if year == FIRST_YEAR && month < FIRST_MONTH {
            return Err(invalid(format!(
                "no timeline data is available before {FIRST_YEAR}{FIRST_MONTH:02}"
            )));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| invalid("calendar rejected the date".to_owned()))?;

        Ok(Self { year, month, start })
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Midnight on the first day of the month. Anything strictly earlier lies
    /// past the traversal boundary.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Month-equality predicate used by the selection pass.
    #[must_use]
    pub fn contains(&self, time: &NaiveDateTime) -> bool {
        (time.year(), time.month()) == (self.year, self.month)
    }

    /// The `YYYYMM` form used in artifact names.
    #[must_use]
    pub fn as_yyyymm(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

#[cfg(test)]
#[path = "month_test.rs"]
mod tests;
