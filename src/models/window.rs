use std::fmt;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::ScanlensError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScanlensError> {
        if start > end {
            return Err(ScanlensError::InvalidDate(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` days leading up to and including `today`.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ScanlensError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Whole-day comparison: every instant of the end date is inside.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let d = ts.date();
        d >= self.start && d <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ScanlensError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        ScanlensError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date ({})", s, e))
    })
}
