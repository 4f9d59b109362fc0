use crate::error::{Result, StatsError};
use chrono::NaiveDate;

/// Calendar-date range a report covers.
///
/// Both bounds are widened to whole days when turned into timestamps: the
/// start becomes midnight UTC and the end becomes the last second of its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(StatsError::InvalidInput(format!(
                "end date {} must not be before start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `YYYY-MM-DD`, the form the search endpoint expects.
    pub fn start_date(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_date(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// RFC 3339 timestamp, the form listing endpoints and the date filter expect.
    pub fn start_timestamp(&self) -> String {
        format!("{}T00:00:00Z", self.start_date())
    }

    pub fn end_timestamp(&self) -> String {
        format!("{}T23:59:59Z", self.end_date())
    }
}
