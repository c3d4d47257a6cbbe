use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive calendar-day range used by statements and budget reports.
///
/// The end date covers its whole day: a window whose start and end are the
/// same date matches every instant of that day. An inverted window matches
/// nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Midnight at the start of the first day.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_utc()
    }

    /// The last instant of the final day (23:59:59.999).
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("end of day is a valid time")
            .and_utc()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_instant() && instant <= self.end_instant()
    }
}
