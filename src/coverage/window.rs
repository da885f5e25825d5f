use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::coverage::interval::{DateInterval, IntervalError};

/// How a caller asks for a window: relative to today or with explicit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WindowSpec {
    Days { days: u32 },
    /// `start` and `end` are both inclusive calendar days.
    Range { start: NaiveDate, end: NaiveDate },
}

impl WindowSpec {
    pub fn days(days: u32) -> Self {
        WindowSpec::Days { days }
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        WindowSpec::Range { start, end }
    }

    /// Fails when the window would end past the last date chrono can represent.
    pub fn resolve(&self, today: NaiveDate) -> Result<Window, IntervalError> {
        match *self {
            WindowSpec::Days { days } => {
                let end = today
                    .checked_add_days(Days::new(u64::from(days)))
                    .ok_or(IntervalError::OutOfRange { start: today })?;
                Ok(Window { start: today, end })
            }
            // A reversed range collapses to an empty window at `start`.
            WindowSpec::Range { start, end } => {
                let end = end
                    .succ_opt()
                    .ok_or(IntervalError::OutOfRange { start })?;
                Ok(Window {
                    start,
                    end: end.max(start),
                })
            }
        }
    }
}

/// Resolved half-open query window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    pub fn as_interval(&self) -> Option<DateInterval> {
        if self.is_empty() {
            return None;
        }
        DateInterval::new(self.start, self.end).ok()
    }

    pub fn clip(&self, interval: &DateInterval) -> Option<DateInterval> {
        interval.clip(self.start, self.end)
    }

    /// Position of `date` as a percentage of the window width, if it falls inside.
    pub fn percent_of(&self, date: NaiveDate) -> Option<f64> {
        if self.is_empty() || date < self.start || date >= self.end {
            return None;
        }
        Some(self.offset_percent((date - self.start).num_days()))
    }

    pub(crate) fn offset_percent(&self, offset_days: i64) -> f64 {
        offset_days as f64 * 100.0 / self.total_days() as f64
    }
}
