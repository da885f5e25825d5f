use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("interval end {end} is before start {start}")]
    Reversed { start: NaiveDate, end: NaiveDate },

    #[error("date range starting {start} runs past the last supported date")]
    OutOfRange { start: NaiveDate },
}

/// Half-open calendar range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds the interval covering every day from `first` through `last`.
    pub fn from_inclusive(first: NaiveDate, last: NaiveDate) -> Result<Self, IntervalError> {
        if last < first {
            return Err(IntervalError::Reversed {
                start: first,
                end: last,
            });
        }
        let end = last
            .succ_opt()
            .ok_or(IntervalError::OutOfRange { start: first })?;
        Ok(Self { start: first, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whole days between start and end; a same-day interval yields 0.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection with `[window_start, window_end)`, or `None` when they share no day.
    pub fn clip(&self, window_start: NaiveDate, window_end: NaiveDate) -> Option<DateInterval> {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        if start < end {
            Some(DateInterval { start, end })
        } else {
            None
        }
    }

    /// Day offset of this interval's start from `origin`.
    pub fn offset_days(&self, origin: NaiveDate) -> i64 {
        (self.start - origin).num_days()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }

    /// Inclusive last day, `None` for an empty interval.
    pub fn last_day(&self) -> Option<NaiveDate> {
        if self.is_empty() {
            None
        } else {
            self.end.pred_opt()
        }
    }
}
