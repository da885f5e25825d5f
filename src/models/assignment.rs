//! Provider assignment models.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::coverage::interval::{DateInterval, IntervalError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// One provider's coverage commitment to a zone.
///
/// `start_date` and `end_date` are inclusive calendar days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAssignment {
    pub id: i64,
    pub provider_id: i64,
    pub provider_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active_days: BTreeSet<DayOfWeek>,
    pub bi_weekly: bool,
}

impl ProviderAssignment {
    /// Half-open span of days this assignment covers.
    pub fn interval(&self) -> Result<DateInterval, IntervalError> {
        DateInterval::from_inclusive(self.start_date, self.end_date)
    }

    pub fn matches_period(&self, provider_id: i64, start: NaiveDate, end: NaiveDate) -> bool {
        self.provider_id == provider_id && self.start_date == start && self.end_date == end
    }

    /// Whether the provider works on `date`. Bi-weekly assignments run on the
    /// even weeks counted from `start_date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.start_date || date > self.end_date {
            return false;
        }
        if !self.active_days.contains(&DayOfWeek::from(date.weekday())) {
            return false;
        }
        if self.bi_weekly {
            let week = (date - self.start_date).num_days() / 7;
            return week % 2 == 0;
        }
        true
    }

    /// e.g. `"Monday, Wednesday (Bi-weekly)"`.
    pub fn schedule_label(&self) -> String {
        let days = self
            .active_days
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(", ");
        if self.bi_weekly {
            format!("{days} (Bi-weekly)")
        } else {
            days
        }
    }
}

/// Input for assigning one or more providers to a zone over the same period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInput {
    pub provider_ids: Vec<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active_days: BTreeSet<DayOfWeek>,
    #[serde(default)]
    pub bi_weekly: bool,
}

/// Editable fields of an existing assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentUpdate {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active_days: BTreeSet<DayOfWeek>,
    #[serde(default)]
    pub bi_weekly: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn assignment(bi_weekly: bool) -> ProviderAssignment {
        ProviderAssignment {
            id: 1,
            provider_id: 1,
            provider_name: "Dr. Sarah Kim".into(),
            // 2024-01-01 is a Monday
            start_date: d(2024, 1, 1),
            end_date: d(2024, 1, 31),
            active_days: [DayOfWeek::Monday, DayOfWeek::Wednesday].into_iter().collect(),
            bi_weekly,
        }
    }

    #[test]
    fn interval_is_end_inclusive() {
        let interval = assignment(false).interval().unwrap();
        assert_eq!(interval.start(), d(2024, 1, 1));
        assert_eq!(interval.end(), d(2024, 2, 1));
    }

    #[test]
    fn active_days_respected() {
        let a = assignment(false);
        assert!(a.is_active_on(d(2024, 1, 1)));
        assert!(!a.is_active_on(d(2024, 1, 2)));
        assert!(a.is_active_on(d(2024, 1, 8)));
        assert!(!a.is_active_on(d(2024, 2, 5)));
    }

    #[test]
    fn bi_weekly_skips_odd_weeks() {
        let a = assignment(true);
        assert!(a.is_active_on(d(2024, 1, 1)));
        assert!(!a.is_active_on(d(2024, 1, 8)));
        assert!(a.is_active_on(d(2024, 1, 15)));
        assert!(!a.is_active_on(d(2024, 1, 24)));
    }

    #[test]
    fn schedule_label_lists_days_in_week_order() {
        assert_eq!(assignment(false).schedule_label(), "Monday, Wednesday");
        assert_eq!(assignment(true).schedule_label(), "Monday, Wednesday (Bi-weekly)");
    }

    #[test]
    fn day_names_serialize_lowercase() {
        let json = serde_json::to_string(&DayOfWeek::Thursday).unwrap();
        assert_eq!(json, format!("\"{}\"", DayOfWeek::Thursday.as_str()));
        assert_eq!(DayOfWeek::from(Weekday::Sun), DayOfWeek::Sunday);
    }
}
