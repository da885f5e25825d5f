use chrono::NaiveDate;
use serde::Serialize;

use crate::coverage::interval::{DateInterval, IntervalError};
use crate::coverage::window::Window;
use crate::models::{ProviderAssignment, Zone};

/// A maximal uncovered span `[start, end)` inside a query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageGap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl CoverageGap {
    fn between(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        let days = (end - start).num_days();
        if days > 0 {
            Some(Self { start, end, days })
        } else {
            None
        }
    }

    pub fn interval(&self) -> Option<DateInterval> {
        DateInterval::new(self.start, self.end).ok()
    }

    /// Last uncovered calendar day.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }
}

/// Sweeps `covered` in start order and returns the uncovered spans of `window`.
///
/// The frontier only moves forward, so overlapping, back-to-back and nested
/// intervals produce no gap between them. Ties keep their input order.
pub fn compute_gaps(covered: &[DateInterval], window: &Window) -> Vec<CoverageGap> {
    if window.is_empty() {
        return Vec::new();
    }
    if covered.is_empty() {
        return CoverageGap::between(window.start, window.end)
            .into_iter()
            .collect();
    }

    let mut sorted: Vec<&DateInterval> = covered.iter().collect();
    sorted.sort_by_key(|i| i.start());

    let mut gaps = Vec::new();
    let mut cursor = window.start;

    for interval in sorted {
        if interval.start() > cursor && cursor < window.end {
            let gap_end = interval.start().min(window.end);
            if let Some(gap) = CoverageGap::between(cursor, gap_end) {
                gaps.push(gap);
            }
        }
        cursor = cursor.max(interval.end());
    }

    if cursor < window.end {
        if let Some(gap) = CoverageGap::between(cursor, window.end) {
            gaps.push(gap);
        }
    }

    gaps
}

pub fn zone_gaps(zone: &Zone, window: &Window) -> Result<Vec<CoverageGap>, IntervalError> {
    Ok(compute_gaps(&zone.covered_intervals()?, window))
}

/// Portions of `window` before the assignment starts and after it ends.
pub fn provider_gaps(
    assignment: &ProviderAssignment,
    window: &Window,
) -> Result<Vec<CoverageGap>, IntervalError> {
    let interval = assignment.interval()?;
    Ok(compute_gaps(std::slice::from_ref(&interval), window))
}

pub fn total_gap_days(gaps: &[CoverageGap]) -> i64 {
    gaps.iter().map(|g| g.days).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::window::WindowSpec;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn span(first: NaiveDate, last: NaiveDate) -> DateInterval {
        DateInterval::from_inclusive(first, last).unwrap()
    }

    #[test]
    fn no_assignments_yields_whole_window() {
        let window = WindowSpec::days(30).resolve(d(2024, 3, 1)).unwrap();
        let gaps = compute_gaps(&[], &window);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start, d(2024, 3, 1));
        assert_eq!(gaps[0].days, 30);
    }

    #[test]
    fn back_to_back_assignments_leave_no_gap() {
        let window = WindowSpec::range(d(2024, 1, 1), d(2024, 12, 31))
            .resolve(d(2024, 1, 1))
            .unwrap();
        let covered = [
            span(d(2024, 1, 1), d(2024, 6, 30)),
            span(d(2024, 7, 1), d(2024, 12, 31)),
        ];
        assert!(compute_gaps(&covered, &window).is_empty());
    }

    #[test]
    fn overlapping_assignments_collapse() {
        let day = |n: i64| d(2024, 1, 1) + Duration::days(n - 1);
        let window = WindowSpec::range(day(1), day(20)).resolve(day(1)).unwrap();
        let covered = [span(day(1), day(10)), span(day(5), day(15))];

        let gaps = compute_gaps(&covered, &window);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start, day(16));
        assert_eq!(gaps[0].last_day(), day(20));
        assert_eq!(gaps[0].days, 5);
    }

    #[test]
    fn leading_middle_and_trailing_gaps() {
        let window = WindowSpec::range(d(2024, 1, 1), d(2024, 1, 31))
            .resolve(d(2024, 1, 1))
            .unwrap();
        let covered = [
            span(d(2024, 1, 20), d(2024, 1, 25)),
            span(d(2024, 1, 5), d(2024, 1, 10)),
        ];
        let gaps = compute_gaps(&covered, &window);
        let ranges: Vec<_> = gaps.iter().map(|g| (g.start, g.end, g.days)).collect();
        assert_eq!(
            ranges,
            vec![
                (d(2024, 1, 1), d(2024, 1, 5), 4),
                (d(2024, 1, 11), d(2024, 1, 20), 9),
                (d(2024, 1, 26), d(2024, 2, 1), 6),
            ]
        );
        assert_eq!(total_gap_days(&gaps), 19);
    }

    #[test]
    fn assignments_outside_window_are_ignored() {
        let window = WindowSpec::range(d(2024, 2, 1), d(2024, 2, 10))
            .resolve(d(2024, 2, 1))
            .unwrap();
        let covered = [
            span(d(2023, 1, 1), d(2023, 12, 31)),
            span(d(2024, 5, 1), d(2024, 6, 1)),
        ];
        let gaps = compute_gaps(&covered, &window);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].days, 10);
    }

    #[test]
    fn nested_assignment_does_not_retreat_frontier() {
        let window = WindowSpec::range(d(2024, 1, 1), d(2024, 1, 31))
            .resolve(d(2024, 1, 1))
            .unwrap();
        let covered = [
            span(d(2024, 1, 1), d(2024, 1, 20)),
            span(d(2024, 1, 3), d(2024, 1, 4)),
        ];
        let gaps = compute_gaps(&covered, &window);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start, d(2024, 1, 21));
    }

    #[test]
    fn empty_window_has_no_gaps() {
        let window = WindowSpec::days(0).resolve(d(2024, 1, 1)).unwrap();
        assert!(compute_gaps(&[], &window).is_empty());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let window = WindowSpec::days(60).resolve(d(2024, 1, 1)).unwrap();
        let covered = [span(d(2024, 1, 10), d(2024, 1, 20))];
        assert_eq!(compute_gaps(&covered, &window), compute_gaps(&covered, &window));
    }
}
