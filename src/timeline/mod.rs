pub mod commands;

use chrono::NaiveDate;
use serde::Serialize;

use crate::coverage::gaps::provider_gaps;
use crate::coverage::segments::{assignment_segments, zone_segments};
use crate::coverage::{
    aggregate_gaps, total_gap_days, zone_gaps, AggregatedGap, CoverageGap, IntervalError,
    TimelineSegment, Window,
};
use crate::models::{ProviderAssignment, Zone};

/// One provider's row on the zone timeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTimeline {
    pub assignment_id: i64,
    pub provider_id: i64,
    pub provider_name: String,
    pub schedule: String,
    /// Whether the provider works today under the assignment's schedule
    pub active_today: bool,
    pub segments: Vec<TimelineSegment>,
    pub gaps: Vec<CoverageGap>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTimeline {
    pub zone_id: i64,
    pub zone_name: String,
    pub window: Window,
    /// The zone bar across all assignments
    pub segments: Vec<TimelineSegment>,
    pub providers: Vec<ProviderTimeline>,
    pub gaps: Vec<CoverageGap>,
    pub gap_days: i64,
    /// Percentage offset of today's marker, when today is inside the window
    pub today_marker: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateGapReport {
    pub window: Window,
    pub gaps: Vec<AggregatedGap>,
}

fn provider_timeline(
    assignment: &ProviderAssignment,
    window: &Window,
    today: NaiveDate,
) -> Result<ProviderTimeline, IntervalError> {
    Ok(ProviderTimeline {
        assignment_id: assignment.id,
        provider_id: assignment.provider_id,
        provider_name: assignment.provider_name.clone(),
        schedule: assignment.schedule_label(),
        active_today: assignment.is_active_on(today),
        segments: assignment_segments(assignment, window)?,
        gaps: provider_gaps(assignment, window)?,
    })
}

pub fn build_zone_timeline(
    zone: &Zone,
    window: &Window,
    today: NaiveDate,
) -> Result<ZoneTimeline, IntervalError> {
    let gaps = zone_gaps(zone, window)?;

    // Only assignments that reach into the window get a row.
    let mut providers = Vec::new();
    if let Some(span) = window.as_interval() {
        for assignment in &zone.provider_assignments {
            if span.overlaps(&assignment.interval()?) {
                providers.push(provider_timeline(assignment, window, today)?);
            }
        }
    }

    Ok(ZoneTimeline {
        zone_id: zone.id,
        zone_name: zone.name.clone(),
        window: *window,
        segments: zone_segments(zone, window)?,
        providers,
        gap_days: total_gap_days(&gaps),
        gaps,
        today_marker: window.percent_of(today),
    })
}

pub fn build_aggregate_report(
    zones: &[Zone],
    window: &Window,
) -> Result<AggregateGapReport, IntervalError> {
    Ok(AggregateGapReport {
        window: *window,
        gaps: aggregate_gaps(zones, window)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{SegmentKind, WindowSpec};
    use crate::models::DayOfWeek;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn zone() -> Zone {
        let mut zone = Zone::new(1, "North".into(), vec!["98103".into()]);
        let assignment = |id: i64, first: NaiveDate, last: NaiveDate| ProviderAssignment {
            id,
            provider_id: id,
            provider_name: format!("Dr. {id}"),
            start_date: first,
            end_date: last,
            active_days: [DayOfWeek::Tuesday].into_iter().collect(),
            bi_weekly: false,
        };
        zone.provider_assignments
            .push(assignment(1, d(2024, 1, 1), d(2024, 1, 10)));
        zone.provider_assignments
            .push(assignment(2, d(2024, 1, 21), d(2024, 2, 29)));
        zone.provider_assignments
            .push(assignment(3, d(2025, 1, 1), d(2025, 2, 1)));
        zone
    }

    #[test]
    fn timeline_has_zone_bar_and_provider_rows() {
        let window = WindowSpec::range(d(2024, 1, 1), d(2024, 1, 31))
            .resolve(d(2024, 1, 1))
            .unwrap();
        let timeline = build_zone_timeline(&zone(), &window, d(2024, 1, 16)).unwrap();

        let kinds: Vec<_> = timeline.segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Coverage, SegmentKind::Gap, SegmentKind::Coverage]
        );
        assert_eq!(timeline.gaps.len(), 1);
        assert_eq!(timeline.gap_days, 10);

        // The 2025 assignment is outside the window.
        assert_eq!(timeline.providers.len(), 2);
        let first = &timeline.providers[0];
        assert_eq!(first.gaps.len(), 1);
        assert_eq!(first.gaps[0].start, d(2024, 1, 11));
        assert_eq!(first.schedule, "Tuesday");

        let marker = timeline.today_marker.unwrap();
        assert!((marker - 15.0 * 100.0 / 31.0).abs() < 1e-9);
    }

    #[test]
    fn provider_rows_flag_who_works_today() {
        let window = WindowSpec::range(d(2024, 1, 1), d(2024, 1, 31))
            .resolve(d(2024, 1, 1))
            .unwrap();
        // 2024-01-23 is a Tuesday inside the second assignment only.
        let timeline = build_zone_timeline(&zone(), &window, d(2024, 1, 23)).unwrap();
        let active: Vec<_> = timeline.providers.iter().map(|p| p.active_today).collect();
        assert_eq!(active, vec![false, true]);
    }

    #[test]
    fn empty_window_has_no_provider_rows() {
        let window = WindowSpec::days(0).resolve(d(2024, 1, 1)).unwrap();
        let timeline = build_zone_timeline(&zone(), &window, d(2024, 1, 1)).unwrap();
        assert!(timeline.providers.is_empty());
        assert!(timeline.segments.is_empty());
    }

    #[test]
    fn today_outside_window_has_no_marker() {
        let window = WindowSpec::range(d(2024, 1, 1), d(2024, 1, 31))
            .resolve(d(2024, 1, 1))
            .unwrap();
        let timeline = build_zone_timeline(&zone(), &window, d(2024, 3, 1)).unwrap();
        assert!(timeline.today_marker.is_none());
    }
}
