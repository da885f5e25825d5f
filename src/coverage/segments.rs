use chrono::NaiveDate;
use serde::Serialize;

use crate::coverage::gaps::{compute_gaps, CoverageGap};
use crate::coverage::interval::{DateInterval, IntervalError};
use crate::coverage::window::Window;
use crate::models::{ProviderAssignment, Zone};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Coverage,
    Gap,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Coverage => "coverage",
            SegmentKind::Gap => "gap",
        }
    }
}

/// A covered date span, optionally tied back to the assignment it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoveredSpan {
    pub interval: DateInterval,
    pub assignment_id: Option<i64>,
}

impl CoveredSpan {
    pub fn for_assignment(assignment: &ProviderAssignment) -> Result<Self, IntervalError> {
        Ok(Self {
            interval: assignment.interval()?,
            assignment_id: Some(assignment.id),
        })
    }
}

/// One piece of a timeline bar; `left` and `width` are percentages of the window.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    pub kind: SegmentKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
    pub left: f64,
    pub width: f64,
    pub assignment_id: Option<i64>,
}

struct Candidate {
    kind: SegmentKind,
    interval: DateInterval,
    assignment_id: Option<i64>,
}

struct SegmentBuilder<'a> {
    window: &'a Window,
    segments: Vec<TimelineSegment>,
}

impl<'a> SegmentBuilder<'a> {
    fn push(
        &mut self,
        kind: SegmentKind,
        start: NaiveDate,
        end: NaiveDate,
        assignment_id: Option<i64>,
    ) {
        if end <= start {
            return;
        }

        // Consecutive gap pieces render as one block.
        if kind == SegmentKind::Gap {
            if let Some(last) = self.segments.last_mut() {
                if last.kind == SegmentKind::Gap && last.end == start {
                    last.end = end;
                    last.days = (end - last.start).num_days();
                    last.width = self.window.offset_percent(last.days);
                    return;
                }
            }
        }

        let days = (end - start).num_days();
        self.segments.push(TimelineSegment {
            kind,
            start,
            end,
            days,
            left: self.window.offset_percent((start - self.window.start).num_days()),
            width: self.window.offset_percent(days),
            assignment_id,
        });
    }
}

/// Lays covered spans and gaps out as an exact partition of `window`.
///
/// Holes not described by `gaps` are filled with implicit gap segments, and
/// coverage overlapping what is already laid out is trimmed to the frontier,
/// so the result is sorted, contiguous and overlap-free.
pub fn compose_segments(
    covered: &[CoveredSpan],
    gaps: &[CoverageGap],
    window: &Window,
) -> Vec<TimelineSegment> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<Candidate> = covered
        .iter()
        .filter_map(|span| {
            window.clip(&span.interval).map(|interval| Candidate {
                kind: SegmentKind::Coverage,
                interval,
                assignment_id: span.assignment_id,
            })
        })
        .chain(gaps.iter().filter_map(|gap| {
            gap.interval()
                .and_then(|interval| window.clip(&interval))
                .map(|interval| Candidate {
                    kind: SegmentKind::Gap,
                    interval,
                    assignment_id: None,
                })
        }))
        .collect();
    candidates.sort_by_key(|c| c.interval.start());

    let mut builder = SegmentBuilder {
        window,
        segments: Vec::with_capacity(candidates.len() * 2 + 1),
    };
    let mut filled_up_to = window.start;

    for candidate in candidates {
        let end = candidate.interval.end();
        if end <= filled_up_to {
            continue;
        }
        let start = candidate.interval.start().max(filled_up_to);
        if start > filled_up_to {
            builder.push(SegmentKind::Gap, filled_up_to, start, None);
        }
        builder.push(candidate.kind, start, end, candidate.assignment_id);
        filled_up_to = end;
    }

    if filled_up_to < window.end {
        builder.push(SegmentKind::Gap, filled_up_to, window.end, None);
    }

    builder.segments
}

/// Covered spans plus the gaps between them for a set of intervals.
pub fn segments_for(covered: &[CoveredSpan], window: &Window) -> Vec<TimelineSegment> {
    let intervals: Vec<DateInterval> = covered.iter().map(|c| c.interval).collect();
    let gaps = compute_gaps(&intervals, window);
    compose_segments(covered, &gaps, window)
}

/// The zone bar: every assignment against the zone's gaps.
pub fn zone_segments(zone: &Zone, window: &Window) -> Result<Vec<TimelineSegment>, IntervalError> {
    let covered = zone
        .provider_assignments
        .iter()
        .map(CoveredSpan::for_assignment)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(segments_for(&covered, window))
}

/// A single provider's bar: its own span against the rest of the window.
pub fn assignment_segments(
    assignment: &ProviderAssignment,
    window: &Window,
) -> Result<Vec<TimelineSegment>, IntervalError> {
    let covered = CoveredSpan::for_assignment(assignment)?;
    Ok(segments_for(std::slice::from_ref(&covered), window))
}
