pub mod aggregate;
pub mod config;
pub mod gaps;
pub mod interval;
pub mod segments;
pub mod window;

pub use aggregate::{aggregate_gaps, multi_zone_patient_count, provider_ratio, AggregatedGap};
pub use config::CoverageConfig;
pub use gaps::{compute_gaps, total_gap_days, zone_gaps, CoverageGap};
pub use interval::{DateInterval, IntervalError};
pub use segments::{compose_segments, SegmentKind, TimelineSegment};
pub use window::{Window, WindowSpec};
