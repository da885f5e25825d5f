pub mod commands;

use chrono::NaiveDate;

use crate::coverage::{zone_gaps, CoverageGap, CoverageConfig, IntervalError, WindowSpec};
use crate::models::Zone;

pub const GAP_WARNING: &str =
    "This assignment may leave coverage gaps. Review the timeline to ensure continuous coverage.";

/// Gaps the zone would show over the default planning window.
pub fn default_window_gaps(
    zone: &Zone,
    config: &CoverageConfig,
    today: NaiveDate,
) -> Result<Vec<CoverageGap>, IntervalError> {
    let window = WindowSpec::days(config.default_window_days).resolve(today)?;
    zone_gaps(zone, &window)
}
