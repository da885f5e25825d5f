use serde::{Deserialize, Serialize};

/// Tunable windows and workload thresholds for coverage reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverageConfig {
    /// Window used for dashboard gap counts and save-time gap checks
    pub default_window_days: u32,

    /// Window used for the cross-zone aggregate gap listing
    pub aggregate_window_days: u32,

    /// Patients-per-provider ratio above which a zone is flagged
    pub ratio_warning_above: u32,
    pub ratio_critical_above: u32,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            default_window_days: 90,
            aggregate_window_days: 60,
            ratio_warning_above: 75,
            ratio_critical_above: 100,
        }
    }
}
