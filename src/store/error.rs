//! Error types for zone store operations.

use chrono::NaiveDate;

pub type StoreResult<T> = Result<T, StoreError>;

/// Input rejected at save time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Zone name is required")]
    EmptyZoneName,

    #[error("Zone name already in use")]
    DuplicateZoneName(String),

    #[error("At least one ZIP code required")]
    NoZipCodes,

    #[error("Select at least one provider")]
    NoProviders,

    #[error("End date must be after start date")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Date {0} is out of range")]
    DateOutOfRange(NaiveDate),

    #[error("Select at least one active day")]
    NoActiveDays,

    #[error("{provider_name} already assigned to this zone with these dates")]
    DuplicateAssignment { provider_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Zone {0} not found")]
    ZoneNotFound(i64),

    #[error("Assignment {assignment_id} not found in zone {zone_id}")]
    AssignmentNotFound { zone_id: i64, assignment_id: i64 },

    #[error("Provider {0} not found")]
    ProviderNotFound(i64),

    #[error("This zone has {0} active provider assignment(s). Remove assignments first.")]
    ZoneHasAssignments(usize),

    #[error("This zone has {0} upcoming appointment(s). Reassign before deleting.")]
    ZoneHasAppointments(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
