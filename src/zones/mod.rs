pub mod commands;

use serde::Serialize;

use crate::models::Patient;

/// A patient listed under a zone, flagged when other zones also claim them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ZonePatient {
    #[serde(flatten)]
    pub patient: Patient,
    pub zones: Vec<String>,
    pub multi_zone: bool,
}
