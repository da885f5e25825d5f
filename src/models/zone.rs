use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coverage::interval::{DateInterval, IntervalError};
use crate::models::assignment::ProviderAssignment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub date: NaiveDate,
    pub provider_id: i64,
}

/// A named geographic service area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub zip_codes: Vec<String>,
    #[serde(default)]
    pub provider_assignments: Vec<ProviderAssignment>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

impl Zone {
    pub fn new(id: i64, name: String, zip_codes: Vec<String>) -> Self {
        Self {
            id,
            name,
            zip_codes,
            provider_assignments: Vec::new(),
            appointments: Vec::new(),
        }
    }

    pub fn covers_zip(&self, zip_code: &str) -> bool {
        self.zip_codes.iter().any(|z| z == zip_code)
    }

    pub fn assignment(&self, assignment_id: i64) -> Option<&ProviderAssignment> {
        self.provider_assignments
            .iter()
            .find(|a| a.id == assignment_id)
    }

    /// Distinct providers with at least one assignment in this zone.
    pub fn provider_count(&self) -> usize {
        self.provider_assignments
            .iter()
            .map(|a| a.provider_id)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn next_assignment_id(&self) -> i64 {
        self.provider_assignments
            .iter()
            .map(|a| a.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Covered spans of every assignment, in assignment order.
    pub fn covered_intervals(&self) -> Result<Vec<DateInterval>, IntervalError> {
        self.provider_assignments
            .iter()
            .map(ProviderAssignment::interval)
            .collect()
    }
}

/// Input for creating or renaming a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInput {
    pub name: String,
    pub zip_codes: Vec<String>,
}

/// Lightweight reference used in cross-zone listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRef {
    pub id: i64,
    pub name: String,
}

impl From<&Zone> for ZoneRef {
    fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name.clone(),
        }
    }
}
