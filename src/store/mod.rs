mod assignments;
pub mod error;
mod zones;

pub use error::{StoreError, StoreResult, ValidationError};

use crate::coverage::aggregate::patients_in_zone;
use crate::models::{Patient, Provider, Zone};

const MAX_ZIP_SUGGESTIONS: usize = 10;

/// Owns the zone, provider and patient collections for one session.
///
/// Zones and their assignments are mutated only through the methods in
/// `zones.rs` and `assignments.rs`; providers and patients are read-only
/// reference data supplied at construction.
#[derive(Debug, Clone, Default)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    providers: Vec<Provider>,
    patients: Vec<Patient>,
    available_zip_codes: Vec<String>,
}

impl ZoneStore {
    pub fn new(
        zones: Vec<Zone>,
        providers: Vec<Provider>,
        patients: Vec<Patient>,
        available_zip_codes: Vec<String>,
    ) -> Self {
        Self {
            zones,
            providers,
            patients,
            available_zip_codes,
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn available_zip_codes(&self) -> &[String] {
        &self.available_zip_codes
    }

    pub fn zone(&self, zone_id: i64) -> StoreResult<&Zone> {
        self.zones
            .iter()
            .find(|z| z.id == zone_id)
            .ok_or(StoreError::ZoneNotFound(zone_id))
    }

    fn zone_mut(&mut self, zone_id: i64) -> StoreResult<&mut Zone> {
        self.zones
            .iter_mut()
            .find(|z| z.id == zone_id)
            .ok_or(StoreError::ZoneNotFound(zone_id))
    }

    pub fn provider(&self, provider_id: i64) -> StoreResult<&Provider> {
        self.providers
            .iter()
            .find(|p| p.id == provider_id)
            .ok_or(StoreError::ProviderNotFound(provider_id))
    }

    pub fn patients_in_zone(&self, zone_id: i64) -> StoreResult<Vec<&Patient>> {
        let zone = self.zone(zone_id)?;
        Ok(patients_in_zone(zone, &self.patients))
    }

    /// Patients of the zone whose name (case-insensitive) or ZIP contains `term`.
    pub fn filter_patients(&self, zone_id: i64, term: &str) -> StoreResult<Vec<&Patient>> {
        let needle = term.trim().to_lowercase();
        let patients = self.patients_in_zone(zone_id)?;
        Ok(patients
            .into_iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.zip_code.contains(&needle)
            })
            .collect())
    }

    /// Up to ten known ZIP codes containing `query`, skipping ones already picked.
    pub fn search_zip_codes(&self, query: &str, selected: &[String]) -> Vec<&str> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.available_zip_codes
            .iter()
            .filter(|zip| zip.contains(query) && !selected.contains(zip))
            .take(MAX_ZIP_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }

    /// Providers whose name contains `query` (case-insensitive), skipping ones already picked.
    pub fn search_providers(&self, query: &str, selected: &[i64]) -> Vec<&Provider> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.providers
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle) && !selected.contains(&p.id))
            .collect()
    }
}
