use crate::{
    coverage::aggregate::patient_zone_map,
    models::{Zone, ZoneInput},
    outcome::Outcome,
    zones::ZonePatient,
    AppState,
};

pub fn list_zones(state: &AppState) -> Vec<Zone> {
    state.store.zones().to_vec()
}

pub fn get_zone(state: &AppState, zone_id: i64) -> Result<Zone, String> {
    state.store.zone(zone_id).cloned().map_err(|e| e.to_string())
}

pub fn create_zone(state: &mut AppState, input: ZoneInput) -> Result<Zone, String> {
    state
        .store
        .create_zone(input)
        .cloned()
        .map_err(|e| e.to_string())
}

/// Renames a zone or changes its ZIP codes. Dropping ZIP codes that patients
/// live in needs `confirm`.
pub fn update_zone(
    state: &mut AppState,
    zone_id: i64,
    input: ZoneInput,
    confirm: bool,
) -> Result<Outcome<Zone>, String> {
    let mut candidate = state.store.clone();
    let updated = candidate
        .update_zone(zone_id, input)
        .cloned()
        .map_err(|e| e.to_string())?;

    let affected = state
        .store
        .zip_change_impact(zone_id, &updated.zip_codes)
        .map_err(|e| e.to_string())?
        .len();
    if affected > 0 && !confirm {
        return Ok(Outcome::confirm(format!(
            "Changing ZIP codes may affect {affected} patient assignments. Continue?"
        )));
    }

    state.store = candidate;
    Ok(Outcome::done(updated))
}

/// Deletes a zone. Zones with assignments or appointments are refused; a zone
/// that still contains patients needs `confirm`.
pub fn delete_zone(state: &mut AppState, zone_id: i64, confirm: bool) -> Result<Outcome<Zone>, String> {
    let zone = state.store.zone(zone_id).map_err(|e| e.to_string())?;
    let deletable = zone.provider_assignments.is_empty() && zone.appointments.is_empty();

    if deletable && !confirm {
        let patients = state
            .store
            .patients_in_zone(zone_id)
            .map_err(|e| e.to_string())?
            .len();
        if patients > 0 {
            return Ok(Outcome::confirm(format!(
                "This zone contains {patients} patient(s) who will become unassigned. Continue?"
            )));
        }
    }

    let removed = state.store.delete_zone(zone_id).map_err(|e| e.to_string())?;
    Ok(Outcome::done(removed))
}

pub fn get_zone_patients(
    state: &AppState,
    zone_id: i64,
    filter: Option<String>,
) -> Result<Vec<ZonePatient>, String> {
    let patients = state
        .store
        .filter_patients(zone_id, filter.as_deref().unwrap_or(""))
        .map_err(|e| e.to_string())?;
    let zone_map = patient_zone_map(state.store.zones(), state.store.patients());

    Ok(patients
        .into_iter()
        .map(|patient| {
            let zones = zone_map.get(&patient.id).cloned().unwrap_or_default();
            ZonePatient {
                multi_zone: zones.len() > 1,
                zones,
                patient: patient.clone(),
            }
        })
        .collect())
}

pub fn search_zip_codes(state: &AppState, query: String, selected: Vec<String>) -> Vec<String> {
    state
        .store
        .search_zip_codes(&query, &selected)
        .into_iter()
        .map(str::to_string)
        .collect()
}
