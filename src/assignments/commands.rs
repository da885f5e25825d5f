use crate::{
    assignments::{default_window_gaps, GAP_WARNING},
    models::{AssignmentInput, AssignmentUpdate, Provider, ProviderAssignment},
    outcome::Outcome,
    utils::format::display_date,
    AppState,
};

/// Saves one assignment per selected provider, then warns if the zone still
/// has gaps in the default window.
pub fn add_provider_assignments(
    state: &mut AppState,
    zone_id: i64,
    input: AssignmentInput,
) -> Result<Outcome<Vec<ProviderAssignment>>, String> {
    let created = state
        .store
        .add_assignments(zone_id, input)
        .map_err(|e| e.to_string())?;

    let zone = state.store.zone(zone_id).map_err(|e| e.to_string())?;
    let gaps = default_window_gaps(zone, state.settings.coverage(), state.today)
        .map_err(|e| e.to_string())?;

    if gaps.is_empty() {
        Ok(Outcome::done(created))
    } else {
        Ok(Outcome::with_warning(created, GAP_WARNING))
    }
}

/// Applies the edit to a copy of the store first; if the zone would be left
/// with gaps the change is held back until `confirm` is set.
pub fn update_provider_assignment(
    state: &mut AppState,
    zone_id: i64,
    assignment_id: i64,
    update: AssignmentUpdate,
    confirm: bool,
) -> Result<Outcome<ProviderAssignment>, String> {
    let mut candidate = state.store.clone();
    let updated = candidate
        .update_assignment(zone_id, assignment_id, update)
        .cloned()
        .map_err(|e| e.to_string())?;

    if !confirm {
        let zone = candidate.zone(zone_id).map_err(|e| e.to_string())?;
        let gaps = default_window_gaps(zone, state.settings.coverage(), state.today)
            .map_err(|e| e.to_string())?;
        if let Some(first) = gaps.first() {
            return Ok(Outcome::confirm(format!(
                "This change would leave Zone {} without coverage starting {}. Save anyway?",
                zone.name,
                display_date(first.start)
            )));
        }
    }

    state.store = candidate;
    Ok(Outcome::done(updated))
}

pub fn remove_provider_assignment(
    state: &mut AppState,
    zone_id: i64,
    assignment_id: i64,
    confirm: bool,
) -> Result<Outcome<ProviderAssignment>, String> {
    let zone = state.store.zone(zone_id).map_err(|e| e.to_string())?;
    let is_last = zone.provider_assignments.len() == 1 && zone.assignment(assignment_id).is_some();
    if is_last && !confirm {
        return Ok(Outcome::confirm(
            "Removing will leave zone without coverage. Continue?",
        ));
    }

    let removed = state
        .store
        .remove_assignment(zone_id, assignment_id)
        .map_err(|e| e.to_string())?;
    Ok(Outcome::done(removed))
}

pub fn search_providers(state: &AppState, query: String, selected: Vec<i64>) -> Vec<Provider> {
    state
        .store
        .search_providers(&query, &selected)
        .into_iter()
        .cloned()
        .collect()
}
