use crate::{
    dashboard::{summarize, zone_rows, DashboardSummary, ZoneRow, ZoneRowQuery},
    AppState,
};

pub fn get_dashboard_summary(state: &AppState) -> Result<DashboardSummary, String> {
    summarize(&state.store, state.settings.coverage(), state.today).map_err(|e| e.to_string())
}

pub fn list_zone_rows(state: &AppState, query: Option<ZoneRowQuery>) -> Result<Vec<ZoneRow>, String> {
    zone_rows(
        &state.store,
        state.settings.coverage(),
        state.today,
        &query.unwrap_or_default(),
    )
    .map_err(|e| e.to_string())
}
