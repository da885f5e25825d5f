use crate::{
    coverage::WindowSpec,
    store::ValidationError,
    timeline::{build_aggregate_report, build_zone_timeline, AggregateGapReport, ZoneTimeline},
    AppState,
};

pub fn get_zone_timeline(
    state: &AppState,
    zone_id: i64,
    window: Option<WindowSpec>,
) -> Result<ZoneTimeline, String> {
    let spec = window.unwrap_or(WindowSpec::days(state.settings.coverage().default_window_days));
    if let WindowSpec::Range { start, end } = spec {
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end }.to_string());
        }
    }

    let window = spec.resolve(state.today).map_err(|e| e.to_string())?;
    let zone = state.store.zone(zone_id).map_err(|e| e.to_string())?;
    build_zone_timeline(zone, &window, state.today).map_err(|e| e.to_string())
}

pub fn get_aggregate_gaps(state: &AppState, days: Option<u32>) -> Result<AggregateGapReport, String> {
    let days = days.unwrap_or(state.settings.coverage().aggregate_window_days);
    let window = WindowSpec::days(days)
        .resolve(state.today)
        .map_err(|e| e.to_string())?;
    build_aggregate_report(state.store.zones(), &window).map_err(|e| e.to_string())
}
