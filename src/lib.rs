pub mod assignments;
pub mod coverage;
pub mod dashboard;
pub mod models;
pub mod outcome;
pub mod seed;
pub mod settings;
pub mod store;
pub mod timeline;
pub mod utils;
pub mod zones;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

use dashboard::commands::{get_dashboard_summary, list_zone_rows};
use settings::SettingsStore;
use store::ZoneStore;
use timeline::commands::get_aggregate_gaps;

const ENABLE_LOGS: bool = true;

/// Everything a command needs: the in-memory store, user settings and the
/// date every relative window is anchored on.
pub struct AppState {
    pub store: ZoneStore,
    pub settings: SettingsStore,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(store: ZoneStore, settings: SettingsStore, today: NaiveDate) -> Self {
        Self {
            store,
            settings,
            today,
        }
    }

    /// Demo state seeded from the mock data settings.
    pub fn seeded(settings: SettingsStore, today: NaiveDate) -> Self {
        let store = seed::mock_store(today, settings.mock_data());
        Self::new(store, settings, today)
    }
}

fn print_json<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {label}"))?;
    println!("{json}");
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("zonecov starting up...");

    let settings = SettingsStore::from_env().context("Failed to load settings")?;
    if let Some(path) = settings.path() {
        log_info!("Using settings from {}", path.display());
    }

    let today = chrono::Local::now().date_naive();
    let state = AppState::seeded(settings, today);

    let summary = get_dashboard_summary(&state).map_err(|err| {
        log_error!("Failed to build dashboard summary: {}", err);
        anyhow::Error::msg(err)
    })?;
    log_info!(
        "{} zone(s), {} coverage gap(s) in the next {} days",
        summary.total_zones,
        summary.coverage_gaps,
        summary.window_days
    );
    print_json("dashboard summary", &summary)?;

    let rows = list_zone_rows(&state, None).map_err(anyhow::Error::msg)?;
    print_json("zone rows", &rows)?;

    let gaps = get_aggregate_gaps(&state, None).map_err(anyhow::Error::msg)?;
    print_json("aggregate gaps", &gaps)?;

    Ok(())
}
