pub mod commands;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coverage::aggregate::{
    multi_zone_patients_in, patient_zone_map, patients_in_zone, provider_ratio, ProviderRatio,
};
use crate::coverage::{total_gap_days, zone_gaps, CoverageConfig, IntervalError, WindowSpec};
use crate::store::ZoneStore;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_zones: usize,
    pub total_providers: usize,
    pub total_patients: usize,
    pub coverage_gaps: usize,
    pub multi_zone_patients: usize,
    pub window_days: u32,
}

/// One line of the zone table.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRow {
    pub zone_id: i64,
    pub name: String,
    pub zip_code_count: usize,
    pub patient_count: usize,
    pub provider_count: usize,
    pub ratio: ProviderRatio,
    pub gap_count: usize,
    pub gap_days: i64,
    /// Patients of this zone who also belong to another zone
    pub multi_zone_patients: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ZoneSort {
    #[default]
    Name,
    GapDays,
    Ratio,
    Patients,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneRowQuery {
    pub sort: ZoneSort,
    pub descending: bool,
    pub only_with_gaps: bool,
}

pub fn summarize(
    store: &ZoneStore,
    config: &CoverageConfig,
    today: NaiveDate,
) -> Result<DashboardSummary, IntervalError> {
    let window = WindowSpec::days(config.default_window_days).resolve(today)?;

    let providers: BTreeSet<i64> = store
        .zones()
        .iter()
        .flat_map(|z| z.provider_assignments.iter().map(|a| a.provider_id))
        .collect();

    let zone_map = patient_zone_map(store.zones(), store.patients());

    let mut coverage_gaps = 0;
    for zone in store.zones() {
        coverage_gaps += zone_gaps(zone, &window)?.len();
    }

    Ok(DashboardSummary {
        total_zones: store.zones().len(),
        total_providers: providers.len(),
        total_patients: zone_map.len(),
        coverage_gaps,
        multi_zone_patients: zone_map.values().filter(|names| names.len() > 1).count(),
        window_days: config.default_window_days,
    })
}

pub fn zone_rows(
    store: &ZoneStore,
    config: &CoverageConfig,
    today: NaiveDate,
    query: &ZoneRowQuery,
) -> Result<Vec<ZoneRow>, IntervalError> {
    let window = WindowSpec::days(config.default_window_days).resolve(today)?;
    let zone_map = patient_zone_map(store.zones(), store.patients());

    let mut rows = Vec::with_capacity(store.zones().len());
    for zone in store.zones() {
        let patients = patients_in_zone(zone, store.patients());
        let gaps = zone_gaps(zone, &window)?;
        let provider_count = zone.provider_count();

        rows.push(ZoneRow {
            zone_id: zone.id,
            name: zone.name.clone(),
            zip_code_count: zone.zip_codes.len(),
            patient_count: patients.len(),
            provider_count,
            ratio: provider_ratio(patients.len(), provider_count, config),
            gap_count: gaps.len(),
            gap_days: total_gap_days(&gaps),
            multi_zone_patients: multi_zone_patients_in(zone, store.patients(), &zone_map).len(),
        });
    }

    if query.only_with_gaps {
        rows.retain(|row| row.gap_count > 0);
    }

    match query.sort {
        ZoneSort::Name => rows.sort_by_key(|r| r.name.to_lowercase()),
        ZoneSort::GapDays => rows.sort_by_key(|r| r.gap_days),
        // Zones without providers sort as the heaviest workload.
        ZoneSort::Ratio => rows.sort_by_key(|r| r.ratio.patients_per_provider.unwrap_or(u32::MAX)),
        ZoneSort::Patients => rows.sort_by_key(|r| r.patient_count),
    }
    if query.descending {
        rows.reverse();
    }

    Ok(rows)
}
