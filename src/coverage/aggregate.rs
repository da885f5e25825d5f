use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::coverage::config::CoverageConfig;
use crate::coverage::gaps::zone_gaps;
use crate::coverage::interval::IntervalError;
use crate::coverage::window::Window;
use crate::models::{Patient, Zone, ZoneRef};

pub fn patients_in_zone<'a>(zone: &Zone, patients: &'a [Patient]) -> Vec<&'a Patient> {
    patients
        .iter()
        .filter(|p| zone.covers_zip(&p.zip_code))
        .collect()
}

/// Patient id to the names of every zone whose ZIP list contains the patient.
pub fn patient_zone_map(zones: &[Zone], patients: &[Patient]) -> BTreeMap<i64, Vec<String>> {
    let mut map: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for zone in zones {
        for patient in patients_in_zone(zone, patients) {
            map.entry(patient.id).or_default().push(zone.name.clone());
        }
    }
    map
}

/// Patients of `zone` that `zone_map` places in more than one zone.
pub fn multi_zone_patients_in<'a>(
    zone: &Zone,
    patients: &'a [Patient],
    zone_map: &BTreeMap<i64, Vec<String>>,
) -> Vec<&'a Patient> {
    patients_in_zone(zone, patients)
        .into_iter()
        .filter(|p| zone_map.get(&p.id).map_or(false, |names| names.len() > 1))
        .collect()
}

pub fn multi_zone_patient_count(zones: &[Zone], patients: &[Patient]) -> usize {
    patient_zone_map(zones, patients)
        .values()
        .filter(|names| names.len() > 1)
        .count()
}

/// A run of consecutive days on which the same set of zones lacks coverage.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedGap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
    pub zones: Vec<ZoneRef>,
}

impl AggregatedGap {
    fn starting(date: NaiveDate, zones: BTreeSet<ZoneRef>) -> (Self, BTreeSet<ZoneRef>) {
        let gap = Self {
            start: date,
            end: date + Duration::days(1),
            days: 1,
            zones: zones.iter().cloned().collect(),
        };
        (gap, zones)
    }
}

/// Groups every uncovered day in `window` by the set of zones gapped on it and
/// run-length encodes consecutive days with an identical set.
pub fn aggregate_gaps(zones: &[Zone], window: &Window) -> Result<Vec<AggregatedGap>, IntervalError> {
    let mut by_date: BTreeMap<NaiveDate, BTreeSet<ZoneRef>> = BTreeMap::new();
    for zone in zones {
        for gap in zone_gaps(zone, window)? {
            let Some(interval) = gap.interval() else {
                continue;
            };
            for day in interval.days() {
                by_date.entry(day).or_default().insert(ZoneRef::from(zone));
            }
        }
    }

    let mut aggregated = Vec::new();
    let mut current: Option<(AggregatedGap, BTreeSet<ZoneRef>)> = None;

    for (date, zone_set) in by_date {
        match &mut current {
            Some((gap, set)) if *set == zone_set && gap.end == date => {
                gap.end = date + Duration::days(1);
                gap.days += 1;
            }
            _ => {
                if let Some((gap, _)) = current.take() {
                    aggregated.push(gap);
                }
                current = Some(AggregatedGap::starting(date, zone_set));
            }
        }
    }

    if let Some((gap, _)) = current {
        aggregated.push(gap);
    }

    Ok(aggregated)
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RatioStatus {
    Normal,
    Warning,
    Critical,
}

/// Patients-per-provider workload for a zone.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRatio {
    pub patients_per_provider: Option<u32>,
    pub status: RatioStatus,
    pub label: String,
}

pub fn provider_ratio(
    patient_count: usize,
    provider_count: usize,
    config: &CoverageConfig,
) -> ProviderRatio {
    if provider_count == 0 {
        return ProviderRatio {
            patients_per_provider: None,
            status: RatioStatus::Critical,
            label: "No coverage".to_string(),
        };
    }

    let ratio = (patient_count as f64 / provider_count as f64).round() as u32;
    let status = if ratio > config.ratio_critical_above {
        RatioStatus::Critical
    } else if ratio > config.ratio_warning_above {
        RatioStatus::Warning
    } else {
        RatioStatus::Normal
    };

    ProviderRatio {
        patients_per_provider: Some(ratio),
        status,
        label: format!("{ratio}:1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::window::WindowSpec;
    use crate::models::{DayOfWeek, ProviderAssignment};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn patient(id: i64, zip: &str) -> Patient {
        Patient {
            id,
            name: format!("Patient {id}"),
            phone: "206-555-0100".into(),
            zip_code: zip.into(),
            address: format!("1 Main St, Seattle, WA {zip}"),
        }
    }

    fn zone(id: i64, name: &str, zips: &[&str], spans: &[(NaiveDate, NaiveDate)]) -> Zone {
        let mut zone = Zone::new(id, name.into(), zips.iter().map(|z| z.to_string()).collect());
        for (i, (start, end)) in spans.iter().enumerate() {
            zone.provider_assignments.push(ProviderAssignment {
                id: i as i64 + 1,
                provider_id: i as i64 + 1,
                provider_name: format!("Dr. {i}"),
                start_date: *start,
                end_date: *end,
                active_days: [DayOfWeek::Monday].into_iter().collect(),
                bi_weekly: false,
            });
        }
        zone
    }

    #[test]
    fn counts_patients_in_more_than_one_zone() {
        let zones = vec![
            zone(1, "North", &["98103", "98115"], &[]),
            zone(2, "Central", &["98115", "98122"], &[]),
        ];
        let patients = vec![patient(1, "98115"), patient(2, "98103"), patient(3, "99999")];

        assert_eq!(multi_zone_patient_count(&zones, &patients), 1);
        let map = patient_zone_map(&zones, &patients);
        assert_eq!(map[&1], vec!["North".to_string(), "Central".to_string()]);
        assert!(!map.contains_key(&3));

        let shared: Vec<_> = multi_zone_patients_in(&zones[0], &patients, &map)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(shared, vec![1]);
    }

    #[test]
    fn aggregate_merges_identical_zone_sets() {
        let start = d(2024, 1, 1);
        let window = WindowSpec::range(start, d(2024, 1, 4)).resolve(start).unwrap();
        // A is uncovered for all four days, B for the first two only.
        let zones = vec![
            zone(1, "A", &["1"], &[]),
            zone(2, "B", &["2"], &[(d(2024, 1, 3), d(2024, 1, 10))]),
        ];

        let aggregated = aggregate_gaps(&zones, &window).unwrap();
        assert_eq!(aggregated.len(), 2);

        assert_eq!(aggregated[0].start, d(2024, 1, 1));
        assert_eq!(aggregated[0].end, d(2024, 1, 3));
        assert_eq!(aggregated[0].days, 2);
        let ids: Vec<_> = aggregated[0].zones.iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert_eq!(aggregated[1].start, d(2024, 1, 3));
        assert_eq!(aggregated[1].days, 2);
        let ids: Vec<_> = aggregated[1].zones.iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn aggregate_splits_non_consecutive_days() {
        let start = d(2024, 1, 1);
        let window = WindowSpec::range(start, d(2024, 1, 5)).resolve(start).unwrap();
        let zones = vec![zone(1, "A", &["1"], &[(d(2024, 1, 2), d(2024, 1, 3))])];

        let aggregated = aggregate_gaps(&zones, &window).unwrap();
        let runs: Vec<_> = aggregated.iter().map(|g| (g.start, g.days)).collect();
        assert_eq!(runs, vec![(d(2024, 1, 1), 1), (d(2024, 1, 4), 2)]);
    }

    #[test]
    fn fully_covered_zones_aggregate_to_nothing() {
        let start = d(2024, 1, 1);
        let window = WindowSpec::days(10).resolve(start).unwrap();
        let zones = vec![zone(1, "A", &["1"], &[(start, d(2024, 3, 1))])];
        assert!(aggregate_gaps(&zones, &window).unwrap().is_empty());
    }

    #[test]
    fn ratio_thresholds() {
        let config = CoverageConfig::default();
        assert_eq!(provider_ratio(150, 2, &config).status, RatioStatus::Normal);
        assert_eq!(provider_ratio(76, 1, &config).status, RatioStatus::Warning);
        assert_eq!(provider_ratio(100, 1, &config).status, RatioStatus::Warning);
        assert_eq!(provider_ratio(101, 1, &config).status, RatioStatus::Critical);
        assert_eq!(provider_ratio(151, 2, &config).label, "76:1");
    }

    #[test]
    fn zero_providers_is_always_critical() {
        let ratio = provider_ratio(0, 0, &CoverageConfig::default());
        assert_eq!(ratio.status, RatioStatus::Critical);
        assert_eq!(ratio.label, "No coverage");
        assert_eq!(ratio.patients_per_provider, None);
    }
}
