//! Demo data set: Seattle-area ZIP codes, credentialed providers, random
//! patients and six zones whose assignments are laid out relative to today.

use std::collections::BTreeSet;

use chrono::{Duration, Months, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::{
    Appointment, CredentialingStatus, DayOfWeek, Patient, Provider, ProviderAssignment, Zone,
};
use crate::settings::MockDataSettings;
use crate::store::ZoneStore;
use crate::log_info;

const ENABLE_LOGS: bool = true;

const AVAILABLE_ZIP_CODES: [&str; 62] = [
    "98101", "98102", "98103", "98104", "98105", "98106", "98107", "98108", "98109", "98110",
    "98111", "98112", "98113", "98114", "98115", "98116", "98117", "98118", "98119", "98121",
    "98122", "98124", "98125", "98126", "98127", "98129", "98131", "98132", "98133", "98134",
    "98136", "98138", "98139", "98141", "98144", "98145", "98146", "98148", "98154", "98155",
    "98158", "98160", "98161", "98164", "98165", "98166", "98168", "98170", "98174", "98175",
    "98177", "98178", "98181", "98184", "98185", "98188", "98190", "98191", "98194", "98195",
    "98198", "98199",
];

/// ZIP codes patients are drawn from; a subset of the available list.
const POPULATED_ZIP_CODES: [&str; 20] = [
    "98101", "98102", "98103", "98104", "98105", "98106", "98107", "98108", "98115", "98116",
    "98117", "98118", "98119", "98122", "98125", "98126", "98133", "98136", "98144", "98146",
];

const PROVIDER_NAMES: [&str; 10] = [
    "Dr. Sarah Kim",
    "Dr. Michael Chen",
    "Dr. Emily Rodriguez",
    "Dr. James Wilson",
    "Dr. Lisa Anderson",
    "Dr. Robert Martinez",
    "Dr. Jennifer Taylor",
    "Dr. David Brown",
    "Dr. Amanda White",
    "Dr. Christopher Lee",
];

const FIRST_NAMES: [&str; 20] = [
    "John", "Jane", "Michael", "Sarah", "David", "Emily", "Robert", "Jessica", "William",
    "Ashley", "James", "Amanda", "Daniel", "Melissa", "Matthew", "Nicole", "Christopher",
    "Michelle", "Andrew", "Stephanie",
];

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee",
];

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

pub fn available_zip_codes() -> Vec<String> {
    AVAILABLE_ZIP_CODES.iter().map(|z| z.to_string()).collect()
}

pub fn providers() -> Vec<Provider> {
    PROVIDER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Provider {
            id: i as i64 + 1,
            name: name.to_string(),
            specialty: "PCP".to_string(),
            credentialing_status: CredentialingStatus::Active,
        })
        .collect()
}

pub fn generate_patients<R: Rng>(rng: &mut R, count: usize) -> Vec<Patient> {
    (0..count)
        .map(|i| {
            let zip = pick(rng, &POPULATED_ZIP_CODES);
            let name = format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES));
            let phone = format!(
                "206-{}-{}",
                rng.gen_range(100..1000),
                rng.gen_range(1000..10000)
            );
            let street = rng.gen_range(1..10000);
            Patient {
                id: i as i64 + 1,
                name,
                phone,
                zip_code: zip.to_string(),
                address: format!("{street} Main St, Seattle, WA {zip}"),
            }
        })
        .collect()
}

fn days(names: &[DayOfWeek]) -> BTreeSet<DayOfWeek> {
    names.iter().copied().collect()
}

fn plus_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(date + Duration::days(30 * i64::from(months)))
}

struct ZoneTemplate {
    name: &'static str,
    zip_codes: &'static [&'static str],
    assignments: Vec<(i64, NaiveDate, NaiveDate, BTreeSet<DayOfWeek>, bool)>,
    appointments: Vec<(i64, NaiveDate, i64)>,
}

/// The six demo zones, with assignment dates anchored on `today`.
pub fn zones(today: NaiveDate) -> Vec<Zone> {
    use DayOfWeek::*;

    let in_one_week = today + Duration::days(7);
    let in_two_weeks = today + Duration::days(14);
    let in_one_month = plus_months(today, 1);
    let in_two_months = plus_months(today, 2);

    let mwf = days(&[Monday, Wednesday, Friday]);
    let tue_thu = days(&[Tuesday, Thursday]);
    let weekdays = days(&[Monday, Tuesday, Wednesday, Thursday, Friday]);

    let templates = vec![
        ZoneTemplate {
            name: "North Seattle",
            zip_codes: &["98103", "98115", "98117", "98125", "98133"],
            assignments: vec![
                (1, today, in_one_month, mwf.clone(), false),
                (2, in_one_month, in_two_months, tue_thu.clone(), false),
            ],
            appointments: vec![(1, in_one_week, 1), (2, in_two_weeks, 2)],
        },
        ZoneTemplate {
            name: "Central Seattle",
            zip_codes: &["98101", "98102", "98104", "98122", "98144"],
            assignments: vec![
                (3, today, in_two_weeks, weekdays.clone(), false),
                (4, in_one_month, in_two_months, mwf.clone(), true),
            ],
            appointments: vec![(5, in_one_week, 3), (6, in_two_weeks, 4)],
        },
        ZoneTemplate {
            name: "South Seattle",
            zip_codes: &["98106", "98108", "98118", "98126", "98146"],
            assignments: vec![
                (5, today, in_one_week, mwf.clone(), false),
                (6, in_one_month, in_two_months, mwf.clone(), false),
            ],
            appointments: vec![(10, in_one_week, 5)],
        },
        ZoneTemplate {
            name: "West Seattle",
            zip_codes: &["98116", "98136", "98146"],
            assignments: vec![(7, today, in_two_weeks, tue_thu, false)],
            appointments: vec![],
        },
        ZoneTemplate {
            name: "East Seattle",
            zip_codes: &["98112", "98122", "98144"],
            assignments: vec![(9, in_one_week, in_one_month, mwf, false)],
            appointments: vec![],
        },
        ZoneTemplate {
            name: "Downtown Seattle",
            zip_codes: &["98101", "98104", "98121"],
            assignments: vec![(10, in_two_weeks, in_one_month, weekdays, false)],
            appointments: vec![],
        },
    ];

    let mut next_assignment_id = 1;
    let mut next_appointment_id = 1;

    templates
        .into_iter()
        .enumerate()
        .map(|(i, template)| {
            let mut zone = Zone::new(
                i as i64 + 1,
                template.name.to_string(),
                template.zip_codes.iter().map(|z| z.to_string()).collect(),
            );

            for (provider_id, start_date, end_date, active_days, bi_weekly) in template.assignments
            {
                zone.provider_assignments.push(ProviderAssignment {
                    id: next_assignment_id,
                    provider_id,
                    provider_name: PROVIDER_NAMES[(provider_id - 1) as usize].to_string(),
                    start_date,
                    end_date,
                    active_days,
                    bi_weekly,
                });
                next_assignment_id += 1;
            }

            for (patient_id, date, provider_id) in template.appointments {
                zone.appointments.push(Appointment {
                    id: next_appointment_id,
                    patient_id,
                    date,
                    provider_id,
                });
                next_appointment_id += 1;
            }

            zone
        })
        .collect()
}

pub fn mock_store_with_rng<R: Rng>(today: NaiveDate, rng: &mut R, patient_count: usize) -> ZoneStore {
    let store = ZoneStore::new(
        zones(today),
        providers(),
        generate_patients(rng, patient_count),
        available_zip_codes(),
    );
    log_info!(
        "Seeded {} zones, {} providers, {} patients",
        store.zones().len(),
        store.providers().len(),
        store.patients().len()
    );
    store
}

pub fn mock_store(today: NaiveDate, settings: &MockDataSettings) -> ZoneStore {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    mock_store_with_rng(today, &mut rng, settings.patient_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{zone_gaps, WindowSpec};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let settings = MockDataSettings {
            seed: Some(42),
            patient_count: 50,
        };
        let a = mock_store(today(), &settings);
        let b = mock_store(today(), &settings);
        assert_eq!(a.patients(), b.patients());
        assert_eq!(a.patients().len(), 50);
    }

    #[test]
    fn patients_live_in_populated_zips() {
        let mut rng = StdRng::seed_from_u64(1);
        for patient in generate_patients(&mut rng, 100) {
            assert!(POPULATED_ZIP_CODES.contains(&patient.zip_code.as_str()));
            assert!(patient.phone.starts_with("206-"));
            assert!(patient.address.ends_with(&patient.zip_code));
        }
    }

    #[test]
    fn demo_zones_are_well_formed() {
        let zones = zones(today());
        assert_eq!(zones.len(), 6);
        for zone in &zones {
            assert!(!zone.zip_codes.is_empty());
            for assignment in &zone.provider_assignments {
                assert!(assignment.start_date <= assignment.end_date);
                assert!(!assignment.active_days.is_empty());
            }
        }
        let ids: BTreeSet<i64> = zones
            .iter()
            .flat_map(|z| z.provider_assignments.iter().map(|a| a.id))
            .collect();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn demo_zones_have_gaps_in_default_window() {
        let window = WindowSpec::days(90).resolve(today()).unwrap();
        let zones = zones(today());
        let west = zones.iter().find(|z| z.name == "West Seattle").unwrap();
        let gaps = zone_gaps(west, &window).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start, today() + Duration::days(15));
    }
}
