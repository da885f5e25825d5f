use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::coverage::{DateInterval, IntervalError};
use crate::models::{AssignmentInput, AssignmentUpdate, DayOfWeek, ProviderAssignment};
use crate::store::{StoreError, StoreResult, ValidationError, ZoneStore};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

fn validate_schedule(
    start: NaiveDate,
    end: NaiveDate,
    active_days: &BTreeSet<DayOfWeek>,
) -> Result<(), ValidationError> {
    DateInterval::from_inclusive(start, end).map_err(|err| match err {
        IntervalError::Reversed { .. } => ValidationError::InvalidDateRange { start, end },
        IntervalError::OutOfRange { .. } => ValidationError::DateOutOfRange(end),
    })?;
    if active_days.is_empty() {
        return Err(ValidationError::NoActiveDays);
    }
    Ok(())
}

impl ZoneStore {
    /// Assigns every selected provider to the zone for the same period.
    /// Nothing is saved if any provider fails validation.
    pub fn add_assignments(
        &mut self,
        zone_id: i64,
        input: AssignmentInput,
    ) -> StoreResult<Vec<ProviderAssignment>> {
        let zone = self.zone(zone_id)?;

        if input.provider_ids.is_empty() {
            return Err(ValidationError::NoProviders.into());
        }
        validate_schedule(input.start_date, input.end_date, &input.active_days)?;

        let mut seen = BTreeSet::new();
        let mut providers = Vec::with_capacity(input.provider_ids.len());
        for provider_id in input.provider_ids {
            if seen.insert(provider_id) {
                providers.push(self.provider(provider_id)?);
            }
        }

        if let Some(duplicate) = providers.iter().find(|p| {
            zone.provider_assignments
                .iter()
                .any(|a| a.matches_period(p.id, input.start_date, input.end_date))
        }) {
            log_warn!(
                "Rejected duplicate assignment of provider {} to zone {}",
                duplicate.id,
                zone_id
            );
            return Err(ValidationError::DuplicateAssignment {
                provider_name: duplicate.name.clone(),
            }
            .into());
        }

        let mut next_id = zone.next_assignment_id();
        let created: Vec<ProviderAssignment> = providers
            .into_iter()
            .map(|provider| {
                let assignment = ProviderAssignment {
                    id: next_id,
                    provider_id: provider.id,
                    provider_name: provider.name.clone(),
                    start_date: input.start_date,
                    end_date: input.end_date,
                    active_days: input.active_days.clone(),
                    bi_weekly: input.bi_weekly,
                };
                next_id += 1;
                assignment
            })
            .collect();

        let zone = self.zone_mut(zone_id)?;
        zone.provider_assignments.extend(created.iter().cloned());
        log_info!(
            "Added {} assignment(s) to zone {} for {} to {}",
            created.len(),
            zone_id,
            input.start_date,
            input.end_date
        );
        Ok(created)
    }

    pub fn update_assignment(
        &mut self,
        zone_id: i64,
        assignment_id: i64,
        update: AssignmentUpdate,
    ) -> StoreResult<&ProviderAssignment> {
        let zone = self.zone(zone_id)?;
        let existing = zone
            .assignment(assignment_id)
            .ok_or(StoreError::AssignmentNotFound {
                zone_id,
                assignment_id,
            })?;

        validate_schedule(update.start_date, update.end_date, &update.active_days)?;

        let clashes = zone.provider_assignments.iter().any(|a| {
            a.id != assignment_id
                && a.matches_period(existing.provider_id, update.start_date, update.end_date)
        });
        if clashes {
            return Err(ValidationError::DuplicateAssignment {
                provider_name: existing.provider_name.clone(),
            }
            .into());
        }

        let zone = self.zone_mut(zone_id)?;
        let assignment = zone
            .provider_assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)
            .ok_or(StoreError::AssignmentNotFound {
                zone_id,
                assignment_id,
            })?;

        assignment.start_date = update.start_date;
        assignment.end_date = update.end_date;
        assignment.active_days = update.active_days;
        assignment.bi_weekly = update.bi_weekly;
        log_info!("Updated assignment {} in zone {}", assignment_id, zone_id);
        Ok(&*assignment)
    }

    pub fn remove_assignment(
        &mut self,
        zone_id: i64,
        assignment_id: i64,
    ) -> StoreResult<ProviderAssignment> {
        let zone = self.zone_mut(zone_id)?;
        let index = zone
            .provider_assignments
            .iter()
            .position(|a| a.id == assignment_id)
            .ok_or(StoreError::AssignmentNotFound {
                zone_id,
                assignment_id,
            })?;

        let removed = zone.provider_assignments.remove(index);
        log_info!("Removed assignment {} from zone {}", assignment_id, zone_id);
        Ok(removed)
    }
}
