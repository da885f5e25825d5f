use crate::models::{Patient, Zone, ZoneInput};
use crate::store::{StoreError, StoreResult, ValidationError, ZoneStore};
use crate::log_info;

const ENABLE_LOGS: bool = true;

impl ZoneStore {
    /// Trims the name, checks it is unique among the other zones and
    /// de-duplicates the ZIP list while keeping its order.
    fn validate_zone_input(
        &self,
        input: ZoneInput,
        editing: Option<i64>,
    ) -> Result<(String, Vec<String>), ValidationError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyZoneName);
        }

        let lowered = name.to_lowercase();
        let duplicate = self
            .zones
            .iter()
            .any(|z| Some(z.id) != editing && z.name.to_lowercase() == lowered);
        if duplicate {
            return Err(ValidationError::DuplicateZoneName(name));
        }

        let mut zip_codes: Vec<String> = Vec::with_capacity(input.zip_codes.len());
        for zip in input.zip_codes {
            let zip = zip.trim().to_string();
            if !zip.is_empty() && !zip_codes.contains(&zip) {
                zip_codes.push(zip);
            }
        }
        if zip_codes.is_empty() {
            return Err(ValidationError::NoZipCodes);
        }

        Ok((name, zip_codes))
    }

    pub fn create_zone(&mut self, input: ZoneInput) -> StoreResult<&Zone> {
        let (name, zip_codes) = self.validate_zone_input(input, None)?;
        let id = self.zones.iter().map(|z| z.id).max().map_or(1, |max| max + 1);

        log_info!("Creating zone {} ({}) with {} ZIP code(s)", id, name, zip_codes.len());
        self.zones.push(Zone::new(id, name, zip_codes));
        self.zone(id)
    }

    pub fn update_zone(&mut self, zone_id: i64, input: ZoneInput) -> StoreResult<&Zone> {
        self.zone(zone_id)?;
        let (name, zip_codes) = self.validate_zone_input(input, Some(zone_id))?;

        let zone = self.zone_mut(zone_id)?;
        log_info!("Updating zone {}: name '{}' -> '{}'", zone_id, zone.name, name);
        zone.name = name;
        zone.zip_codes = zip_codes;
        Ok(&*zone)
    }

    /// Patients currently in the zone whose ZIP code is missing from `new_zip_codes`.
    pub fn zip_change_impact(
        &self,
        zone_id: i64,
        new_zip_codes: &[String],
    ) -> StoreResult<Vec<&Patient>> {
        let zone = self.zone(zone_id)?;
        let removed: Vec<&String> = zone
            .zip_codes
            .iter()
            .filter(|z| !new_zip_codes.contains(z))
            .collect();

        Ok(self
            .patients_in_zone(zone_id)?
            .into_iter()
            .filter(|p| removed.contains(&&p.zip_code))
            .collect())
    }

    /// Removes a zone that has no assignments and no appointments.
    pub fn delete_zone(&mut self, zone_id: i64) -> StoreResult<Zone> {
        let zone = self.zone(zone_id)?;

        let assignments = zone.provider_assignments.len();
        if assignments > 0 {
            return Err(StoreError::ZoneHasAssignments(assignments));
        }
        let appointments = zone.appointments.len();
        if appointments > 0 {
            return Err(StoreError::ZoneHasAppointments(appointments));
        }

        let index = self
            .zones
            .iter()
            .position(|z| z.id == zone_id)
            .ok_or(StoreError::ZoneNotFound(zone_id))?;
        let removed = self.zones.remove(index);
        log_info!("Deleted zone {} ({})", removed.id, removed.name);
        Ok(removed)
    }
}
