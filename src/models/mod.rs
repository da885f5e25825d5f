pub mod assignment;
pub mod patient;
pub mod zone;

pub use assignment::{AssignmentInput, AssignmentUpdate, DayOfWeek, ProviderAssignment};
pub use patient::{CredentialingStatus, Patient, Provider};
pub use zone::{Appointment, Zone, ZoneInput, ZoneRef};
