use serde::{Deserialize, Serialize};

/// Read-only patient reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub zip_code: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredentialingStatus {
    Active,
    Pending,
    Expired,
}

/// Provider master data from the credentialing system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub credentialing_status: CredentialingStatus,
}
