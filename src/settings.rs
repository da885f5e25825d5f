use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::coverage::CoverageConfig;
use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// Environment variable naming the JSON settings file.
pub const SETTINGS_ENV_VAR: &str = "ZONECOV_SETTINGS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MockDataSettings {
    /// Fixed RNG seed for reproducible demo data; random when absent
    pub seed: Option<u64>,
    pub patient_count: usize,
}

impl Default for MockDataSettings {
    fn default() -> Self {
        Self {
            seed: None,
            patient_count: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UserSettings {
    coverage: CoverageConfig,
    mock_data: MockDataSettings,
}

pub struct SettingsStore {
    path: Option<PathBuf>,
    data: UserSettings,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring unparsable settings in {}: {}", path.display(), err);
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path: Some(path),
            data,
        })
    }

    /// Loads from the file named by `ZONECOV_SETTINGS`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        match env::var_os(SETTINGS_ENV_VAR) {
            Some(path) => Self::new(PathBuf::from(path)),
            None => Ok(Self::defaults()),
        }
    }

    pub fn defaults() -> Self {
        Self {
            path: None,
            data: UserSettings::default(),
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn coverage(&self) -> &CoverageConfig {
        &self.data.coverage
    }

    pub fn mock_data(&self) -> &MockDataSettings {
        &self.data.mock_data
    }
}
