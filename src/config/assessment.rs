//! Assessment configuration: catalog source, snapshot storage and navigation.

use serde::Deserialize;
use std::path::PathBuf;

use super::error::{ConfigError, ValidationError};
use crate::domain::assessment::AssessmentConfig;

/// Where session snapshots are kept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// One YAML file per session under `storage_dir`.
    File,
}

/// Assessment settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssessmentSettings {
    /// YAML lap catalog; the bundled Innovation Index catalog when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub storage: StorageBackend,

    /// Directory for the file backend
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Pause on a lap transition screen between laps
    #[serde(default)]
    pub pause_between_laps: bool,
}

impl AssessmentSettings {
    /// Loads and validates the lap catalog.
    pub fn load_catalog(&self) -> Result<AssessmentConfig, ConfigError> {
        match &self.catalog_path {
            Some(path) => {
                let yaml =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
                        path: path.clone(),
                        source,
                    })?;
                Ok(AssessmentConfig::from_yaml_str(&yaml)?)
            }
            None => Ok(AssessmentConfig::standard()?),
        }
    }

    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage == StorageBackend::File && self.storage_dir.is_none() {
            return Err(ValidationError::MissingRequired("assessment.storage_dir"));
        }
        Ok(())
    }
}
