//! Session configuration
//!
//! Loaded from YAML or JSON text and checked against the formation catalog.

use crate::error::{LineupError, Result};
use crate::tactics::{FormationCatalog, FormationKind};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMATION: &str = "4-3-3";
pub const DEFAULT_COACH_ID: &str = "local";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Coach whose roster the provider should fetch.
    pub coach_id: String,
    /// Formation selected when a session starts.
    pub default_formation: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            coach_id: DEFAULT_COACH_ID.to_string(),
            default_formation: DEFAULT_FORMATION.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| LineupError::InvalidConfig(e.to_string()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LineupError::InvalidConfig(e.to_string()))
    }

    /// Resolve the starting formation and check the coach id.
    pub fn validate(&self, catalog: &FormationCatalog) -> Result<FormationKind> {
        if self.coach_id.trim().is_empty() {
            return Err(LineupError::InvalidConfig("coach_id must not be empty".to_string()));
        }
        let template = catalog.get_template(&self.default_formation).map_err(|_| {
            LineupError::InvalidConfig(format!(
                "default_formation {} is not registered",
                self.default_formation
            ))
        })?;
        Ok(template.kind)
    }
}
