//! Consulting practice configuration

use serde::Deserialize;

use crate::domain::knowledge::DEFAULT_JURISDICTION;

use super::error::ValidationError;

/// Consulting practice configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultingConfig {
    /// Jurisdiction assumed when the user names none
    #[serde(default = "default_jurisdiction")]
    pub default_jurisdiction: String,
}

impl ConsultingConfig {
    /// Validate consulting configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_jurisdiction.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DEFAULT_JURISDICTION"));
        }
        Ok(())
    }
}

impl Default for ConsultingConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: default_jurisdiction(),
        }
    }
}

fn default_jurisdiction() -> String {
    DEFAULT_JURISDICTION.to_string()
}
