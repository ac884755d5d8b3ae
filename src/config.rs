//! Environment-supplied settings.
//!
//! Values are read when an action runs, never cached, and have no defaults.

use crate::models::AppError;

pub const ASSETS_BUCKET: &str = "ASSETS_BUCKET";
pub const KNOWLEDGE_BASE_ID: &str = "KNOWLEDGE_BASE_ID";
pub const KNOWLEDGE_BASE_MODEL_ARN: &str = "KNOWLEDGE_BASE_MODEL_ARN";
pub const DATA_SOURCE_ID: &str = "DATA_SOURCE_ID";

/// Source of configuration values, abstracted so tests avoid the process
/// environment.
pub trait Settings: Send + Sync {
    /// Looks up a raw value by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Looks up a required value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if the value is absent.
    fn require(&self, name: &str) -> Result<String, AppError> {
        self.get(name)
            .ok_or_else(|| AppError::Configuration(format!("{name} is not set")))
    }

    /// # Errors
    ///
    /// Returns `AppError::Configuration` if `ASSETS_BUCKET` is absent.
    fn assets_bucket(&self) -> Result<String, AppError> {
        self.require(ASSETS_BUCKET)
    }

    /// # Errors
    ///
    /// Returns `AppError::Configuration` if `KNOWLEDGE_BASE_ID` is absent.
    fn knowledge_base_id(&self) -> Result<String, AppError> {
        self.require(KNOWLEDGE_BASE_ID)
    }

    /// # Errors
    ///
    /// Returns `AppError::Configuration` if `KNOWLEDGE_BASE_MODEL_ARN` is absent.
    fn knowledge_base_model_arn(&self) -> Result<String, AppError> {
        self.require(KNOWLEDGE_BASE_MODEL_ARN)
    }

    /// # Errors
    ///
    /// Returns `AppError::Configuration` if `DATA_SOURCE_ID` is absent.
    fn data_source_id(&self) -> Result<String, AppError> {
        self.require(DATA_SOURCE_ID)
    }
}

/// Reads settings from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl Settings for EnvSettings {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed settings, for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: std::collections::HashMap<String, String>,
}

impl StaticSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl Settings for StaticSettings {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_configuration_error() {
        let settings = StaticSettings::new();
        assert_eq!(
            settings.assets_bucket(),
            Err(AppError::Configuration("ASSETS_BUCKET is not set".to_string()))
        );
    }

    #[test]
    fn test_present_values() {
        let settings = StaticSettings::new()
            .with(KNOWLEDGE_BASE_ID, "KB123")
            .with(DATA_SOURCE_ID, "DS456");
        assert_eq!(settings.knowledge_base_id(), Ok("KB123".to_string()));
        assert_eq!(settings.data_source_id(), Ok("DS456".to_string()));
        assert!(settings.knowledge_base_model_arn().is_err());
    }
}
