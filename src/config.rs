//! Configuration handling for the form engine

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUBMIT_ERROR: &str = "Something went wrong";
pub const DEFAULT_INVALID_FORM_MESSAGE: &str = "Please fix the errors above";

/// Which touched fields are re-validated when a value changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidationPolicy {
    /// Only the edited field, if touched. Errors on other fields may go
    /// stale until the next submit.
    #[default]
    TouchedFieldOnly,
    /// Every touched field, so cross-field messages follow each edit
    AllTouched,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub revalidation: RevalidationPolicy,
    /// Submit error shown when the handler fails without a message
    pub fallback_submit_error: String,
    /// Submit error shown when the form fails validation without field errors
    pub invalid_form_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            revalidation: RevalidationPolicy::default(),
            fallback_submit_error: DEFAULT_SUBMIT_ERROR.to_string(),
            invalid_form_message: DEFAULT_INVALID_FORM_MESSAGE.to_string(),
        }
    }
}

impl FormConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "formstate", "formstate")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded form config");
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("formstate-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.revalidation, RevalidationPolicy::TouchedFieldOnly);
        assert_eq!(config.fallback_submit_error, "Something went wrong");
        assert_eq!(config.invalid_form_message, "Please fix the errors above");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, FormConfig::default());
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"revalidation": "all_touched"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.revalidation, RevalidationPolicy::AllTouched);
        assert_eq!(parsed.fallback_submit_error, DEFAULT_SUBMIT_ERROR);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"fallback_submit_error": "Oops", "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.fallback_submit_error, "Oops");
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let path = temp_path("config.json");
        let config = FormConfig::load_from(&path).unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("config.json");
        let config = FormConfig {
            revalidation: RevalidationPolicy::AllTouched,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        let loaded = FormConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_from_invalid_file_fails() {
        let path = temp_path("config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let err = FormConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, FormError::Json(_)));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_config_path_returns_option() {
        let _path = FormConfig::config_path();
    }
}
