use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::filters::ReportFilters;
use crate::report::ReportKind;

/// Saved defaults for the report viewer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_unit")]
    pub value_unit: String,
    #[serde(default = "default_report")]
    pub report_type: String,
    #[serde(default = "default_show_products")]
    pub show_products: bool,
    #[serde(default)]
    pub filters: ReportFilters,
    /// Dataset JSON to use instead of the built-in sample data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_unit() -> String {
    "Crore".to_string()
}

fn default_report() -> String {
    ReportKind::ALL[0].title().to_string()
}

fn default_show_products() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            value_unit: default_unit(),
            report_type: default_report(),
            show_products: default_show_products(),
            filters: ReportFilters::default(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "custinsight", "custinsight")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Load the saved config, or defaults when none has been saved
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::DirectoryUnavailable)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let config_data = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        serde_json::from_str(&config_data).map_err(|e| ConfigError::LoadFailed(e.to_string()))
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::DirectoryUnavailable)?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        fs::write(config_path, config_data).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        tracing::info!(path = %config_path.display(), "saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.report_type, "Duration of Relationship");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            value_unit: "Lakh".into(),
            show_products: false,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "value_unit": "Thousands" }"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.value_unit, "Thousands");
        assert!(config.show_products);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed(_))
        ));
    }
}
