use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RehabError;
use crate::logging::LogConfig;
use crate::models::{CalibrationProfile, Region};
use crate::thresholds::Thresholds;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub metadata: ConfigMetadata,

    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,

    /// Onboarding answers used to annotate reasoning
    #[serde(default)]
    pub calibration: CalibrationProfile,

    /// Decision thresholds; any missing key keeps its default
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Logging output
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// JSON history file
    pub history_path: PathBuf,

    /// Region used when a command does not name one
    pub default_region: Option<Region>,

    /// Extra region profiles (TOML) that replace the built-in ones
    #[serde(default)]
    pub region_files: Vec<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            history_path: data_dir().join("history.json"),
            default_region: None,
            region_files: Vec::new(),
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rehabrs")
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            RehabError::Configuration(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration as TOML, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn default_config_path() -> PathBuf {
        data_dir().join("config.toml")
    }

    /// Load from the default location, using defaults only when the file is missing
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(&Self::default_config_path())
    }

    /// A file that exists but fails to parse is an error, never silently replaced
    pub fn load_or_default_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_default(&mut self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.settings.history_path, deserialized.settings.history_path);
        assert_eq!(config.thresholds, deserialized.thresholds);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [settings]
            history_path = "/tmp/rehab/history.json"
            default_region = "lower_back"

            [calibration]
            primary_problem_zone = "inner knee"

            [thresholds]
            low_confidence = 3

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.default_region, Some(Region::LowerBack));
        assert!(config.settings.region_files.is_empty());
        assert_eq!(config.calibration.primary_problem_zone.as_deref(), Some("inner knee"));
        assert_eq!(config.thresholds.low_confidence, 3);
        assert_eq!(config.thresholds.high_confidence, Thresholds::default().high_confidence);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = AppConfig::default();
        original.settings.default_region = Some(Region::Ankle);
        original.thresholds.session_window = 8;
        original.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.settings.default_region, Some(Region::Ankle));
        assert_eq!(loaded.thresholds.session_window, 8);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert_eq!(
            AppConfig::load_or_default_from(&missing).unwrap().thresholds,
            Thresholds::default()
        );
    }

    #[test]
    fn test_malformed_thresholds_are_a_configuration_error() {
        let temp_dir = tempdir().unwrap();
        let broken = temp_dir.path().join("broken.toml");
        fs::write(&broken, "[thresholds]\nlow_confidence = \"six\"\n").unwrap();

        let err = AppConfig::load_or_default_from(&broken).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RehabError>(),
            Some(RehabError::Configuration(_))
        ));

        let truncated = temp_dir.path().join("truncated.toml");
        fs::write(&truncated, "[thresholds\nlow_confidence = ").unwrap();
        assert!(AppConfig::load_or_default_from(&truncated).is_err());
    }
}
