//! Store configuration
//!
//! Loaded from `parkease.toml`. Every field has a default, so an empty
//! file (or no file at all) yields the stock demo behaviour.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shared secret that turns a registration into an admin account
pub const DEFAULT_ADMIN_CODE: &str = "ADMIN2026";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub admin_code: String,
    /// Accept unknown credentials with a long-enough password
    pub legacy_login_fallback: bool,
    pub min_fallback_password_len: usize,
    /// Refuse bookings for locations with no free slots
    pub enforce_capacity: bool,
    pub admin_slot_count: usize,
    pub latency: LatencyConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            admin_code: DEFAULT_ADMIN_CODE.to_string(),
            legacy_login_fallback: true,
            min_fallback_password_len: 6,
            enforce_capacity: true,
            admin_slot_count: 30,
            latency: LatencyConfig::default(),
        }
    }
}

/// Largest accepted latency multiplier
pub const MAX_LATENCY_SCALE: f64 = 1000.0;

/// Simulated network latency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    /// Multiplier applied to every operation's base delay
    pub scale: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1.0,
        }
    }
}

impl LatencyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            scale: 0.0,
        }
    }

    /// Scale a base delay; zero when disabled.
    /// Scales above [`MAX_LATENCY_SCALE`] are clamped.
    pub fn apply(&self, base: Duration) -> Duration {
        if !self.enabled || self.scale.is_nan() || self.scale <= 0.0 {
            return Duration::ZERO;
        }
        let scale = self.scale.min(MAX_LATENCY_SCALE);
        Duration::try_from_secs_f64(base.as_secs_f64() * scale).unwrap_or(base)
    }
}

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl StoreConfig {
    /// Config with no artificial delays, for tests and scripting
    pub fn instant() -> Self {
        Self {
            latency: LatencyConfig::disabled(),
            ..Self::default()
        }
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_code.trim().is_empty() {
            return Err(ConfigError::Invalid("admin_code must not be empty".into()));
        }
        if !(0.0..=MAX_LATENCY_SCALE).contains(&self.latency.scale) {
            return Err(ConfigError::Invalid(format!(
                "latency.scale must be between 0 and {}",
                MAX_LATENCY_SCALE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = StoreConfig::from_toml("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.admin_code, "ADMIN2026");
        assert!(config.legacy_login_fallback);
    }

    #[test]
    fn test_partial_override() {
        let config = StoreConfig::from_toml(
            r#"
            legacy_login_fallback = false

            [latency]
            scale = 0.5
            "#,
        )
        .unwrap();
        assert!(!config.legacy_login_fallback);
        assert!(config.latency.enabled);
        assert_eq!(config.latency.apply(Duration::from_millis(800)).as_millis(), 400);
        assert_eq!(config.admin_slot_count, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            StoreConfig::from_toml("admin_code = \"  \""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StoreConfig::from_toml("[latency]\nscale = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StoreConfig::from_toml("enforce_capacity = \"yes\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parkease.toml");
        assert!(matches!(
            StoreConfig::load(&path),
            Err(ConfigError::NotFound(_))
        ));
        assert_eq!(
            StoreConfig::load_or_default(&path).unwrap(),
            StoreConfig::default()
        );

        std::fs::write(&path, "admin_slot_count = 12").unwrap();
        assert_eq!(StoreConfig::load(&path).unwrap().admin_slot_count, 12);
    }

    #[test]
    fn test_huge_scale_rejected() {
        assert!(matches!(
            StoreConfig::from_toml("[latency]\nscale = 1e30"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(StoreConfig::from_toml("[latency]\nscale = 1000.0").is_ok());
    }

    #[test]
    fn test_apply_never_panics() {
        let base = Duration::from_millis(1200);
        let huge = LatencyConfig {
            enabled: true,
            scale: 1e30,
        };
        let clamped = huge.apply(base);
        assert!(clamped > Duration::from_secs(1199) && clamped <= Duration::from_secs(1201));

        let nan = LatencyConfig {
            enabled: true,
            scale: f64::NAN,
        };
        assert_eq!(nan.apply(base), Duration::ZERO);

        let infinite = LatencyConfig {
            enabled: true,
            scale: f64::INFINITY,
        };
        assert!(infinite.apply(base) <= Duration::from_secs(1200));
    }

    #[test]
    fn test_disabled_latency_is_zero() {
        assert_eq!(
            LatencyConfig::disabled().apply(Duration::from_secs(1)),
            Duration::ZERO
        );
    }
}
