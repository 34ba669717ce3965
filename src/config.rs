use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use meal_planning::DEFAULT_WEEKLY_CALORIES;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Directory for the persisted preference files. When unset, the
    /// platform data directory is used.
    #[serde(default)]
    pub data_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default = "default_weekly_calories")]
    pub weekly_calories: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            weekly_calories: default_weekly_calories(),
        }
    }
}

fn default_weekly_calories() -> u32 {
    DEFAULT_WEEKLY_CALORIES
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALMUSE__PLANNER__WEEKLY_CALORIES, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("planner.weekly_calories", i64::from(DEFAULT_WEEKLY_CALORIES))?
            .set_default("observability.log_level", "info")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional - ignore if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALMUSE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.weekly_calories == 0 {
            return Err("Weekly calorie limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.planner.weekly_calories, DEFAULT_WEEKLY_CALORIES);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.storage.data_dir, None);
    }

    #[test]
    fn test_validation_zero_weekly_calories() {
        let config = Config {
            planner: PlannerConfig { weekly_calories: 0 },
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}
