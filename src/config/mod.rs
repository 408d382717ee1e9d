//! Configuration management for the telemetry service.
//!
//! This module handles loading and managing application configuration
//! from environment variables and configuration files.

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use std::env;
use crate::models::Config;

/// Load configuration from the config file and environment variables
pub fn load_config() -> Result<Config, ConfigError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or_else(|_| "config/default.toml".to_string());

    let config = ConfigBuilder::builder()
        .add_source(File::with_name(&config_file).required(false))
        .add_source(Environment::default())
        .set_default("api.base_url", "http://localhost:8000")?
        .set_default("api.request_timeout_ms", 5000)?
        .set_default("polling.metrics_interval_ms", 2000)?
        .set_default("polling.detections_interval_ms", 3000)?
        .set_default("polling.detections_limit", 20)?
        .set_default("polling.health_interval_ms", 5000)?
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config().unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.polling.metrics_interval_ms, 2000);
        assert_eq!(config.polling.detections_interval_ms, 3000);
        assert_eq!(config.polling.detections_limit, 20);
        assert_eq!(config.polling.health_interval_ms, 5000);
    }
}
