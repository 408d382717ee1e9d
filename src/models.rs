use serde::{Deserialize, Serialize};

/// Detection API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the detection API
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Network metrics refresh interval in milliseconds
    pub metrics_interval_ms: u64,
    /// Recent detections refresh interval in milliseconds
    pub detections_interval_ms: u64,
    /// Maximum number of detections fetched per refresh
    pub detections_limit: usize,
    /// System health refresh interval in milliseconds
    pub health_interval_ms: u64,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Detection API configuration
    pub api: ApiConfig,
    /// Polling configuration
    pub polling: PollingConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            metrics_interval_ms: 2000,
            detections_interval_ms: 3000,
            detections_limit: 20,
            health_interval_ms: 5000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}
