//! Telemetry client for the detection API.
//!
//! This module provides the single gateway between consumers and the
//! remote detection service: retrieval of network metrics, recent
//! detections and system health, and submission of feature vectors for
//! classification. Read operations degrade to locally generated mock
//! data whenever the backend is unreachable, so the data layer never
//! blocks on backend availability.

use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use log::warn;
use metrics::counter;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::mock;
use crate::core::transport::{Transport, TransportError};

/// Errors that can occur during telemetry operations
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("unexpected status code: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Severity label attached to a detection, independent of its score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Snapshot of current network traffic metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetricsSample {
    /// Packets observed per second
    pub packets_per_second: u64,
    /// Bytes observed per second
    pub bytes_per_second: u64,
    /// Active connection count
    pub connections: u32,
    /// Average latency in milliseconds
    pub avg_latency: f64,
    /// CPU utilization percentage
    pub cpu_usage: f64,
    /// Memory utilization percentage
    pub memory_usage: f64,
    /// Capture timestamp
    pub timestamp: DateTime<Utc>,
}

/// Ranked feature contribution within a detection explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    pub value: f64,
}

/// Explanation block attached to a detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionExplanation {
    /// Features ranked by importance
    pub top_features: Vec<FeatureImportance>,
    /// Model confidence in the classification
    pub confidence: f64,
    /// Free-text reasoning
    pub reasoning: String,
}

/// Result of classifying one traffic sample
///
/// For server-supplied results the attack flag and the score are reported
/// independently; callers must not assume the two always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Source address of the classified traffic
    pub source_ip: String,
    /// Continuous threat score in [0, 100]
    pub score: f64,
    /// Whether the sample was classified as an attack
    pub is_ddos: bool,
    /// Named numeric traffic measurements
    pub features: HashMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<DetectionExplanation>,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

/// System health posture reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Status label
    pub status: String,
    /// Milliseconds since the Unix epoch at which the service started
    pub uptime: i64,
    /// Version string
    pub version: String,
}

/// Request body for the detect endpoint
#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    features: &'a HashMap<String, f64>,
}

/// Telemetry API client
///
/// Stateless apart from its transport, so a single instance can be shared
/// across any number of concurrent watchers without locking.
pub struct TelemetryClient {
    /// HTTP transport
    transport: Arc<dyn Transport>,
}

impl TelemetryClient {
    /// Create a new telemetry client over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Submit a feature vector for classification
    ///
    /// # Arguments
    ///
    /// * `features` - Named numeric traffic measurements
    ///
    /// # Returns
    ///
    /// * `Ok(DetectionResult)` with the classification outcome
    /// * `Err(TelemetryError)` if the request failed. Submission is a
    ///   user-initiated action, so failures are surfaced to the caller
    ///   instead of being masked with mock data.
    pub async fn submit_detection_sample(
        &self,
        features: &HashMap<String, f64>,
    ) -> Result<DetectionResult, TelemetryError> {
        let body = serde_json::to_value(DetectRequest { features })?;
        let response = self.transport.post_json("/detect", body).await?;

        if !response.is_success() {
            return Err(TelemetryError::Status(response.status));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch current network metrics
    ///
    /// On any failure a locally generated sample is substituted, so this
    /// operation never fails.
    pub async fn fetch_network_metrics(&self) -> NetworkMetricsSample {
        match self.try_get::<NetworkMetricsSample>("/metrics").await {
            Ok(sample) => sample,
            Err(err) => {
                warn!("Metrics request failed, generating mock data: {}", err);
                counter!("telemetry_mock_fallback_total", 1, "operation" => "metrics");
                mock::network_metrics()
            }
        }
    }

    /// Fetch the system health posture
    ///
    /// On any failure a fixed fallback record is substituted, so this
    /// operation never fails.
    pub async fn fetch_system_health(&self) -> SystemHealth {
        match self.try_get::<SystemHealth>("/health").await {
            Ok(health) => health,
            Err(err) => {
                warn!("Health request failed, using fallback status: {}", err);
                counter!("telemetry_mock_fallback_total", 1, "operation" => "health");
                mock::system_health()
            }
        }
    }

    /// Fetch up to `limit` recent detections, most recent first
    ///
    /// On any failure exactly `limit` generated records are substituted,
    /// so this operation never fails.
    pub async fn fetch_recent_detections(&self, limit: usize) -> Vec<DetectionResult> {
        let path = format!("/detections?limit={}", limit);
        match self.try_get::<Vec<DetectionResult>>(&path).await {
            Ok(detections) => detections,
            Err(err) => {
                warn!("Detections request failed, generating mock data: {}", err);
                counter!("telemetry_mock_fallback_total", 1, "operation" => "detections");
                mock::recent_detections(limit)
            }
        }
    }

    async fn try_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TelemetryError> {
        let response = self.transport.get(path).await?;

        if !response.is_success() {
            return Err(TelemetryError::Status(response.status));
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}
