//! In-session alert feed derived from detection results.
//!
//! Alerts exist only in the viewing session's memory. Lifecycle changes
//! are never reported back to the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::client::{DetectionResult, Severity};

/// Lifecycle status of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    Open,
    Acknowledged,
    Resolved,
}

/// Alert derived from an attack detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    /// Alert ID
    pub id: String,
    /// Alert title
    pub title: String,
    /// Alert description
    pub description: String,
    /// Severity inherited from the detection
    pub severity: Severity,
    /// Lifecycle status
    pub status: AlertStatus,
    /// Source address of the detected attack
    pub source_ip: String,
    /// Threat score of the detection
    pub score: f64,
    /// Detection timestamp
    pub timestamp: DateTime<Utc>,
    /// Resolution timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Session-local alert feed
#[derive(Debug, Default)]
pub struct AlertFeed {
    alerts: Vec<AlertItem>,
}

impl AlertFeed {
    /// Create an empty alert feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch of detections into the feed
    ///
    /// Only detections flagged as attacks become alerts. The feed is
    /// keyed by source address and detection timestamp, so re-ingesting
    /// a batch never duplicates alerts or resets their lifecycle status.
    ///
    /// Returns the number of alerts created.
    pub fn ingest(&mut self, detections: &[DetectionResult]) -> usize {
        let mut created = 0;

        for detection in detections.iter().filter(|d| d.is_ddos) {
            let exists = self.alerts.iter().any(|alert| {
                alert.source_ip == detection.source_ip && alert.timestamp == detection.timestamp
            });
            if exists {
                continue;
            }

            self.alerts.push(AlertItem {
                id: Uuid::new_v4().to_string(),
                title: "DDoS Attack Detected".to_string(),
                description: format!(
                    "Suspicious traffic pattern from {} with confidence score {:.1}",
                    detection.source_ip, detection.score
                ),
                severity: detection.severity,
                status: AlertStatus::Open,
                source_ip: detection.source_ip.clone(),
                score: detection.score,
                timestamp: detection.timestamp,
                resolved_at: None,
            });
            created += 1;
        }

        created
    }

    /// Mark an alert as acknowledged
    ///
    /// Returns false if no alert with the given ID exists.
    pub fn acknowledge(&mut self, alert_id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == alert_id) {
            Some(alert) => {
                alert.status = AlertStatus::Acknowledged;
                true
            }
            None => false,
        }
    }

    /// Mark an alert as resolved, stamping the resolution time
    ///
    /// Returns false if no alert with the given ID exists.
    pub fn resolve(&mut self, alert_id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == alert_id) {
            Some(alert) => {
                alert.status = AlertStatus::Resolved;
                alert.resolved_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// All alerts in ingestion order
    pub fn alerts(&self) -> &[AlertItem] {
        &self.alerts
    }

    /// Number of alerts still open
    pub fn open_count(&self) -> usize {
        self.alerts.iter().filter(|a| a.status == AlertStatus::Open).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn detection(source_ip: &str, score: f64, minutes_ago: i64) -> DetectionResult {
        DetectionResult {
            source_ip: source_ip.to_string(),
            score,
            is_ddos: score > 50.0,
            features: HashMap::new(),
            explanation: None,
            severity: Severity::High,
            timestamp: Utc::now() - chrono::Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_only_attacks_become_alerts() {
        let mut feed = AlertFeed::new();
        let created = feed.ingest(&[
            detection("192.168.1.100", 87.0, 0),
            detection("10.0.0.50", 12.0, 1),
            detection("172.16.0.25", 55.0, 2),
        ]);

        assert_eq!(created, 2);
        assert_eq!(feed.alerts().len(), 2);
        assert_eq!(feed.open_count(), 2);
        assert!(feed.alerts().iter().all(|a| a.status == AlertStatus::Open));
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut feed = AlertFeed::new();
        feed.ingest(&[detection("192.168.1.100", 91.5, 0)]);
        let id = feed.alerts()[0].id.clone();

        assert!(feed.acknowledge(&id));
        assert_eq!(feed.alerts()[0].status, AlertStatus::Acknowledged);
        assert_eq!(feed.open_count(), 0);

        assert!(feed.resolve(&id));
        assert_eq!(feed.alerts()[0].status, AlertStatus::Resolved);
        assert!(feed.alerts()[0].resolved_at.is_some());

        assert!(!feed.acknowledge("no-such-alert"));
    }

    #[test]
    fn test_reingestion_preserves_status() {
        let mut feed = AlertFeed::new();
        let batch = vec![detection("192.168.1.100", 87.0, 0)];

        feed.ingest(&batch);
        let id = feed.alerts()[0].id.clone();
        feed.acknowledge(&id);

        let created = feed.ingest(&batch);
        assert_eq!(created, 0);
        assert_eq!(feed.alerts().len(), 1);
        assert_eq!(feed.alerts()[0].status, AlertStatus::Acknowledged);
    }
}
