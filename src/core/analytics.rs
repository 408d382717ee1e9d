//! Aggregate statistics over detection results.
//!
//! Pure in-memory derivation over the latest detections batch and the
//! session's alert feed.

use std::collections::HashSet;
use serde::Serialize;

use crate::core::alerts::AlertFeed;
use crate::core::client::{DetectionResult, Severity};

/// Summary counters for a batch of detections
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionStats {
    /// Detections in the batch
    pub total_detections: usize,
    /// Detections flagged as attacks
    pub attacks_detected: usize,
    /// Alerts still open in the session feed
    pub open_alerts: usize,
    /// Distinct source addresses seen
    pub unique_sources: usize,
    /// Mean threat score across the batch
    pub avg_threat_score: f64,
    /// Detections carrying the critical severity label
    pub critical_count: usize,
}

/// Summarize a batch of detections together with the current alert feed
pub fn summarize(detections: &[DetectionResult], alerts: &AlertFeed) -> DetectionStats {
    let unique_sources = detections
        .iter()
        .map(|d| d.source_ip.as_str())
        .collect::<HashSet<_>>()
        .len();

    let avg_threat_score = if detections.is_empty() {
        0.0
    } else {
        detections.iter().map(|d| d.score).sum::<f64>() / detections.len() as f64
    };

    DetectionStats {
        total_detections: detections.len(),
        attacks_detected: detections.iter().filter(|d| d.is_ddos).count(),
        open_alerts: alerts.open_count(),
        unique_sources,
        avg_threat_score,
        critical_count: detections
            .iter()
            .filter(|d| d.severity == Severity::Critical)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use chrono::Utc;

    fn detection(source_ip: &str, score: f64, severity: Severity) -> DetectionResult {
        DetectionResult {
            source_ip: source_ip.to_string(),
            score,
            is_ddos: score > 50.0,
            features: HashMap::new(),
            explanation: None,
            severity,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_counts() {
        let detections = vec![
            detection("192.168.1.100", 90.0, Severity::Critical),
            detection("192.168.1.100", 70.0, Severity::High),
            detection("10.0.0.50", 20.0, Severity::Low),
            detection("172.16.0.25", 40.0, Severity::Medium),
        ];

        let mut feed = AlertFeed::new();
        feed.ingest(&detections);

        let stats = summarize(&detections, &feed);
        assert_eq!(stats.total_detections, 4);
        assert_eq!(stats.attacks_detected, 2);
        assert_eq!(stats.open_alerts, 2);
        assert_eq!(stats.unique_sources, 3);
        assert_eq!(stats.avg_threat_score, 55.0);
        assert_eq!(stats.critical_count, 1);
    }

    #[test]
    fn test_summarize_empty_batch() {
        let stats = summarize(&[], &AlertFeed::new());
        assert_eq!(stats.total_detections, 0);
        assert_eq!(stats.avg_threat_score, 0.0);
    }
}
