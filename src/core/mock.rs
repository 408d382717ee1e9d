//! Mock telemetry data generation.
//!
//! Synthesizes plausible samples so consumers keep rendering while the
//! backend is unreachable. Generated values match the shape of real
//! responses exactly.

use std::collections::HashMap;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::core::client::{DetectionResult, NetworkMetricsSample, Severity, SystemHealth};

/// Source addresses used for generated detections
const SOURCE_IPS: [&str; 5] = [
    "192.168.1.100",
    "10.0.0.50",
    "172.16.0.25",
    "203.0.113.10",
    "198.51.100.5",
];

const SEVERITIES: [Severity; 4] = [
    Severity::Low,
    Severity::Medium,
    Severity::High,
    Severity::Critical,
];

/// Generate a plausible network metrics sample stamped with the current time
pub fn network_metrics() -> NetworkMetricsSample {
    let mut rng = rand::thread_rng();

    NetworkMetricsSample {
        packets_per_second: rng.gen_range(500..1500),
        bytes_per_second: rng.gen_range(500_000..1_500_000),
        connections: rng.gen_range(50..150),
        avg_latency: rng.gen_range(10.0..60.0),
        cpu_usage: rng.gen_range(10.0..90.0),
        memory_usage: rng.gen_range(20.0..90.0),
        timestamp: Utc::now(),
    }
}

/// Fixed health fallback reporting a service that has been up for a day
pub fn system_health() -> SystemHealth {
    SystemHealth {
        status: "HEALTHY".to_string(),
        uptime: Utc::now().timestamp_millis() - 86_400_000,
        version: "1.0.0".to_string(),
    }
}

/// Generate `count` detections, most recent first at one minute spacing
///
/// The attack flag always agrees with the score crossing the 50 point
/// threshold; severity is drawn independently of the score.
pub fn recent_detections(count: usize) -> Vec<DetectionResult> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    (0..count)
        .map(|i| {
            let score = rng.gen_range(0.0..100.0);

            let mut features = HashMap::new();
            features.insert("packet_rate".to_string(), rng.gen_range(0.0..1000.0));
            features.insert("byte_rate".to_string(), rng.gen_range(0.0..1_000_000.0));
            features.insert("flow_duration".to_string(), rng.gen_range(0.0..300.0));
            features.insert("protocol_type".to_string(), rng.gen_range(0..3) as f64);
            features.insert("packet_size_variance".to_string(), rng.gen_range(0.0..500.0));

            DetectionResult {
                source_ip: SOURCE_IPS[rng.gen_range(0..SOURCE_IPS.len())].to_string(),
                score,
                is_ddos: score > 50.0,
                features,
                explanation: None,
                severity: SEVERITIES[rng.gen_range(0..SEVERITIES.len())],
                timestamp: now - Duration::milliseconds(i as i64 * 60_000),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_metrics_ranges() {
        for _ in 0..50 {
            let sample = network_metrics();

            assert!((500..1500).contains(&sample.packets_per_second));
            assert!((500_000..1_500_000).contains(&sample.bytes_per_second));
            assert!((50..150).contains(&sample.connections));
            assert!(sample.avg_latency >= 10.0 && sample.avg_latency < 60.0);
            assert!(sample.cpu_usage >= 10.0 && sample.cpu_usage < 90.0);
            assert!(sample.memory_usage >= 20.0 && sample.memory_usage < 90.0);
        }
    }

    #[test]
    fn test_detections_count_and_spacing() {
        let detections = recent_detections(10);
        assert_eq!(detections.len(), 10);

        let newest = detections[0].timestamp;
        for (i, detection) in detections.iter().enumerate() {
            let offset = newest - detection.timestamp;
            assert_eq!(offset, Duration::milliseconds(i as i64 * 60_000));
        }
    }

    #[test]
    fn test_attack_flag_follows_score() {
        for detection in recent_detections(100) {
            assert_eq!(detection.is_ddos, detection.score > 50.0);
            assert!(detection.score >= 0.0 && detection.score < 100.0);
            assert!(SOURCE_IPS.contains(&detection.source_ip.as_str()));
            assert_eq!(detection.features.len(), 5);
        }
    }

    #[test]
    fn test_system_health_fallback() {
        let health = system_health();

        assert_eq!(health.status, "HEALTHY");
        assert_eq!(health.version, "1.0.0");
        assert!(health.uptime <= Utc::now().timestamp_millis() - 86_400_000);
    }
}
