//! Traffic simulation for exercising the detection pipeline.
//!
//! Generates synthetic feature vectors shaped like attack or benign
//! traffic and submits them through the telemetry client, one sample
//! per second.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::{self, MissedTickBehavior};

use crate::core::client::TelemetryClient;

/// Kind of traffic generated during a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrafficProfile {
    Ddos,
    Normal,
    /// Each sample is drawn from one of the other two profiles at random
    Mixed,
}

/// Simulated traffic intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Packet rate preset for this intensity
    pub fn base_packet_rate(self) -> f64 {
        match self {
            Intensity::Low => 500.0,
            Intensity::Medium => 1000.0,
            Intensity::High => 2000.0,
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Traffic profile to generate
    pub profile: TrafficProfile,
    /// Number of one second ticks to run
    pub duration_secs: u32,
    /// Traffic intensity
    pub intensity: Intensity,
    /// Packet rate override; defaults to the intensity preset
    pub packet_rate: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            profile: TrafficProfile::Ddos,
            duration_secs: 60,
            intensity: Intensity::Medium,
            packet_rate: None,
        }
    }
}

/// Outcome of a completed simulation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// Traffic profile that was generated
    pub profile: TrafficProfile,
    /// Samples submitted, including failed submissions
    pub samples_sent: u32,
    /// Submissions that failed and produced no classification
    pub failed_submissions: u32,
    /// Classified samples flagged as attacks
    pub attacks_flagged: u32,
    /// Percentage of classified samples flagged as attacks
    pub detection_rate: f64,
    /// Mean score across classified samples
    pub avg_score: f64,
}

/// Synthetic traffic generator driving the detect endpoint
pub struct TrafficSimulator {
    client: Arc<TelemetryClient>,
    config: SimulationConfig,
}

impl TrafficSimulator {
    /// Create a simulator over the given client
    pub fn new(client: Arc<TelemetryClient>, config: SimulationConfig) -> Self {
        Self { client, config }
    }

    fn packet_rate(&self) -> f64 {
        self.config
            .packet_rate
            .unwrap_or_else(|| self.config.intensity.base_packet_rate())
    }

    /// Build one feature vector for the configured profile
    fn sample_features(&self) -> HashMap<String, f64> {
        let mut rng = rand::thread_rng();

        let profile = match self.config.profile {
            TrafficProfile::Mixed => {
                if rng.gen_bool(0.5) {
                    TrafficProfile::Ddos
                } else {
                    TrafficProfile::Normal
                }
            }
            other => other,
        };

        let mut features = HashMap::new();
        match profile {
            TrafficProfile::Ddos => {
                let rate = self.packet_rate();
                features.insert("packet_rate".to_string(), rate + rng.gen_range(-100.0..100.0));
                features.insert("byte_rate".to_string(), rate * 64.0 + rng.gen_range(-5000.0..5000.0));
                features.insert("flow_duration".to_string(), rng.gen_range(0.0..10.0));
                features.insert("protocol_type".to_string(), rng.gen_range(0..3) as f64);
                features.insert("packet_size_variance".to_string(), rng.gen_range(0.0..100.0));
            }
            _ => {
                features.insert("packet_rate".to_string(), rng.gen_range(10.0..120.0));
                features.insert("byte_rate".to_string(), rng.gen_range(1_000.0..80_000.0));
                features.insert("flow_duration".to_string(), rng.gen_range(5.0..300.0));
                features.insert("protocol_type".to_string(), rng.gen_range(0..3) as f64);
                features.insert("packet_size_variance".to_string(), rng.gen_range(0.0..40.0));
            }
        }

        features
    }

    /// Run the simulation to completion
    ///
    /// Individual submission failures are counted rather than aborting
    /// the run.
    pub async fn run(&self) -> SimulationReport {
        let mut ticker = time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut sent = 0u32;
        let mut failed = 0u32;
        let mut flagged = 0u32;
        let mut score_sum = 0.0;

        for _ in 0..self.config.duration_secs {
            ticker.tick().await;

            let features = self.sample_features();
            sent += 1;
            match self.client.submit_detection_sample(&features).await {
                Ok(result) => {
                    score_sum += result.score;
                    if result.is_ddos {
                        flagged += 1;
                    }
                    debug!("Simulated sample classified with score {:.1}", result.score);
                }
                Err(err) => {
                    failed += 1;
                    warn!("Simulated sample submission failed: {}", err);
                }
            }
        }

        let classified = sent - failed;
        SimulationReport {
            profile: self.config.profile,
            samples_sent: sent,
            failed_submissions: failed,
            attacks_flagged: flagged,
            detection_rate: if classified == 0 {
                0.0
            } else {
                f64::from(flagged) / f64::from(classified) * 100.0
            },
            avg_score: if classified == 0 {
                0.0
            } else {
                score_sum / f64::from(classified)
            },
        }
    }
}
