//! Core functionality for the telemetry service.
//!
//! This module contains the core components of the service,
//! including the API client, transport layer, polling watchers,
//! mock data generation, alerting, and traffic simulation.

pub mod alerts;
pub mod analytics;
pub mod client;
pub mod mock;
pub mod poller;
pub mod simulator;
pub mod transport;

pub use alerts::{AlertFeed, AlertItem, AlertStatus};
pub use analytics::DetectionStats;
pub use client::{
    DetectionResult, NetworkMetricsSample, Severity, SystemHealth, TelemetryClient, TelemetryError,
};
pub use poller::{
    spawn_poller, watch_network_metrics, watch_recent_detections, watch_system_health, PollHandle,
    PollSnapshot,
};
pub use simulator::{Intensity, SimulationConfig, SimulationReport, TrafficProfile, TrafficSimulator};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
