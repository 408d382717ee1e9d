//! DDoS Telemetry Service
//!
//! Data layer for real-time network security dashboards: an HTTP client
//! for the detection API that degrades to locally generated mock data,
//! and interval-driven polling watchers that publish the latest value
//! to their consumers.

pub mod config;
pub mod core;
pub mod models;
