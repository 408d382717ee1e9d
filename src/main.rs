//! DDoS Telemetry Service
//!
//! This is the main entry point for the telemetry daemon.
//! It wires the API client and polling watchers together and logs the
//! latest snapshots until interrupted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tokio::time;

use ddos_telemetry::config;
use ddos_telemetry::core::analytics;
use ddos_telemetry::core::{
    watch_network_metrics, watch_recent_detections, watch_system_health, AlertFeed,
    ReqwestTransport, TelemetryClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting DDoS telemetry service...");

    // Load configuration
    let config = config::load_config().context("Failed to load configuration")?;

    if let Err(e) = PrometheusBuilder::new().install() {
        warn!("Failed to install Prometheus exporter: {}", e);
    }

    // Wire transport and client
    let transport = ReqwestTransport::new(&config.api).context("Failed to create HTTP transport")?;
    let client = Arc::new(TelemetryClient::new(Arc::new(transport)));

    // Start polling watchers
    let metrics_watch = watch_network_metrics(
        Arc::clone(&client),
        Duration::from_millis(config.polling.metrics_interval_ms),
    );
    let detections_watch = watch_recent_detections(
        Arc::clone(&client),
        Duration::from_millis(config.polling.detections_interval_ms),
        config.polling.detections_limit,
    );
    let health_watch = watch_system_health(
        Arc::clone(&client),
        Duration::from_millis(config.polling.health_interval_ms),
    );

    let mut alert_feed = AlertFeed::new();
    let mut ticker = time::interval(Duration::from_secs(5));

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = ticker.tick() => {
                if let Some(metrics) = metrics_watch.latest().data {
                    info!(
                        "Traffic: {} pps, {} Bps, {} connections, {:.1} ms latency",
                        metrics.packets_per_second,
                        metrics.bytes_per_second,
                        metrics.connections,
                        metrics.avg_latency,
                    );
                }

                let detections = detections_watch.latest().data.unwrap_or_default();
                let created = alert_feed.ingest(&detections);
                if created > 0 {
                    warn!("{} new alerts raised", created);
                }

                let stats = analytics::summarize(&detections, &alert_feed);
                info!(
                    "Detections: {} total, {} attacks, {} open alerts, avg score {:.1}",
                    stats.total_detections,
                    stats.attacks_detected,
                    stats.open_alerts,
                    stats.avg_threat_score,
                );

                if let Some(health) = health_watch.latest().data {
                    info!("Backend health: {} (version {})", health.status, health.version);
                }
            }
        }
    }

    metrics_watch.stop();
    detections_watch.stop();
    health_watch.stop();

    info!("DDoS telemetry service stopped");
    Ok(())
}
