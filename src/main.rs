//! E-Redes to InfluxDB2 Forwarder
//!
//! This application periodically signs in to the E-Redes utility provider,
//! fetches electricity load-curve readings for a configurable historical
//! window, and forwards them to InfluxDB2 for storage and visualization.
//!
//! # Architecture
//!
//! One supervised collection task runs a full cycle per interval:
//! sign-in → usage fetch → record extraction → emit. Cycles are strictly
//! sequential and never overlap; each cycle recomputes its request window
//! and re-authenticates from scratch.
//!
//! # Features
//!
//! - Automatic task restart on failure
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Timeout protection for hung cycles
//! - Configurable collection interval and request window

mod config;
mod eredes;
mod error;
mod influxdb;
mod model;

#[cfg(test)]
mod test_utils;

use crate::eredes::{
    AuthClient, FixedTokenAuthClient, HttpAuthClient, LoadCurveCollector, RecordExtractor,
    Transport, UsageFetcher, WindowConfig,
};
use crate::error::ConfigError;
use crate::model::{readings_to_points, BufferingAccumulator};
use chrono::Local;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinError;
use tokio::time;
use tokio::time::{sleep, Duration};

/// Application entry point.
///
/// Loads configuration, wires the collector by constructor injection, and
/// manages the main event loop with signal handling for graceful shutdown.
#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let collector_config =
        Arc::new(config::load_collector_config().expect("Failed to load CollectorConfig"));
    let influx_config = config::load_influx_config().expect("Failed to load InfluxConfig");
    let influx_client = Arc::new(influxdb::Client::new(influx_config));

    let eredes_config = config::load_eredes_config().expect("Failed to load EredesConfig");
    let parser_config = config::load_parser_config().expect("Failed to load ParserConfig");
    let collector = Arc::new(
        build_collector(&eredes_config, parser_config).expect("Failed to build collector"),
    );

    // Factory for the collector task so it can be recreated after failures
    let create_collect_usage_task = || -> tokio::task::JoinHandle<()> {
        let config = Arc::clone(&collector_config);
        tokio::spawn(create_collect_task(
            Arc::clone(&influx_client),
            Arc::clone(&collector),
            Duration::from_secs(config.interval_sec),
            "usage_collector",
            config.task_timeout_seconds,
        ))
    };
    let mut collect_usage_task = create_collect_usage_task();

    let mut sig_term = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    // Main event loop with signal handling and task supervision
    loop {
        tokio::select! {
            // Handle SIGTERM for graceful shutdown in containers
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            // Handle Ctrl-C for manual termination
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            // Monitor the collector task and restart on failure
            result = &mut collect_usage_task => {
                handle_task_result("usage_collector", result);
                collect_usage_task = create_collect_usage_task();
            }
        }
    }
}

/// Wires the collection cycle from configuration.
///
/// The auth variant is chosen here, once: `dry_run` swaps the network-backed
/// sign-in for the fixed-token fake, so cycle logic itself never branches on
/// a test flag.
fn build_collector(
    config: &config::EredesConfig,
    parser_config: config::ParserConfig,
) -> Result<LoadCurveCollector, ConfigError> {
    let transport = Arc::new(Transport::from_config(config)?);

    let auth: Box<dyn AuthClient> = if config.dry_run {
        Box::new(FixedTokenAuthClient::default())
    } else {
        Box::new(HttpAuthClient::new(
            Arc::clone(&transport),
            config.sign_in_url.clone(),
            config.username.clone(),
            config.password.clone(),
        ))
    };
    let fetcher = UsageFetcher::new(Arc::clone(&transport), config.usage_url.clone());
    let extractor = RecordExtractor::new(parser_config);
    let window = WindowConfig::new(
        chrono::Duration::hours(config.history_interval_hours as i64),
        config.start_date.clone(),
    );

    Ok(LoadCurveCollector::new(
        auth,
        fetcher,
        extractor,
        window,
        config.cpe.clone(),
        config.dry_run,
    ))
}

/// Wraps a future with a timeout to prevent tasks from hanging indefinitely.
///
/// Logs an error if the task times out but doesn't propagate it; the
/// supervisor starts a fresh cycle afterwards.
async fn with_timeout<F>(task_name: &'static str, future: F, timeout_seconds: u64)
where
    F: IntoFuture,
{
    let timeout_duration = Duration::from_secs(timeout_seconds);

    match time::timeout(timeout_duration, future).await {
        Ok(_) => {}
        Err(_) => tracing::error!("Task {} timed out.", task_name),
    }
}

/// Executes a single collection cycle and sleeps for the interval.
///
/// Cycle errors are recorded by the accumulator and logged; an InfluxDB
/// write failure is logged but doesn't crash the task. The cycle itself is
/// wrapped in a timeout to prevent hanging.
async fn create_collect_task(
    influx_client: Arc<influxdb::Client>,
    collector: Arc<LoadCurveCollector>,
    interval: Duration,
    task_name: &'static str,
    timeout_seconds: u64,
) {
    with_timeout(
        task_name,
        run_collection_cycle(influx_client, collector),
        timeout_seconds,
    )
    .await;
    sleep(interval).await;
}

/// One gather-and-write pass.
///
/// A failed cycle yields zero points; errors were already reported through
/// the accumulator, so this only has to decide whether there is anything to
/// write.
async fn run_collection_cycle(
    influx_client: Arc<influxdb::Client>,
    collector: Arc<LoadCurveCollector>,
) {
    let acc = BufferingAccumulator::new();
    collector.gather(&acc, Local::now()).await;

    let errors = acc.drain_errors();
    let readings = acc.drain_readings();
    if readings.is_empty() {
        if errors.is_empty() {
            tracing::info!("No readings to add");
        }
        return;
    }

    let points = readings_to_points(readings);
    match influx_client.write(points).await {
        Ok(_) => tracing::info!("Successfully wrote points to InfluxDB"),
        Err(e) => tracing::error!("Failed to write points to InfluxDB: {:?}", e),
    }
}

/// Handles the result of a tokio task, logging success or failure.
///
/// Used in the main loop to detect and log task crashes before restarting.
fn handle_task_result(task_name: &str, result: Result<(), JoinError>) {
    match result {
        Ok(_) => {
            tracing::debug!("Task {} completed.", task_name);
        }
        Err(e) => {
            tracing::error!("Task {} failed: {:?}", task_name, e);
        }
    }
}
