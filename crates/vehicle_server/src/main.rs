//! # vehicle_server
//!
//! Exposes a [`VehicleRegistry`] over NATS request/reply.
//!
//! ## Startup Sequence
//!
//! 1. Load registry configuration from the environment, then apply CLI
//!    overrides.
//! 2. Connect to NATS (default `nats://127.0.0.1:4222`).
//! 3. Start the eviction task if an eviction horizon is configured.
//! 4. Subscribe to `{prefix}.*` and serve requests.

mod api;
mod handler;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_net::connection::DEFAULT_NATS_URL;
use vehicle_net::subjects::DEFAULT_PREFIX;
use vehicle_net::{NatsConnection, Subjects};
use vehicle_registry::config::{EVICTION_HORIZON_ENV, TIME_WINDOW_ENV, parse_duration};
use vehicle_registry::{RegistryConfig, VehicleRegistry};

use api::Api;
use handler::Handler;

/// The environment variable used to override the NATS URL.
const NATS_URL_ENV: &str = "NATS_URL";

#[derive(Parser)]
#[command(name = "vehicle_server", about = "Vehicle proximity registry over NATS")]
struct Args {
    /// NATS server URL
    #[arg(short, long, env = NATS_URL_ENV, default_value = DEFAULT_NATS_URL)]
    nats_url: String,

    /// NATS subject prefix
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Staleness window for proximity queries (e.g. `5s`, `500ms`)
    #[arg(short, long, value_parser = parse_time_window)]
    time_window: Option<Duration>,

    /// Evict vehicles idle for longer than this (e.g. `10m`)
    #[arg(short, long, value_parser = parse_eviction_horizon)]
    eviction_horizon: Option<Duration>,
}

fn parse_time_window(raw: &str) -> Result<Duration, String> {
    parse_duration(TIME_WINDOW_ENV, raw).map_err(|e| e.to_string())
}

fn parse_eviction_horizon(raw: &str) -> Result<Duration, String> {
    parse_duration(EVICTION_HORIZON_ENV, raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = RegistryConfig::from_env()?;
    if let Some(window) = args.time_window {
        config = config.with_time_window(window);
    }
    if let Some(horizon) = args.eviction_horizon {
        config = config.with_eviction_horizon(horizon);
    }
    info!(
        time_window = ?config.time_window,
        parallel_threshold = config.parallel_threshold,
        eviction_horizon = ?config.eviction_horizon,
        "vehicle registry starting"
    );

    let registry = Arc::new(VehicleRegistry::new(config));

    let conn = NatsConnection::connect_to(&args.nats_url).await?;

    if let Some(horizon) = registry.config().eviction_horizon {
        spawn_eviction(Arc::clone(&registry), horizon);
    }

    let handler = Handler::new(registry, Subjects::new(args.prefix));
    Api::new(handler, conn).run().await?;

    info!("vehicle server shut down");
    Ok(())
}

/// Periodically drop vehicles idle for longer than `horizon`.
fn spawn_eviction(registry: Arc<VehicleRegistry>, horizon: Duration) {
    let period = horizon.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = registry.evict_stale();
            if removed > 0 {
                info!(removed, remaining = registry.len(), "evicted idle vehicles");
            }
        }
    });
}
