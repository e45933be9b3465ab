//! ARTC: Main Entry Point
//!
//! Polls a simulated room and drives its heater and chiller through the
//! fuzzy controller.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                │
//! │   SimulatedRoom (Sensor+Actuator)   LogEventSink     │
//! │  ──────────────── Port Trait Boundary ─────────────  │
//! │   ┌──────────────────────────────────────────────┐   │
//! │   │   AppService · ClimateController · fuzzy     │   │
//! │   └──────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use artc::adapters::log_sink::LogEventSink;
use artc::adapters::sim_room::SimulatedRoom;
use artc::app::service::AppService;
use artc::config::SystemConfig;

#[derive(Parser)]
#[command(name = "artc")]
#[command(version)]
#[command(about = "Fuzzy-logic room temperature controller", long_about = None)]
struct Cli {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Room temperature in °C
    #[arg(short, long, default_value_t = 21.0)]
    temperature: f64,

    /// Barometric pressure in hPa
    #[arg(short, long, default_value_t = 1013.25)]
    pressure: f64,

    /// Relative humidity in %; the configured default is used when omitted
    #[arg(long)]
    humidity: Option<f64>,

    /// Stop after this many polls (runs forever when omitted)
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// Override the poll interval in seconds
    #[arg(long)]
    interval: Option<u32>,

    /// °C the simulated room gains per poll at full heater duty
    #[arg(long, default_value_t = 0.0)]
    drift: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 1. Logging ────────────────────────────────────────────
    let log_level = match cli.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("ARTC v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file or defaults) ──────────────────────────
    let mut config = match &cli.config {
        Some(path) => SystemConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SystemConfig::default(),
    };
    if let Some(secs) = cli.interval {
        config.poll_interval_secs = secs;
    }
    let interval = Duration::from_secs(u64::from(config.poll_interval_secs));

    // ── 3. Adapters + service ─────────────────────────────────
    let mut room =
        SimulatedRoom::new(cli.temperature, cli.pressure, cli.humidity).with_drift(cli.drift);
    let mut sink = LogEventSink::new(config.display_decimals);
    let mut app = AppService::new(config).context("building controller")?;

    app.start(&mut room, &mut sink);

    // ── 4. Poll loop ──────────────────────────────────────────
    loop {
        if let Err(e) = app.tick(&mut room, &mut sink) {
            warn!("Poll failed: {}", e);
        }

        if cli.iterations.is_some_and(|n| app.tick_count() >= n) {
            break;
        }
        thread::sleep(interval);
    }

    info!("Stopped after {} polls", app.tick_count());
    Ok(())
}
