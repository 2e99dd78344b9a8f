//! Jacksense Daemon - wired jack detection service.
//!
//! Finds the kernel input-event device that carries the headphone insertion
//! switch, tracks its switch state, and keeps the wired port availability
//! up to date for as long as the daemon runs.

use anyhow::{Context, Result};
use tokio::io::Interest;
use tokio::io::unix::AsyncFd;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod registry;
mod signals;

use jacksense_evdev::SwitchTracker;
use registry::MemoryPortRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so its log level can apply.
    let config = config::load_config()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "jacksense={level},jacksense_daemon={level}",
            level = config.daemon.log_level
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Jacksense daemon");
    info!(input_dir = %config.device.input_dir.display(), "Configuration loaded");

    // Discovery is one-shot: a machine without the hardware is a legitimate
    // final state, not an error.
    let Some(source) = jacksense_evdev::locate(&config.device.input_dir) else {
        warn!("No switch-capable input device found; jack detection unavailable");
        return Ok(());
    };

    let mut ports = MemoryPortRegistry::with_default_ports();
    let mut tracker = SwitchTracker::new(source);

    // Ports reflect reality from the start, even if no plug ever moves.
    tracker.prime(&mut ports);

    let mut shutdown_rx = signals::setup_signal_handlers()?;

    let mut readiness = AsyncFd::with_interest(tracker, Interest::READABLE)
        .context("Failed to register switch device with the reactor")?;

    info!("Daemon running. Press Ctrl+C to exit.");

    loop {
        tokio::select! {
            guard = readiness.readable_mut() => {
                let mut guard = guard.context("Switch device readiness lost")?;
                // Drain runs to would-block, so clearing readiness here is
                // accurate.
                guard.get_inner_mut().drain(&mut ports);
                guard.clear_ready();
            }

            _ = shutdown_rx.recv() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    // Teardown order: the reactor registration goes first, then the
    // tracker's decode state, then the descriptor itself.
    drop(readiness);

    info!("Jacksense daemon stopped");
    Ok(())
}
