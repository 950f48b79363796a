//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "INTENT_BRIDGE_LOG";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/intent-bridge/logs/` so that stdout
/// stays reserved for channel responses.
/// Log level is controlled by the `INTENT_BRIDGE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// INTENT_BRIDGE_LOG=debug intent-bridge resolve "https://example.com"
/// INTENT_BRIDGE_LOG=bridge_host=trace intent-bridge serve
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "intent-bridge.log");

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("intent-bridge starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Default to info for our crates, allow override via `INTENT_BRIDGE_LOG`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new("intent_bridge=info,bridge_core=info,bridge_host=info,bridge_app=info,warn")
    })
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("intent-bridge").join("logs")
}
