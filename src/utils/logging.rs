//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers for the SymphonyX client.

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// When a file path is configured, log output goes to both stdout and a
/// daily-rolling file. The returned guard must be kept alive for the
/// lifetime of the process to flush the file writer.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    let guard = match &config.file_path {
        Some(path) => {
            let file_appender = tracing_appender::rolling::daily(path, "symphonyx-client.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an authentication attempt outcome
pub fn log_auth_event(login_id: &str, success: bool, silent: bool) {
    if success {
        info!(login_id = login_id, silent = silent, "Login succeeded");
    } else {
        warn!(login_id = login_id, silent = silent, "Login failed");
    }
}

/// Log a completed fetch against the SymphonyX API
pub fn log_fetch(endpoint: &str, records: usize, skipped: usize) {
    debug!(
        endpoint = endpoint,
        records = records,
        skipped = skipped,
        "Fetch completed"
    );
}
