//! Tracing setup for the `agri` binary.
//!
//! Filter: `AGRI_LOG`, else `RUST_LOG`, else `warn`. Output goes to stderr, or to a daily
//! rolling `agri.log` in `log_dir` when one is configured.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("AGRI_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Keep the returned guard alive until exit so file logs flush.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "agri.log"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| e as Box<dyn std::error::Error>)?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| e as Box<dyn std::error::Error>)?;
            Ok(None)
        }
    }
}
