//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so logs go to a file. `RUST_LOG`
//! overrides the default `info` filter.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_NAME: &str = "binrain.log";

/// Install the global subscriber writing to the default log directory.
///
/// Returns the log file path, or `None` if logging could not be set up.
pub fn init() -> Option<PathBuf> {
    let dir = binrain_config::log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path).ok()?;
    build_subscriber(file).try_init().ok()?;
    Some(path)
}

/// Subscriber writing plain-text events to `log_file`.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

/// Describe where logs go, for the startup message.
pub fn describe(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("logging to {}", path.display()),
        None => "logging disabled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_log_file() {
        let log = tempfile::NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("intro drawing unavailable");
        });

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("WARN"));
        assert!(contents.contains("intro drawing unavailable"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None), "logging disabled");
        assert!(describe(Some(Path::new("/tmp/binrain.log"))).ends_with("/tmp/binrain.log"));
    }
}
