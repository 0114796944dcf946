use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "opsboard=info";

/// Send tracing output to a daily-rolling file under `log_dir`; the
/// terminal itself belongs to the UI. Keep the returned guard alive for
/// the life of the process or buffered lines are lost.
pub fn init_logging(log_dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(log_dir, "opsboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .try_init();

    guard
}

/// Default log directory: the platform cache dir, or the working directory.
pub fn default_log_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("opsboard"))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<tracing_subscriber::filter::Directive>().is_ok());
    }

    #[test]
    fn init_logging_writes_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let guard = init_logging(dir.path());
        tracing::info!(event = "test.logging");
        drop(guard);
        assert!(dir.path().exists());
    }
}
