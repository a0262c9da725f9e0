//! Structured logging and tracing for the relief generator.
//!
//! Provides span-based, filterable logging via the `tracing` ecosystem.
//! Console output carries timestamps and module paths; JSON file logging can
//! be enabled for post-mortem analysis of long generation runs. The config
//! system's `log_level` sets the default filter.

use relief_config::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written inside the log directory.
pub const LOG_FILE_NAME: &str = "relief.log";

/// Resolve the filter string from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

/// Initialize the tracing subscriber.
///
/// Sets up structured logging with:
/// - Console output with uptime timestamps, module paths, and severity levels
/// - JSON file logging into `log_dir` when `file_logging` is set
/// - Environment-based filtering (`RUST_LOG` wins over the config)
///
/// # Examples
///
/// ```no_run
/// use relief_log::init_logging;
/// use relief_config::Config;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, file_logging: bool, config: Option<&Config>) {
    let filter_str = filter_string(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if file_logging
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,relief_terrain=trace".to_string();
        assert_eq!(filter_string(Some(&config)), "debug,relief_terrain=trace");
    }

    #[test]
    fn test_filter_string_falls_back() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_string(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_default_config_level_parses() {
        let filter_str = filter_string(Some(&Config::default()));
        assert!(
            EnvFilter::try_new(&filter_str).is_ok(),
            "Default level {filter_str:?} must be a valid filter"
        );
    }

    #[test]
    fn test_log_file_path_inside_log_dir() {
        let dir = Path::new("/tmp/relief/logs");
        let path = log_file_path(dir);
        assert_eq!(path.parent(), Some(dir));
        assert_eq!(path.file_name().unwrap(), "relief.log");
    }

    // Installs the global subscriber; keep this the only test that does.
    #[test]
    fn test_init_logging_creates_log_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        init_logging(Some(&log_dir), true, Some(&Config::default()));
        tracing::info!("log file smoke test");
        assert!(log_file_path(&log_dir).exists(), "File layer did not create relief.log");
    }
}
