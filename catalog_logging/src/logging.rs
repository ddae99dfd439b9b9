use std::ffi::OsStr;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::logging_config::{LoggingConfig, LoggingMode};

const DEFAULT_LOG_FILE_NAME: &str = "catalog.log";

/// The main entry point to set up logging. Only the first call installs a subscriber; later
/// calls are ignored.
pub fn init_logging(cfg: LoggingConfig) {
    match &cfg.logging_mode {
        LoggingMode::File(log_file) => {
            // Attempt logging to a file, but fallback to console logging on error.
            if let Err(e) = init_logging_to_file(log_file, &cfg) {
                init_logging_to_console(&cfg);
                error!("Error logging to file {log_file:?} ({e}); falling back to console logging.");
            }
        },
        LoggingMode::Console => init_logging_to_console(&cfg),
    }

    info!("catalog client {}", &cfg.version);
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_default()
}

fn init_logging_to_console(cfg: &LoggingConfig) {
    let registry = tracing_subscriber::registry();

    let fmt_layer_base = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_writer(std::io::stderr);
    let fmt_filter = env_filter(&cfg.default_level);

    // try_init fails only if a global subscriber is already installed.
    let _ = if cfg.use_json {
        registry.with(fmt_layer_base.json().with_filter(fmt_filter)).try_init()
    } else {
        registry.with(fmt_layer_base.pretty().with_filter(fmt_filter)).try_init()
    };
}

fn init_logging_to_file(path: &Path, cfg: &LoggingConfig) -> Result<(), std::io::Error> {
    use tracing_appender::{non_blocking, rolling};

    let (path, file_name) = match path.file_name() {
        Some(name) => (path.to_path_buf(), name.to_owned()),
        None => (path.join(DEFAULT_LOG_FILE_NAME), OsStr::new(DEFAULT_LOG_FILE_NAME).to_owned()),
    };

    let log_directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            parent
        },
        _ => Path::new("."),
    };

    // Make sure the log location is writeable so we error early here and dump to stderr on failure.
    std::fs::OpenOptions::new().create(true).append(true).open(&path)?;

    let file_appender = rolling::never(log_directory, file_name);
    let (writer, guard) = non_blocking(file_appender);

    // The guard flushes the background writer when dropped, so it lives for the whole process.
    static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
    let _ = FILE_GUARD.set(guard);

    let fmt_layer_base = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer);
    let fmt_filter = env_filter(&cfg.default_level);

    let _ = if cfg.use_json {
        tracing_subscriber::registry()
            .with(fmt_layer_base.json().with_filter(fmt_filter))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(fmt_layer_base.pretty().with_filter(fmt_filter))
            .try_init()
    };

    Ok(())
}
