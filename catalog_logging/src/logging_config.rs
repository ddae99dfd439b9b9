use std::path::PathBuf;

use config::CatalogConfig;

pub(crate) const DEFAULT_LOG_LEVEL_FILE: &str = "info";
pub(crate) const DEFAULT_LOG_LEVEL_CONSOLE: &str = "warn";

#[derive(Clone, Debug, PartialEq)]
pub enum LoggingMode {
    File(PathBuf),
    Console,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub logging_mode: LoggingMode,
    pub use_json: bool,
    pub version: String,

    /// Filter directive used when `RUST_LOG` is not set.
    pub default_level: String,
}

impl LoggingConfig {
    /// Console logging in text format at the default console level.
    pub fn console(version: impl Into<String>) -> Self {
        Self {
            logging_mode: LoggingMode::Console,
            use_json: false,
            version: version.into(),
            default_level: DEFAULT_LOG_LEVEL_CONSOLE.to_owned(),
        }
    }

    /// Resolves the logging setup from the `log` configuration group.
    ///
    /// An unset or empty destination logs to the console. Without an explicit format, file
    /// logs are json and console logs are text.
    pub fn from_config(config: &CatalogConfig, version: impl Into<String>) -> Self {
        let log = &config.log;

        let logging_mode = match log.dest.as_deref().map(str::trim) {
            Some(dest) if !dest.is_empty() => LoggingMode::File(PathBuf::from(dest)),
            _ => LoggingMode::Console,
        };

        let use_json = match &log.format {
            Some(format) => format.to_ascii_lowercase().trim() == "json",
            None => logging_mode != LoggingMode::Console,
        };

        let default_level = match (&logging_mode, log.console_level.trim(), log.file_level.trim()) {
            (LoggingMode::Console, "", _) => DEFAULT_LOG_LEVEL_CONSOLE.to_owned(),
            (LoggingMode::Console, level, _) => level.to_owned(),
            (LoggingMode::File(_), _, "") => DEFAULT_LOG_LEVEL_FILE.to_owned(),
            (LoggingMode::File(_), _, level) => level.to_owned(),
        };

        Self {
            logging_mode,
            use_json,
            version: version.into(),
            default_level,
        }
    }
}
