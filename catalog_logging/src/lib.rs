mod logging;
mod logging_config;

pub use logging::init_logging;
pub use logging_config::{LoggingConfig, LoggingMode};
