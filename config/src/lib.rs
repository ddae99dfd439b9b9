pub mod macros;

pub mod catalog_config;
pub mod groups;

pub use catalog_config::CatalogConfig;
// Re-exported for use by the config_group! macro in downstream crates.
pub use utils::configuration_utils::{ENV_PREFIX, ParsableConfigValue};
