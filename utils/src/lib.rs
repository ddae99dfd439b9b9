#![cfg_attr(feature = "strict", deny(warnings))]

pub mod configuration_utils;
pub use configuration_utils::{ENV_PREFIX, ParsableConfigValue};

mod guards;
pub use guards::EnvVarGuard;

// The test_set_config! macro is exported at the crate root by #[macro_export].
