use std::env;
use std::ffi::OsStr;

/// Guard that temporarily sets an environment variable and restores the previous value on drop.
///
/// Configuration groups read `CATALOG_*` variables when they are built, so tests use this
/// guard to scope an override to a single test body.
///
/// # Safety
///
/// `env::set_var` and `env::remove_var` are unsafe because they race with other threads
/// reading the environment. Tests that use this guard should be marked `#[serial]`.
///
/// # Examples
///
/// ```no_run
/// use utils::EnvVarGuard;
///
/// let _guard = EnvVarGuard::set("CATALOG_UPLOAD_PATH", "media/upload");
/// // The variable is restored (or removed) when _guard is dropped.
/// ```
pub struct EnvVarGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: impl AsRef<OsStr>) -> Self {
        let prev = env::var(key).ok();
        unsafe {
            env::set_var(key, value);
        }
        Self { key, prev }
    }

    /// Removes the variable for the lifetime of the guard.
    pub fn unset(key: &'static str) -> Self {
        let prev = env::var(key).ok();
        unsafe {
            env::remove_var(key);
        }
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.prev {
            unsafe {
                env::set_var(self.key, v);
            }
        } else {
            unsafe {
                env::remove_var(self.key);
            }
        }
    }
}
