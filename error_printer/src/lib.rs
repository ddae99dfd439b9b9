use std::fmt::{Debug, Display};
use std::panic::Location;

use tracing::{error, info, warn};

/// A helper trait to log errors as they pass through a `Result` without changing it.
///
/// The caller's location is included in the message so the log line points at the call site
/// rather than at this crate.
pub trait ErrorPrinter {
    fn log_error<M: Display>(self, message: M) -> Self;

    fn warn_error<M: Display>(self, message: M) -> Self;

    fn info_error<M: Display>(self, message: M) -> Self;
}

impl<T, E: Debug> ErrorPrinter for Result<T, E> {
    #[track_caller]
    fn log_error<M: Display>(self, message: M) -> Self {
        if let Err(e) = &self {
            let caller = Location::caller();
            error!(caller = %caller, "{message}, error: {e:?}");
        }
        self
    }

    #[track_caller]
    fn warn_error<M: Display>(self, message: M) -> Self {
        if let Err(e) = &self {
            let caller = Location::caller();
            warn!(caller = %caller, "{message}, error: {e:?}");
        }
        self
    }

    #[track_caller]
    fn info_error<M: Display>(self, message: M) -> Self {
        if let Err(e) = &self {
            let caller = Location::caller();
            info!(caller = %caller, "{message}, error: {e:?}");
        }
        self
    }
}

/// A helper trait to log when an `Option` is unexpectedly `None`.
pub trait OptionPrinter {
    fn error_none<M: Display>(self, message: M) -> Self;

    fn warn_none<M: Display>(self, message: M) -> Self;

    fn info_none<M: Display>(self, message: M) -> Self;
}

impl<T> OptionPrinter for Option<T> {
    #[track_caller]
    fn error_none<M: Display>(self, message: M) -> Self {
        if self.is_none() {
            let caller = Location::caller();
            error!(caller = %caller, "{message}");
        }
        self
    }

    #[track_caller]
    fn warn_none<M: Display>(self, message: M) -> Self {
        if self.is_none() {
            let caller = Location::caller();
            warn!(caller = %caller, "{message}");
        }
        self
    }

    #[track_caller]
    fn info_none<M: Display>(self, message: M) -> Self {
        if self.is_none() {
            let caller = Location::caller();
            info!(caller = %caller, "{message}");
        }
        self
    }
}
