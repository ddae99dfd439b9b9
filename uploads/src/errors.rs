use thiserror::Error;
use upload_client::TransportError;

/// Why a single upload in a batch did not produce a locator.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UploadTaskError {
    #[error("Transport Error: {0}")]
    Transport(#[from] TransportError),

    #[error("Upload succeeded but the response carried no locator")]
    MissingLocator,
}

impl UploadTaskError {
    pub fn is_missing_locator(&self) -> bool {
        matches!(self, UploadTaskError::MissingLocator)
    }
}

/// A task was asked to make a transition its state machine does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("upload task {index} cannot move from {from} to {to}")]
pub struct StateTransitionError {
    pub index: usize,
    pub from: &'static str,
    pub to: &'static str,
}
