use thiserror::Error;
use upload_client::TransportError;

/// Item metadata that the catalog would reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid item: {0}")]
pub struct InvalidItem(pub String);

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CatalogClientError {
    #[error(transparent)]
    InvalidItem(#[from] InvalidItem),

    #[error("Transport Error: {0}")]
    Transport(#[from] TransportError),

    #[error("Reqwest Error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl CatalogClientError {
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            CatalogClientError::Transport(e) => e.status(),
            CatalogClientError::ReqwestError(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogClientError>;
