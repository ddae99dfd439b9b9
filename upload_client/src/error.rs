use reqwest::StatusCode;
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Configuration Error: {0}")]
    ConfigurationError(String),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("File {name} changed size: expected {expected} bytes, read {actual}")]
    FileSizeMismatch { name: String, expected: u64, actual: u64 },

    #[error("Parse Error: {0}")]
    ParseError(#[from] url::ParseError),

    #[error("ReqwestMiddleware Error: {0}")]
    ReqwestMiddlewareError(#[from] reqwest_middleware::Error),

    #[error("Reqwest Error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Request to {api} failed with status {status}: {message}")]
    HttpStatus {
        api: String,
        status: StatusCode,
        message: String,
    },

    #[error("Invalid response from {api}: {message}")]
    InvalidResponse { api: String, message: String },

    #[error("Error : {0}")]
    Other(String),
}

// Define our own result type here (this seems to be the standard).
pub type Result<T> = std::result::Result<T, TransportError>;

impl TransportError {
    /// The HTTP status the server answered with, if the failure was a rejected request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            TransportError::ReqwestError(e) => e.status(),
            TransportError::ReqwestMiddlewareError(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::ReqwestError(e) => e.is_timeout(),
            TransportError::ReqwestMiddlewareError(e) => e.is_timeout(),
            TransportError::IOError(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}

impl PartialEq for TransportError {
    fn eq(&self, other: &TransportError) -> bool {
        match (self, other) {
            (TransportError::HttpStatus { status: a, .. }, TransportError::HttpStatus { status: b, .. }) => a == b,
            (e1, e2) => std::mem::discriminant(e1) == std::mem::discriminant(e2),
        }
    }
}
