use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::{Result, TransportError};
use crate::file_handle::FileHandle;
use crate::progress_tracked_streams::ProgressCallback;

/// What the storage service answered for one stored blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadResponse {
    /// Where the blob now lives. `None` if the service accepted the upload but did not say where
    /// it put it; the caller decides whether that is a failure.
    pub locator: Option<String>,
}

impl UploadResponse {
    pub fn with_locator(locator: impl Into<String>) -> Self {
        Self {
            locator: Some(locator.into()),
        }
    }

    /// Extracts the string field `field` from a JSON response body.
    ///
    /// An empty body yields no locator. A body that is not JSON is an invalid response.
    pub fn from_json_body(api: &str, body: &Bytes, field: &str) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| TransportError::InvalidResponse {
            api: api.to_owned(),
            message: format!("response body is not JSON: {e}"),
        })?;

        let locator = value
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(Self { locator })
    }
}

/// Puts one file into remote storage.
///
/// Implementations report transfer progress through `progress` with absolute
/// `(bytes_sent, bytes_total)` values. Reports for a single call never decrease and
/// `bytes_sent` never exceeds `bytes_total`.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(&self, file: &FileHandle, progress: ProgressCallback) -> Result<UploadResponse>;
}
