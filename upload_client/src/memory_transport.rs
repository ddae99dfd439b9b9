use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{Result, TransportError};
use crate::file_handle::FileHandle;
use crate::interface::{UploadResponse, UploadTransport};
use crate::progress_tracked_streams::ProgressCallback;

const MEMORY_UPLOAD_API: &str = "memory-upload";

/// How the in-memory transport treats uploads of a given file name.
#[derive(Clone, Debug, Default)]
pub struct ScriptedUpload {
    fail_with: Option<StatusCode>,
    fail_after_bytes: u64,
    omit_locator: bool,
    delay: Option<Duration>,
}

impl ScriptedUpload {
    /// Rejects the upload before any bytes are reported.
    pub fn fail(status: StatusCode) -> Self {
        Self::fail_after(0, status)
    }

    /// Reports up to `bytes` of progress, then rejects the upload.
    pub fn fail_after(bytes: u64, status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            fail_after_bytes: bytes,
            ..Default::default()
        }
    }

    /// Accepts the upload but answers without a locator.
    pub fn without_locator() -> Self {
        Self {
            omit_locator: true,
            ..Default::default()
        }
    }

    /// Waits this long before sending anything.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// An [`UploadTransport`] that keeps uploaded files in memory.
///
/// Every call reports progress block by block and yields to the runtime between blocks, so
/// concurrent uploads interleave the way network transfers would. Files with no script succeed
/// with a `memory://` locator.
pub struct MemoryTransport {
    block_size: usize,
    scripts: Mutex<HashMap<String, ScriptedUpload>>,
    stored: Mutex<HashMap<String, Bytes>>,
    calls: AtomicUsize,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new(4096)
    }
}

impl MemoryTransport {
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            scripts: Mutex::new(HashMap::new()),
            stored: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Sets the behavior for every upload of a file named `name`.
    pub fn script(&self, name: impl Into<String>, script: ScriptedUpload) {
        self.scripts.lock().insert(name.into(), script);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn stored_count(&self) -> usize {
        self.stored.lock().len()
    }

    pub fn get(&self, locator: &str) -> Option<Bytes> {
        self.stored.lock().get(locator).cloned()
    }
}

#[async_trait]
impl UploadTransport for MemoryTransport {
    async fn upload(&self, file: &FileHandle, progress: ProgressCallback) -> Result<UploadResponse> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        let script = self.scripts.lock().get(file.name()).cloned().unwrap_or_default();

        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        }

        let data = file.read().await?;
        let total = data.len() as u64;
        let limit = match script.fail_with {
            Some(_) => script.fail_after_bytes.min(total),
            None => total,
        };

        let mut sent = 0;
        while sent < limit {
            sent = (sent + self.block_size as u64).min(limit);
            progress(sent, total);
            tokio::task::yield_now().await;
        }

        if let Some(status) = script.fail_with {
            debug!(file = file.name(), %status, "Scripted upload failure");
            return Err(TransportError::HttpStatus {
                api: MEMORY_UPLOAD_API.to_owned(),
                status,
                message: format!("scripted failure for {}", file.name()),
            });
        }

        let locator = format!("memory://{call}/{}", file.name());
        self.stored.lock().insert(locator.clone(), data);

        if script.omit_locator {
            return Ok(UploadResponse::default());
        }

        Ok(UploadResponse::with_locator(locator))
    }
}
