use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use more_asserts::debug_assert_le;

/// Progress callback receiving (bytes_sent, bytes_total) for one transfer.
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync + 'static>;

/// Helper for progress reporting with high-water-mark semantics. If the body stream is
/// recreated (e.g. reqwest rebuilding a request), progress is only reported for bytes beyond
/// what was already reported, so the callback never sees a value go down.
#[derive(Clone)]
pub struct StreamProgressReporter {
    total: u64,
    bytes_reported: Arc<AtomicU64>,
    progress_callback: Option<ProgressCallback>,
}

impl StreamProgressReporter {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            bytes_reported: Arc::new(AtomicU64::new(0)),
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Reports progress only if `new_completed` exceeds the previous high-water mark.
    pub fn report_progress(&self, new_completed: u64) {
        let new_completed = new_completed.min(self.total);
        let old_completed = self.bytes_reported.fetch_max(new_completed, Ordering::Relaxed);

        if old_completed >= new_completed {
            return;
        }

        if let Some(cb) = self.progress_callback.as_ref() {
            cb(new_completed, self.total);
        }
    }
}

/// Streams an in-memory payload in blocks of at most `block_size` bytes.
///
/// A block counts as sent once the consumer asks for the next one, so progress for a block is
/// reported on the following poll and the final total is reported when the stream ends.
pub struct UploadProgressStream {
    data: Bytes,
    block_size: usize,
    bytes_sent: usize,
    reporter: StreamProgressReporter,
}

impl Stream for UploadProgressStream {
    type Item = std::result::Result<Bytes, std::io::Error>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        debug_assert_le!(self.bytes_sent, self.data.len());

        if self.bytes_sent != 0 {
            self.reporter.report_progress(self.bytes_sent as u64);
        }

        if self.bytes_sent == self.data.len() {
            return Poll::Ready(None);
        }

        let slice_start = self.bytes_sent;
        let slice_end = (self.bytes_sent + self.block_size).min(self.data.len());

        self.bytes_sent = slice_end;

        Poll::Ready(Some(Ok(self.data.slice(slice_start..slice_end))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.data.len() - self.bytes_sent).div_ceil(self.block_size);
        (remaining, Some(remaining))
    }
}

impl UploadProgressStream {
    pub fn new(data: impl Into<Bytes>, block_size: usize) -> Self {
        let data = data.into();
        let total = data.len() as u64;
        Self::wrap_bytes_as_stream(data, block_size, StreamProgressReporter::new(total))
    }

    /// Wraps `data` as a stream that yields chunks of size at most `block_size`,
    /// reporting progress via `reporter`.
    pub fn wrap_bytes_as_stream(data: impl Into<Bytes>, block_size: usize, reporter: StreamProgressReporter) -> Self {
        Self {
            data: data.into(),
            block_size: block_size.max(1),
            bytes_sent: 0,
            reporter,
        }
    }
}
