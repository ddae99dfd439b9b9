use std::sync::Arc;

use error_printer::ErrorPrinter;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use progress_tracking::{BatchProgressUpdater, ProgressAggregator, ProgressTotals};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use upload_client::{FileHandle, ProgressCallback, TransportError, UploadTransport};

use crate::batch_result::{BatchFailure, BatchResult, FailedUpload, OrphanedUpload};
use crate::errors::UploadTaskError;
use crate::upload_task::{TaskState, UploadTask};

/// A progress report from the transport for the task at `index`.
#[derive(Clone, Copy, Debug)]
struct ProgressEvent {
    index: usize,
    bytes_sent: u64,
    bytes_total: u64,
}

/// Uploads batches of files concurrently and reports their combined progress.
///
/// Every file of a batch is handed to the transport at once. Progress events and completions
/// are applied one at a time from the future returned by [`UploadManager::submit`], which is
/// also where the progress updater is called from. No state is kept between batches.
pub struct UploadManager {
    transport: Arc<dyn UploadTransport>,
}

impl UploadManager {
    pub fn new(transport: Arc<dyn UploadTransport>) -> Self {
        Self { transport }
    }

    /// Uploads `files` and waits for every one of them to finish, successfully or not.
    ///
    /// On success the locators are returned in the order of `files`. If any upload failed the
    /// result lists every failure along with the uploads that succeeded anyway.
    #[instrument(skip_all, name = "UploadManager::submit", fields(n_files = files.len()))]
    pub async fn submit(&self, files: Vec<FileHandle>, progress_updater: &dyn BatchProgressUpdater) -> BatchResult {
        if files.is_empty() {
            debug!("Empty batch; nothing to upload");
            return BatchResult::Complete(Vec::new());
        }

        let mut tasks: Vec<UploadTask> = files
            .into_iter()
            .enumerate()
            .map(|(index, file)| UploadTask::new(index, file))
            .collect();

        let mut aggregator = ProgressAggregator::new(progress_updater);
        aggregator.report(current_totals(&tasks), None);

        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ProgressEvent>();
        let mut in_flight = FuturesUnordered::new();

        for task in tasks.iter_mut() {
            if task.start().log_error("Upload task was not pending").is_err() {
                continue;
            }

            let index = task.index();
            let file = task.file().clone();
            let transport = self.transport.clone();
            let event_tx = event_tx.clone();

            in_flight.push(async move {
                let callback: ProgressCallback = Arc::new(move |bytes_sent: u64, bytes_total: u64| {
                    // The receiver only goes away once the batch is finished.
                    let _ = event_tx.send(ProgressEvent {
                        index,
                        bytes_sent,
                        bytes_total,
                    });
                });
                let outcome = transport.upload(&file, callback).await;
                (index, outcome)
            });
        }
        drop(event_tx);

        info!(n_bytes = current_totals(&tasks).bytes_total, "Started batch upload");

        while !in_flight.is_empty() {
            tokio::select! {
                biased;
                Some(event) = event_rx.recv() => {
                    apply_progress(&mut tasks, &mut aggregator, event);
                },
                Some((index, outcome)) = in_flight.next() => {
                    // Progress sent before the transport returned belongs before the completion.
                    while let Ok(event) = event_rx.try_recv() {
                        apply_progress(&mut tasks, &mut aggregator, event);
                    }
                    finish_task(&mut tasks, &mut aggregator, index, outcome);
                },
                else => break,
            }
        }

        assemble_result(tasks)
    }
}

fn current_totals(tasks: &[UploadTask]) -> ProgressTotals {
    ProgressTotals::from_items(tasks.iter().map(|t| (t.bytes_sent(), t.bytes_total())))
}

fn apply_progress(tasks: &mut [UploadTask], aggregator: &mut ProgressAggregator<'_>, event: ProgressEvent) {
    let Some(task) = tasks.get_mut(event.index) else {
        warn!(index = event.index, "Progress report for unknown task");
        return;
    };

    if task.record_progress(event.bytes_sent, event.bytes_total) {
        let item = task.progress_update();
        aggregator.report(current_totals(tasks), Some(item));
    }
}

fn finish_task(
    tasks: &mut [UploadTask],
    aggregator: &mut ProgressAggregator<'_>,
    index: usize,
    outcome: std::result::Result<upload_client::UploadResponse, TransportError>,
) {
    let Some(task) = tasks.get_mut(index) else {
        warn!(index, "Completion for unknown task");
        return;
    };

    if task.complete(outcome).log_error("Ignoring completion").is_err() {
        return;
    }

    match task.state() {
        TaskState::Succeeded(locator) => debug!(index, file = task.file().name(), %locator, "Upload succeeded"),
        TaskState::Failed(reason) => warn!(index, file = task.file().name(), %reason, "Upload failed"),
        _ => {},
    }

    let item = task.progress_update();
    aggregator.report(current_totals(tasks), Some(item));
}

fn assemble_result(tasks: Vec<UploadTask>) -> BatchResult {
    let total = tasks.len();
    let mut succeeded = Vec::with_capacity(total);
    let mut failed = Vec::new();

    for task in tasks {
        let (index, file, state) = task.into_parts();
        match state {
            TaskState::Succeeded(locator) => succeeded.push(OrphanedUpload {
                index,
                name: file.shared_name(),
                locator,
            }),
            TaskState::Failed(reason) => failed.push(FailedUpload {
                index,
                name: file.shared_name(),
                reason,
            }),
            TaskState::Pending | TaskState::InProgress => failed.push(FailedUpload {
                index,
                name: file.shared_name(),
                reason: UploadTaskError::Transport(TransportError::Other("upload never completed".to_owned())),
            }),
        }
    }

    if failed.is_empty() {
        info!(n_files = total, "Batch upload complete");
        return BatchResult::Complete(succeeded.into_iter().map(|s| s.locator).collect());
    }

    warn!(n_failed = failed.len(), n_orphaned = succeeded.len(), "Batch upload finished with failures");

    BatchResult::Failed(BatchFailure {
        failed,
        orphaned: succeeded,
        total,
    })
}
