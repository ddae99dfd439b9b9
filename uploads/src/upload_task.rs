use error_printer::OptionPrinter;
use more_asserts::debug_assert_le;
use progress_tracking::ItemProgressUpdate;
use tracing::{debug, warn};
use upload_client::{FileHandle, TransportError, UploadResponse};

use crate::errors::{StateTransitionError, UploadTaskError};
use crate::locator::Locator;

/// Lifecycle of one upload: `Pending -> InProgress -> {Succeeded | Failed}`.
#[derive(Debug)]
pub enum TaskState {
    Pending,
    InProgress,
    Succeeded(Locator),
    Failed(UploadTaskError),
}

impl TaskState {
    pub fn name(&self) -> &'static str {
        match self {
            TaskState::Pending => "Pending",
            TaskState::InProgress => "InProgress",
            TaskState::Succeeded(_) => "Succeeded",
            TaskState::Failed(_) => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded(_) | TaskState::Failed(_))
    }
}

/// One file of a batch together with its byte counters and state.
///
/// `bytes_sent <= bytes_total` holds at all times and `bytes_sent` never decreases.
#[derive(Debug)]
pub struct UploadTask {
    index: usize,
    file: FileHandle,
    bytes_sent: u64,
    bytes_total: u64,
    state: TaskState,
}

impl UploadTask {
    pub fn new(index: usize, file: FileHandle) -> Self {
        let bytes_total = file.size();
        Self {
            index,
            file,
            bytes_sent: 0,
            bytes_total,
            state: TaskState::Pending,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_total
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn progress_update(&self) -> ItemProgressUpdate {
        ItemProgressUpdate {
            index: self.index,
            item_name: self.file.shared_name(),
            bytes_sent: self.bytes_sent,
            bytes_total: self.bytes_total,
        }
    }

    fn transition_error(&self, to: &'static str) -> StateTransitionError {
        StateTransitionError {
            index: self.index,
            from: self.state.name(),
            to,
        }
    }

    /// Marks the task as handed to the transport.
    pub fn start(&mut self) -> Result<(), StateTransitionError> {
        if !matches!(self.state, TaskState::Pending) {
            return Err(self.transition_error("InProgress"));
        }
        self.state = TaskState::InProgress;
        Ok(())
    }

    /// Applies a progress report from the transport. Returns whether the counters changed.
    ///
    /// A report with `sent > total` is clamped. A larger total than known replaces it; a smaller
    /// one is ignored since the size was fixed when the file was submitted. Reports for a task
    /// that is not in progress are dropped.
    pub fn record_progress(&mut self, sent: u64, total: u64) -> bool {
        if !matches!(self.state, TaskState::InProgress) {
            debug!(index = self.index, state = self.state.name(), "Dropping progress report for inactive task");
            return false;
        }

        if total > self.bytes_total {
            debug!(index = self.index, old = self.bytes_total, new = total, "Upload size revised upward");
            self.bytes_total = total;
        }

        let mut sent = sent;
        if sent > self.bytes_total {
            warn!(index = self.index, sent, total = self.bytes_total, "Progress report exceeds upload size; clamping");
            sent = self.bytes_total;
        }

        if sent <= self.bytes_sent {
            return false;
        }

        self.bytes_sent = sent;
        debug_assert_le!(self.bytes_sent, self.bytes_total);
        true
    }

    /// Records the transport's answer, moving the task to a terminal state.
    pub fn complete(
        &mut self,
        outcome: std::result::Result<UploadResponse, TransportError>,
    ) -> Result<(), StateTransitionError> {
        if !matches!(self.state, TaskState::InProgress) {
            return Err(self.transition_error(match &outcome {
                Ok(_) => "Succeeded",
                Err(_) => "Failed",
            }));
        }

        self.state = match outcome {
            Ok(response) => match response
                .locator
                .and_then(Locator::parse)
                .warn_none(format!("Upload {} succeeded without a usable locator", self.index))
            {
                Some(locator) => {
                    self.bytes_sent = self.bytes_total;
                    TaskState::Succeeded(locator)
                },
                None => TaskState::Failed(UploadTaskError::MissingLocator),
            },
            Err(e) => TaskState::Failed(UploadTaskError::Transport(e)),
        };

        Ok(())
    }

    pub fn into_parts(self) -> (usize, FileHandle, TaskState) {
        (self.index, self.file, self.state)
    }
}
