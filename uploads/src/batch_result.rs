use std::sync::Arc;

use thiserror::Error;

use crate::errors::UploadTaskError;
use crate::locator::Locator;

/// A file of the batch that did not produce a locator.
#[derive(Debug)]
pub struct FailedUpload {
    pub index: usize,
    pub name: Arc<str>,
    pub reason: UploadTaskError,
}

/// A file that was stored even though its batch failed as a whole. Nothing references it yet,
/// so it is up to the caller to clean it up or reuse it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrphanedUpload {
    pub index: usize,
    pub name: Arc<str>,
    pub locator: Locator,
}

/// The outcome of a batch in which at least one upload failed. Both lists are sorted by index.
#[derive(Debug, Error)]
#[error("{} of {} uploads failed", .failed.len(), .total)]
pub struct BatchFailure {
    pub failed: Vec<FailedUpload>,
    pub orphaned: Vec<OrphanedUpload>,
    pub total: usize,
}

impl BatchFailure {
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failed.iter().map(|f| f.index).collect()
    }

    pub fn orphaned_locators(&self) -> Vec<Locator> {
        self.orphaned.iter().map(|o| o.locator.clone()).collect()
    }
}

#[derive(Debug)]
pub enum BatchResult {
    /// Every upload succeeded. The locators are in submission order.
    Complete(Vec<Locator>),
    Failed(BatchFailure),
}

impl BatchResult {
    pub fn is_complete(&self) -> bool {
        matches!(self, BatchResult::Complete(_))
    }

    pub fn locators(&self) -> Option<&[Locator]> {
        match self {
            BatchResult::Complete(locators) => Some(locators),
            BatchResult::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Vec<Locator>, BatchFailure> {
        match self {
            BatchResult::Complete(locators) => Ok(locators),
            BatchResult::Failed(failure) => Err(failure),
        }
    }
}
