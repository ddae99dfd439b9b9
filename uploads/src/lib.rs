#![cfg_attr(feature = "strict", deny(warnings))]

mod batch_result;
mod errors;
mod locator;
mod upload_manager;
mod upload_task;

pub use batch_result::{BatchFailure, BatchResult, FailedUpload, OrphanedUpload};
pub use errors::{StateTransitionError, UploadTaskError};
pub use locator::Locator;
pub use upload_manager::UploadManager;
pub use upload_task::{TaskState, UploadTask};
