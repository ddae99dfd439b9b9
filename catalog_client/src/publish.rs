//! Creating an item together with its files: upload every file, then persist the record that
//! references them.

use std::sync::Arc;

use error_printer::ErrorPrinter;
use progress_tracking::BatchProgressUpdater;
use thiserror::Error;
use tracing::{info, instrument};
use upload_client::{FileHandle, UploadTransport};
use uploads::{BatchFailure, Locator, UploadManager};

use crate::client::RecordCreator;
use crate::errors::{CatalogClientError, InvalidItem};
use crate::types::{CatalogItem, ItemMetadata};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    InvalidItem(#[from] InvalidItem),

    /// Some files could not be uploaded; no record was created.
    #[error("Upload failed: {0}")]
    Upload(#[from] BatchFailure),

    /// All files were uploaded but the record could not be created. `uploaded` lists the stored
    /// files, which nothing references.
    #[error("Creating the item failed after uploading {} files: {source}", .uploaded.len())]
    Record {
        uploaded: Vec<Locator>,
        #[source]
        source: CatalogClientError,
    },
}

impl PublishError {
    /// Files that were stored but are not referenced by any item.
    pub fn orphaned_locators(&self) -> Vec<Locator> {
        match self {
            PublishError::InvalidItem(_) => Vec::new(),
            PublishError::Upload(failure) => failure.orphaned_locators(),
            PublishError::Record { uploaded, .. } => uploaded.clone(),
        }
    }
}

pub struct ItemPublisher {
    uploads: UploadManager,
    records: Arc<dyn RecordCreator>,
}

impl ItemPublisher {
    pub fn new(transport: Arc<dyn UploadTransport>, records: Arc<dyn RecordCreator>) -> Self {
        Self {
            uploads: UploadManager::new(transport),
            records,
        }
    }

    /// Uploads `files` and creates an item referencing them in the same order.
    ///
    /// Nothing is uploaded if the metadata is invalid or there are no files.
    #[instrument(skip_all, name = "ItemPublisher::publish", fields(title = %metadata.title, n_files = files.len()))]
    pub async fn publish(
        &self,
        files: Vec<FileHandle>,
        metadata: &ItemMetadata,
        progress_updater: &dyn BatchProgressUpdater,
    ) -> Result<CatalogItem, PublishError> {
        metadata.validate()?;
        if files.is_empty() {
            return Err(InvalidItem("an item needs at least one file".to_owned()).into());
        }

        let locators = self
            .uploads
            .submit(files, progress_updater)
            .await
            .into_result()
            .warn_error("Not creating item")?;

        let created = self.records.create_record(&locators, metadata).await;
        let item = created
            .log_error("Item files were uploaded but the item was not created")
            .map_err(|source| PublishError::Record {
                uploaded: locators,
                source,
            })?;

        info!(id = item.id, "Published item");
        Ok(item)
    }
}
