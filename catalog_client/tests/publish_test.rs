use std::sync::Arc;

use async_trait::async_trait;
use catalog_client::{CatalogClientError, CatalogItem, InvalidItem, ItemMetadata, ItemPublisher, PublishError, RecordCreator};
use parking_lot::Mutex;
use progress_tracking::NoOpProgressUpdater;
use progress_tracking::verification_wrapper::ProgressUpdaterVerificationWrapper;
use upload_client::exports::reqwest::StatusCode;
use upload_client::{FileHandle, MemoryTransport, ScriptedUpload, TransportError};
use uploads::Locator;

/// Records every request and answers with a fixed outcome.
#[derive(Default)]
struct RecordingCreator {
    calls: Mutex<Vec<Vec<Locator>>>,
    fail: bool,
}

#[async_trait]
impl RecordCreator for RecordingCreator {
    async fn create_record(
        &self,
        locators: &[Locator],
        metadata: &ItemMetadata,
    ) -> catalog_client::Result<CatalogItem> {
        self.calls.lock().push(locators.to_vec());

        if self.fail {
            return Err(CatalogClientError::Transport(TransportError::HttpStatus {
                api: "create-item".to_owned(),
                status: StatusCode::BAD_GATEWAY,
                message: "bad gateway".to_owned(),
            }));
        }

        Ok(CatalogItem {
            id: 1,
            title: metadata.title.clone(),
            price: metadata.price,
            description: metadata.description.clone(),
            image: locators.iter().map(Locator::as_str).collect::<Vec<_>>().join(","),
            category: metadata.category.clone(),
        })
    }
}

fn metadata() -> ItemMetadata {
    ItemMetadata {
        title: "Desk".to_owned(),
        price: 150.0,
        description: "Oak".to_owned(),
        category: "furniture".to_owned(),
    }
}

fn files() -> Vec<FileHandle> {
    vec![
        FileHandle::from_bytes("front.jpg", vec![0u8; 64]),
        FileHandle::from_bytes("side.jpg", vec![0u8; 32]),
    ]
}

#[tokio::test]
async fn test_publish_hands_ordered_locators_to_record_creator() {
    let transport = Arc::new(MemoryTransport::new(16));
    let records = Arc::new(RecordingCreator::default());
    let publisher = ItemPublisher::new(transport.clone(), records.clone());

    let verifier = ProgressUpdaterVerificationWrapper::new(NoOpProgressUpdater::new());
    let item = publisher.publish(files(), &metadata(), verifier.as_ref()).await.unwrap();

    let calls = records.calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert!(calls[0][0].as_str().ends_with("/front.jpg"));
    assert!(calls[0][1].as_str().ends_with("/side.jpg"));
    assert_eq!(item.image_locators()[0], calls[0][0].as_str());
    verifier.assert_complete();
}

#[tokio::test]
async fn test_invalid_metadata_uploads_nothing() {
    let transport = Arc::new(MemoryTransport::default());
    let records = Arc::new(RecordingCreator::default());
    let publisher = ItemPublisher::new(transport.clone(), records.clone());

    let mut bad = metadata();
    bad.price = -3.0;
    let err = publisher.publish(files(), &bad, &*NoOpProgressUpdater::new()).await.unwrap_err();

    assert!(matches!(err, PublishError::InvalidItem(_)));
    assert_eq!(transport.call_count(), 0);
    assert!(records.calls.lock().is_empty());
}

#[tokio::test]
async fn test_item_without_files_is_rejected() {
    let transport = Arc::new(MemoryTransport::default());
    let publisher = ItemPublisher::new(transport.clone(), Arc::new(RecordingCreator::default()));

    let err = publisher.publish(Vec::new(), &metadata(), &*NoOpProgressUpdater::new()).await.unwrap_err();

    assert!(matches!(&err, PublishError::InvalidItem(InvalidItem(msg)) if msg.contains("at least one file")));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_upload_failure_skips_record_creation() {
    let transport = Arc::new(MemoryTransport::new(16));
    transport.script("side.jpg", ScriptedUpload::fail(StatusCode::FORBIDDEN));
    let records = Arc::new(RecordingCreator::default());
    let publisher = ItemPublisher::new(transport.clone(), records.clone());

    let err = publisher.publish(files(), &metadata(), &*NoOpProgressUpdater::new()).await.unwrap_err();

    let PublishError::Upload(failure) = &err else {
        panic!("expected an upload failure, got {err:?}");
    };
    assert_eq!(failure.failed_indices(), vec![1]);
    assert_eq!(err.orphaned_locators().len(), 1);
    assert!(err.orphaned_locators()[0].as_str().ends_with("/front.jpg"));
    assert!(records.calls.lock().is_empty());
}

#[tokio::test]
async fn test_record_failure_reports_uploaded_files() {
    let transport = Arc::new(MemoryTransport::new(16));
    let records = Arc::new(RecordingCreator {
        fail: true,
        ..Default::default()
    });
    let publisher = ItemPublisher::new(transport.clone(), records.clone());

    let err = publisher.publish(files(), &metadata(), &*NoOpProgressUpdater::new()).await.unwrap_err();

    let PublishError::Record { uploaded, source } = &err else {
        panic!("expected a record failure, got {err:?}");
    };
    assert_eq!(uploaded.len(), 2);
    assert_eq!(source.status(), Some(StatusCode::BAD_GATEWAY));
    for locator in uploaded {
        assert!(transport.get(locator.as_str()).is_some());
    }
    assert_eq!(err.orphaned_locators(), *uploaded);
}
