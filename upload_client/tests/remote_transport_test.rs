use std::io::Write;
use std::sync::{Arc, Mutex};

use config::CatalogConfig;
use upload_client::exports::reqwest::StatusCode;
use upload_client::{FileHandle, ProgressCallback, RemoteTransport, TransportError, UploadTransport};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recorder() -> (ProgressCallback, Arc<Mutex<Vec<(u64, u64)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let cb = {
        let seen = seen.clone();
        move |sent: u64, total: u64| seen.lock().unwrap().push((sent, total))
    };
    (Arc::new(cb), seen)
}

fn config_for(server: &MockServer) -> CatalogConfig {
    let mut config = CatalogConfig::default().with_storage_endpoint(format!("{}/api", server.uri()));
    config.client.upload_reporting_block_size = 8;
    config
}

#[tokio::test]
async fn test_upload_posts_multipart_and_returns_locator() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"photo.png\""))
        .and(body_string_contains("image/png"))
        .and(body_string_contains("pixels-pixels-pixels"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "location": "https://cdn.example/photo.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("photo.png");
    std::fs::File::create(&photo).unwrap().write_all(b"pixels-pixels-pixels").unwrap();

    let handle = FileHandle::from_path(&photo).await.unwrap();
    let transport = RemoteTransport::new(&config_for(&server)).unwrap();
    let (cb, seen) = recorder();

    let response = transport.upload(&handle, cb).await.unwrap();

    assert_eq!(response.locator.as_deref(), Some("https://cdn.example/photo.png"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&(20, 20)));
    assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[tokio::test]
async fn test_custom_form_and_locator_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/media"))
        .and(body_string_contains("name=\"attachment\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": "u-1" })))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.upload.path = "/media".to_owned();
    config.upload.form_field = "attachment".to_owned();
    config.upload.locator_field = "url".to_owned();

    let transport = RemoteTransport::new(&config).unwrap();
    let (cb, _) = recorder();
    let response = transport.upload(&FileHandle::from_bytes("a.bin", &b"abc"[..]), cb).await.unwrap();

    assert_eq!(response.locator.as_deref(), Some("u-1"));
}

#[tokio::test]
async fn test_rejected_upload_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let transport = RemoteTransport::new(&config_for(&server)).unwrap();
    let (cb, _) = recorder();
    let err = transport
        .upload(&FileHandle::from_bytes("a.txt", &b"hello"[..]), cb)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored!"))
        .mount(&server)
        .await;

    let transport = RemoteTransport::new(&config_for(&server)).unwrap();
    let (cb, _) = recorder();
    let err = transport
        .upload(&FileHandle::from_bytes("a.txt", &b"hello"[..]), cb)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_empty_success_body_has_no_locator() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = RemoteTransport::new(&config_for(&server)).unwrap();
    let (cb, _) = recorder();
    let response = transport
        .upload(&FileHandle::from_bytes("a.txt", &b"hello"[..]), cb)
        .await
        .unwrap();

    assert_eq!(response.locator, None);
}
