use async_trait::async_trait;
use config::CatalogConfig;
use error_printer::ErrorPrinter;
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::file_handle::FileHandle;
use crate::http_client::{Api, ResponseErrorLogger, build_http_client};
use crate::interface::{UploadResponse, UploadTransport};
use crate::progress_tracked_streams::{ProgressCallback, StreamProgressReporter, UploadProgressStream};

const UPLOAD_API: &str = "upload";

/// Joins a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> Result<Url> {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// Uploads files to the storage service as multipart form posts.
#[derive(Debug, Clone)]
pub struct RemoteTransport {
    client: ClientWithMiddleware,
    upload_url: Url,
    form_field: String,
    locator_field: String,
    block_size: usize,
}

impl RemoteTransport {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Self::with_client(build_http_client(config)?, config)
    }

    /// Builds a transport sharing an existing client's connection pool.
    pub fn with_client(client: ClientWithMiddleware, config: &CatalogConfig) -> Result<Self> {
        let upload_url = join_url(&config.upload.storage_endpoint, &config.upload.path)?;

        Ok(Self {
            client,
            upload_url,
            form_field: config.upload.form_field.clone(),
            locator_field: config.upload.locator_field.clone(),
            block_size: config.client.upload_reporting_block_size,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }
}

#[async_trait]
impl UploadTransport for RemoteTransport {
    #[instrument(skip_all, name = "RemoteTransport::upload", fields(file = file.name(), size = file.size()))]
    async fn upload(&self, file: &FileHandle, progress: ProgressCallback) -> Result<UploadResponse> {
        let data = file.read().await.warn_error(format!("Failed to read {}", file.name()))?;
        let n_bytes = data.len() as u64;

        let reporter = StreamProgressReporter::new(n_bytes).with_progress_callback(progress);
        let stream = UploadProgressStream::wrap_bytes_as_stream(data, self.block_size, reporter);

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), n_bytes)
            .file_name(file.name().to_owned())
            .mime_str(&file.mime_type())?;
        let form = Form::new().part(self.form_field.clone(), part);

        let response = self
            .client
            .post(self.upload_url.clone())
            .with_extension(Api(UPLOAD_API))
            .multipart(form)
            .send()
            .await
            .process_error(UPLOAD_API)?;

        let body = response.bytes().await?;
        let response = UploadResponse::from_json_body(UPLOAD_API, &body, &self.locator_field)?;

        debug!(locator = ?response.locator, "Upload accepted");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://host/api/", "/files/upload").unwrap().as_str(), "http://host/api/files/upload");
        assert_eq!(join_url("http://host", "products").unwrap().as_str(), "http://host/products");
        assert!(join_url("not a url", "x").is_err());
    }

    #[test]
    fn test_transport_uses_configured_endpoint() {
        let config = CatalogConfig::default().with_storage_endpoint("http://storage.local/v2");
        let transport = RemoteTransport::new(&config).unwrap();
        assert_eq!(transport.upload_url().as_str(), "http://storage.local/v2/files/upload");
    }
}
