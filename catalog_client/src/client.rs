use async_trait::async_trait;
use config::CatalogConfig;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info, instrument};
use upload_client::{Api, ResponseErrorLogger, build_http_client, join_url};
use uploads::Locator;

use crate::errors::Result;
use crate::types::{CatalogItem, ItemMetadata, NewItem};

/// Persists a catalog item once its files are stored.
#[async_trait]
pub trait RecordCreator: Send + Sync {
    /// Creates an item whose files are `locators`, in order; the first is the primary image.
    async fn create_record(&self, locators: &[Locator], metadata: &ItemMetadata) -> Result<CatalogItem>;
}

/// Talks to the catalog REST API.
///
/// Items are read from the catalog endpoint and created on the storage endpoint, which is also
/// where files are uploaded to.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: ClientWithMiddleware,
    list_url: Url,
    create_url: Url,
    locator_separator: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Self::with_client(build_http_client(config)?, config)
    }

    pub fn with_client(client: ClientWithMiddleware, config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            client,
            list_url: join_url(&config.catalog.endpoint, &config.catalog.items_path)?,
            create_url: join_url(&config.upload.storage_endpoint, &config.catalog.items_path)?,
            locator_separator: config.catalog.locator_separator.clone(),
        })
    }

    /// The underlying HTTP client, for sharing its connection pool.
    pub fn http_client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Lists the catalog in server order.
    #[instrument(skip_all, name = "CatalogClient::list_items")]
    pub async fn list_items(&self) -> Result<Vec<CatalogItem>> {
        let response = self
            .client
            .get(self.list_url.clone())
            .with_extension(Api("list-items"))
            .send()
            .await
            .process_error("list-items")?;

        let items: Vec<CatalogItem> = response.json().await?;
        debug!(n_items = items.len(), "Listed catalog items");

        Ok(items)
    }

    #[instrument(skip_all, name = "CatalogClient::create_item", fields(title = %item.title))]
    pub async fn create_item(&self, item: &NewItem) -> Result<CatalogItem> {
        let response = self
            .client
            .post(self.create_url.clone())
            .with_extension(Api("create-item"))
            .json(item)
            .send()
            .await
            .process_error("create-item")?;

        let created: CatalogItem = response.json().await?;
        info!(id = created.id, "Created catalog item");

        Ok(created)
    }
}

#[async_trait]
impl RecordCreator for CatalogClient {
    async fn create_record(&self, locators: &[Locator], metadata: &ItemMetadata) -> Result<CatalogItem> {
        metadata.validate()?;
        let item = metadata.to_new_item(locators, &self.locator_separator)?;
        self.create_item(&item).await
    }
}
