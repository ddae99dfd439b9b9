use crate::groups;

/// All configuration used by the catalog client, one field per group.
///
/// `CatalogConfig::default()` holds the compiled-in defaults; `CatalogConfig::new()`
/// additionally applies the `CATALOG_{GROUP}_{FIELD}` environment overrides.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub client: groups::client::ConfigValueGroup,
    pub upload: groups::upload::ConfigValueGroup,
    pub catalog: groups::catalog::ConfigValueGroup,
    pub log: groups::log::ConfigValueGroup,
}

impl CatalogConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        self.client.apply_env_overrides();
        self.upload.apply_env_overrides();
        self.catalog.apply_env_overrides();
        self.log.apply_env_overrides();
    }

    pub fn with_storage_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.upload.storage_endpoint = endpoint.into();
        self
    }

    pub fn with_catalog_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.catalog.endpoint = endpoint.into();
        self
    }
}
