#![cfg_attr(feature = "strict", deny(warnings))]

mod client;
mod errors;
pub mod publish;
mod types;

pub use client::{CatalogClient, RecordCreator};
pub use errors::{CatalogClientError, InvalidItem, Result};
pub use publish::{ItemPublisher, PublishError};
pub use types::{CatalogItem, DEFAULT_LOCATOR_SEPARATOR, ItemMetadata, NewItem};
