use serde::{Deserialize, Serialize};
use uploads::Locator;

use crate::errors::InvalidItem;

/// Separator used to pack several locators into an item's single `image` field.
pub const DEFAULT_LOCATOR_SEPARATOR: &str = ",";

/// An item as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,

    /// The item's file locators joined with [`DEFAULT_LOCATOR_SEPARATOR`]; the first one is the
    /// primary image.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl CatalogItem {
    /// The locators packed into `image`, in order.
    pub fn image_locators(&self) -> Vec<&str> {
        self.image_locators_separated_by(DEFAULT_LOCATOR_SEPARATOR)
    }

    pub fn image_locators_separated_by(&self, separator: &str) -> Vec<&str> {
        self.image
            .split(separator)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// The user-supplied part of a new item; the image comes from the uploaded files.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemMetadata {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

impl ItemMetadata {
    pub fn validate(&self) -> std::result::Result<(), InvalidItem> {
        if self.title.trim().is_empty() {
            return Err(InvalidItem("title must not be empty".to_owned()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(InvalidItem(format!("price must be a non-negative number, got {}", self.price)));
        }
        Ok(())
    }

    /// Builds the record body for these metadata and the given locators.
    ///
    /// A locator containing `separator` could not be told apart from its neighbours once packed
    /// into `image`, so it is rejected.
    pub fn to_new_item(&self, locators: &[Locator], separator: &str) -> std::result::Result<NewItem, InvalidItem> {
        if let Some(locator) = locators.iter().find(|l| !separator.is_empty() && l.as_str().contains(separator)) {
            return Err(InvalidItem(format!("locator {locator:?} contains the separator {separator:?}")));
        }

        Ok(NewItem {
            title: self.title.clone(),
            price: self.price,
            description: self.description.clone(),
            image: locators.iter().map(Locator::as_str).collect::<Vec<_>>().join(separator),
            category: self.category.clone(),
        })
    }
}

/// Body of a create-item request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewItem {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_catalog_listing() {
        let body = r#"[
            {"id": 1, "title": "Backpack", "price": 109.95, "description": "Fits a laptop",
             "category": "bags", "image": "https://cdn/a.jpg", "rating": {"rate": 3.9, "count": 120}},
            {"id": 2, "title": "Mug", "price": 7.5}
        ]"#;

        let items: Vec<CatalogItem> = serde_json::from_str(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].image_locators(), vec!["https://cdn/a.jpg"]);
        assert_eq!(items[1].description, "");
        assert!(items[1].image_locators().is_empty());
    }

    #[test]
    fn test_locators_round_trip_through_image_field() {
        let locators = vec![Locator::parse("https://cdn/1.png").unwrap(), Locator::parse("https://cdn/2.png").unwrap()];
        let metadata = ItemMetadata {
            title: "Lamp".to_owned(),
            price: 20.0,
            ..Default::default()
        };

        let new_item = metadata.to_new_item(&locators, DEFAULT_LOCATOR_SEPARATOR).unwrap();
        assert_eq!(new_item.image, "https://cdn/1.png,https://cdn/2.png");

        let item = CatalogItem {
            id: 9,
            title: new_item.title,
            price: new_item.price,
            description: new_item.description,
            image: new_item.image,
            category: new_item.category,
        };
        assert_eq!(item.image_locators(), vec!["https://cdn/1.png", "https://cdn/2.png"]);
    }

    #[test]
    fn test_locator_containing_separator_is_rejected() {
        let locators = vec![
            Locator::parse("https://cdn/1.png").unwrap(),
            Locator::parse("https://cdn/a,b.png").unwrap(),
        ];
        let metadata = ItemMetadata {
            title: "Lamp".to_owned(),
            price: 20.0,
            ..Default::default()
        };

        let err = metadata.to_new_item(&locators, DEFAULT_LOCATOR_SEPARATOR).unwrap_err();
        assert!(err.0.contains("https://cdn/a,b.png"));

        let new_item = metadata.to_new_item(&locators, "|").unwrap();
        assert_eq!(new_item.image, "https://cdn/1.png|https://cdn/a,b.png");
    }

    #[test]
    fn test_validation() {
        let mut metadata = ItemMetadata {
            title: "Chair".to_owned(),
            price: 0.0,
            ..Default::default()
        };
        assert!(metadata.validate().is_ok());

        metadata.price = -1.0;
        assert!(metadata.validate().is_err());
        metadata.price = f64::NAN;
        assert!(metadata.validate().is_err());

        metadata.price = 5.0;
        metadata.title = "   ".to_owned();
        assert_eq!(metadata.validate(), Err(InvalidItem("title must not be empty".to_owned())));
    }
}
