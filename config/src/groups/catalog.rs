crate::config_group!({

    /// Base URL of the catalog the items are listed from.
    ///
    /// Use the environment variable `CATALOG_CATALOG_ENDPOINT` to set this value.
    ref endpoint: String = "https://fakestoreapi.com".to_owned();

    /// Collection path for items, used for both listing and creation.
    ref items_path: String = "products".to_owned();

    /// Separator used to join the locators of an item into its image field.
    ref locator_separator: String = ",".to_owned();

});
