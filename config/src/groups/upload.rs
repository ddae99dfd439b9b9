crate::config_group!({

    /// Base URL of the storage service that accepts file uploads and new catalog records.
    ///
    /// Use the environment variable `CATALOG_UPLOAD_STORAGE_ENDPOINT` to set this value.
    ref storage_endpoint: String = "http://localhost:8080/api".to_owned();

    /// Path, relative to the storage endpoint, that files are posted to.
    ref path: String = "files/upload".to_owned();

    /// Name of the multipart form field carrying the file.
    ref form_field: String = "file".to_owned();

    /// Name of the JSON response field carrying the stored file's locator.
    ref locator_field: String = "location".to_owned();

});
