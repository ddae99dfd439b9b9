crate::config_group!({

    /// The log destination. If unset or empty, logs are written to the console.
    /// Otherwise this is the path of the log file.
    ///
    /// Use the environment variable `CATALOG_LOG_DEST` to set this value.
    ref dest: Option<String> = None;

    /// The format the logs are printed in. If "json", then logs are dumped as json blobs; otherwise they
    /// are treated as text. By default logging to files is done in json and console logging is done with text.
    ref format: Option<String> = None;

    /// Default filter directive for console output when `RUST_LOG` is unset.
    ref console_level: String = "warn".to_owned();

    /// Default filter directive for file output when `RUST_LOG` is unset.
    ref file_level: String = "info".to_owned();

});
