use catalog_logging::{LoggingConfig, LoggingMode, init_logging};

#[test]
fn test_file_logging_creates_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("nested").join("client.log");

    let cfg = LoggingConfig {
        logging_mode: LoggingMode::File(log_file.clone()),
        use_json: true,
        version: "test".to_owned(),
        default_level: "info".to_owned(),
    };

    init_logging(cfg.clone());
    assert!(log_file.is_file());

    // A second initialization is a no-op rather than a panic.
    init_logging(cfg);
    tracing::info!("still logging");
}
