use std::time::Duration;

crate::config_group!({

    /// Maximum time allowed to establish a TCP connection to the server.
    ///
    /// The default value is 30 seconds.
    ///
    /// Use the environment variable `CATALOG_CLIENT_CONNECT_TIMEOUT` to set this value.
    ref connect_timeout: Duration = Duration::from_secs(30);

    /// Maximum time allowed between receiving data packets. A stalled upload surfaces as a
    /// transport error on the affected file only.
    ///
    /// The default value is 120 seconds.
    ///
    /// Use the environment variable `CATALOG_CLIENT_READ_TIMEOUT` to set this value.
    ref read_timeout: Duration = Duration::from_secs(120);

    /// Cleanup idle connections that are unused for this amount of time.
    ///
    /// Use the environment variable `CATALOG_CLIENT_IDLE_CONNECTION_TIMEOUT` to set this value.
    ref idle_connection_timeout: Duration = Duration::from_secs(60);

    /// Only no more than this number of idle connections in the connection pool.
    ///
    /// Use the environment variable `CATALOG_CLIENT_MAX_IDLE_CONNECTIONS` to set this value.
    ref max_idle_connections: usize = 16;

    /// Send a progress report for an upload every this many bytes.
    ///
    /// The default value is 64kb.
    ///
    /// Use the environment variable `CATALOG_CLIENT_UPLOAD_REPORTING_BLOCK_SIZE` to set this value.
    ref upload_reporting_block_size: usize = 64 * 1024;

    /// User agent sent with every request.
    ref user_agent: String = concat!("catalog-client/", env!("CARGO_PKG_VERSION")).to_owned();

});
