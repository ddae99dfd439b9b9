use std::time::Instant;

use config::CatalogConfig;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use tracing::{debug, warn};

use crate::error::{Result, TransportError};

/// Request extension naming the API a request belongs to, used to tag log lines.
#[derive(Clone, Copy, Debug)]
pub struct Api(pub &'static str);

/// Builds the HTTP client shared by the upload transport and the catalog client.
pub fn build_http_client(config: &CatalogConfig) -> Result<ClientWithMiddleware> {
    let client_config = &config.client;

    let reqwest_client = reqwest::Client::builder()
        .connect_timeout(client_config.connect_timeout)
        .read_timeout(client_config.read_timeout)
        .pool_idle_timeout(client_config.idle_connection_timeout)
        .pool_max_idle_per_host(client_config.max_idle_connections)
        .user_agent(client_config.user_agent.as_str())
        .build()?;

    Ok(ClientBuilder::new(reqwest_client).with(LoggingMiddleware).build())
}

/// Logs the outcome and duration of every request.
pub struct LoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let api = extensions.get::<Api>().map(|a| a.0).unwrap_or("unknown");
        let method = req.method().clone();
        let url = req.url().clone();
        let start = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = start.elapsed().as_millis();

        match &result {
            Ok(response) if response.status().is_success() => {
                debug!(api, %method, %url, status = %response.status(), elapsed_ms, "Request completed");
            },
            Ok(response) => {
                warn!(api, %method, %url, status = %response.status(), elapsed_ms, "Request rejected");
            },
            Err(e) => {
                warn!(api, %method, %url, elapsed_ms, error = %e, "Request failed");
            },
        }

        result
    }
}

/// Converts the result of sending a request into a [`Result`], turning non-2xx responses into
/// [`TransportError::HttpStatus`] tagged with `api`.
pub trait ResponseErrorLogger<T> {
    fn process_error(self, api: &str) -> T;
}

impl ResponseErrorLogger<Result<Response>> for reqwest_middleware::Result<Response> {
    fn process_error(self, api: &str) -> Result<Response> {
        let response = self.map_err(|e| {
            debug!(api, error = %e, "Request did not produce a response");
            TransportError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(TransportError::HttpStatus {
            api: api.to_owned(),
            status,
            message: status.canonical_reason().unwrap_or("unrecognized status").to_owned(),
        })
    }
}
