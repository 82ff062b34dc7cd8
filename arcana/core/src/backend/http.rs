//! HTTP Backend Implementation
//!
//! [`ApiTransport`] over `reqwest`. Every call carries
//! `Content-Type: application/json`; any non-2xx status is an error.
//!
//! Cancellation races the request future against the [`CancelToken`]. When the
//! token wins the request future is dropped, which closes the connection, so
//! the server sees the client go away and nothing is left to read the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::traits::{ApiRequest, ApiTransport, CancelToken, Method};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Tarot API client over HTTP
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Origin the `/api` paths are resolved against
    base_url: Url,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot carry path segments (e.g.
    /// `mailto:`) or the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        if base_url.cannot_be_a_base() {
            return Err(TransportError::Request(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Create from a loaded [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TransportError::Request(format!("invalid base URL {}: {e}", config.base_url))
        })?;
        Self::new(base_url, config.timeout)
    }

    /// Origin the backend talks to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a request, with segments and query percent-encoded
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry path segments.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                TransportError::Request(format!("base URL {} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().push("api");
            segments.extend(&request.segments);
        }

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        Ok(url)
    }

    async fn send(&self, request: &ApiRequest, url: Url) -> Result<Value, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.http_client.get(url),
            Method::Post => self.http_client.post(url),
        }
        .header(CONTENT_TYPE, "application/json");

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl ApiTransport for HttpBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch(
        &self,
        request: &ApiRequest,
        cancel: &CancelToken,
    ) -> Result<Value, TransportError> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, url = %url, "Sending API request");

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(url = %url, "API request aborted");
                Err(TransportError::Cancelled)
            }
            result = self.send(request, url.clone()) => result,
        }
    }
}
