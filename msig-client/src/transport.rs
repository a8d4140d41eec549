use crate::error::TransportError;
use crate::params::RequestParams;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Issues a named call against the indexing service.
///
/// Implementations own everything below the parameter mapping: URL layout,
/// encoding, timeouts and status handling.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Calls `path` with `params` and returns the decoded JSON body.
    async fn call(&self, path: &str, params: &RequestParams) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn call(&self, path: &str, params: &RequestParams) -> Result<Value, TransportError> {
        (**self).call(path, params).await
    }
}

/// Error body returned by the service on failure.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP transport that POSTs the parameters as a JSON object.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            // Skip client as its Debug output is noisy
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport with the given request timeout and a 2 second
    /// connect timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        Self::with_timeouts(base_url, timeout, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Creates a transport with explicit request and connect timeouts.
    pub fn with_timeouts(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .default_headers(headers)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()?;

        Self::with_client(base_url, client)
    }

    /// Creates a transport around an existing reqwest client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, TransportError> {
        // `Url::join` replaces the last path segment unless the base ends with '/'
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, TransportError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(TransportError::ResponseError(
                status.as_u16(),
                error_message(status, &body),
            ));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, path: &str, params: &RequestParams) -> Result<Value, TransportError> {
        let url = self.endpoint_url(path)?;
        debug!(
            "Calling {} with params [{}]",
            url,
            params.keys().collect::<Vec<_>>().join(", ")
        );
        self.send(self.client.post(url).json(params)).await
    }
}

/// Picks the most useful message out of a failed response body.
fn error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ServiceErrorBody>(body) {
        Ok(ServiceErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ServiceErrorBody {
            error: Some(error), ..
        }) => error.to_string(),
        Ok(_) => format!("Request failed with status: {}", status),
        Err(e) => {
            if !body.is_empty() {
                warn!("Could not parse error body from service: {}", e);
            }
            format!("Request failed with status: {}", status)
        }
    }
}
