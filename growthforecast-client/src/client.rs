//! Core GrowthForecast client and transport adapter.

use crate::config::ClientConfig;
use crate::encoding::{PathEncoding, form_body};
use crate::error::{ClientError, Result};
use crate::observer::{OutgoingRequest, RequestObserver};
use parking_lot::Mutex;
use reqwest::header::{CONNECTION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Base URI of a GrowthForecast server on its default port.
pub const DEFAULT_BASE_URI: &str = "http://127.0.0.1:5125";

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Raw response of the most recent request, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

#[derive(Debug, Default)]
struct LastExchange {
    request_uri: Option<String>,
    response: Option<LastResponse>,
}

/// Status and body of one exchange, before classification.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub(crate) uri: String,
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// A client for the GrowthForecast HTTP/JSON API.
///
/// Clones share the HTTP connection pool and the last-request diagnostics.
/// The diagnostics are overwritten by every call, so under concurrent use
/// they may describe another task's request.
///
/// # Example
///
/// ```no_run
/// use growthforecast_client::Client;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://localhost:5125")?
///     .with_timeout(Duration::from_secs(10))?;
///
/// let graphs = client.list_graph(Some("app"), None, None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    /// Base URI of the GrowthForecast server.
    base_uri: String,
    /// HTTP client.
    http: HttpClient,
    /// Transport and compatibility settings.
    config: ClientConfig,
    /// Most recent request URI and response.
    last: Arc<Mutex<LastExchange>>,
    /// Optional per-request callback.
    observer: Option<Arc<dyn RequestObserver>>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_uri", &self.base_uri)
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_uri` - Base URI of the server (e.g., "http://localhost:5125")
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid or the HTTP client cannot be created.
    pub fn new(base_uri: impl Into<String>) -> Result<Self> {
        Self::with_config(base_uri, ClientConfig::default())
    }

    /// Create a new client with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid, the proxy URL is invalid, or the
    /// HTTP client cannot be created.
    pub fn with_config(base_uri: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let base_uri = base_uri.into();

        if !base_uri.starts_with("http://") && !base_uri.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_uri
            )));
        }

        let http = build_http(&config)?;

        Ok(Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            http,
            config,
            last: Arc::new(Mutex::new(LastExchange::default())),
            observer: None,
        })
    }

    /// Set a custom timeout for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        let config = ClientConfig::builder()
            .timeout(timeout)
            .build_from(&self.config);
        self.reconfigure(config)
    }

    /// Replace the configuration, rebuilding the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub fn reconfigure(mut self, config: ClientConfig) -> Result<Self> {
        self.http = build_http(&config)?;
        self.config = config;
        Ok(self)
    }

    /// Attach a callback invoked before every outgoing request.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Base URI without a trailing slash.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fully-qualified URI of the most recent request.
    pub fn last_request_uri(&self) -> Option<String> {
        self.last.lock().request_uri.clone()
    }

    /// Raw response of the most recent request that got one.
    pub fn last_response(&self) -> Option<LastResponse> {
        self.last.lock().response.clone()
    }

    /// Build a full URI from a path.
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_uri, path)
        } else {
            format!("{}/{}", self.base_uri, path)
        }
    }

    /// Encode a name for the JSON API paths (`/json/...`).
    pub(crate) fn json_segment(&self, segment: &str) -> String {
        PathEncoding::Percent.encode(segment)
    }

    /// Encode a name for the legacy paths (`/api`, `/delete`, `/vrule`).
    pub(crate) fn legacy_segment(&self, segment: &str) -> String {
        self.config.legacy_path_encoding().encode(segment)
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<RawResponse> {
        self.execute(Method::GET, path, None).await
    }

    /// Execute a POST request with a raw body and content type.
    pub(crate) async fn post(
        &self,
        path: &str,
        body: String,
        content_type: &'static str,
    ) -> Result<RawResponse> {
        self.execute(Method::POST, path, Some((body, content_type)))
            .await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<RawResponse> {
        let json = serde_json::to_string(body)?;
        self.post(path, json, JSON_CONTENT_TYPE).await
    }

    /// Execute a POST request with a form-encoded body.
    pub(crate) async fn post_form(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<RawResponse> {
        self.post(path, form_body(pairs), FORM_CONTENT_TYPE).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<(String, &'static str)>,
    ) -> Result<RawResponse> {
        let uri = self.url(path);

        tracing::debug!(
            method = %method,
            uri = %uri,
            payload = body.as_ref().map(|(b, _)| b.as_str()).unwrap_or_default(),
            "Sending request"
        );

        if let Some(ref observer) = self.observer {
            observer.on_request(&OutgoingRequest {
                method: method.as_str(),
                uri: &uri,
                content_type: body.as_ref().map(|(_, ct)| *ct),
                body: body.as_ref().map(|(b, _)| b.as_str()),
            });
        }

        *self.last.lock() = LastExchange {
            request_uri: Some(uri.clone()),
            response: None,
        };

        let mut request = self.http.request(method, &uri);
        if self.config.keepalive() {
            request = request.header(CONNECTION, "Keep-Alive");
        }
        if let Some((user, password)) = self.config.basic_auth() {
            request = request.basic_auth(user, Some(password));
        }
        if let Some((content, content_type)) = body {
            request = request.header(CONTENT_TYPE, content_type).body(content);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(ClientError::Http)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(ClientError::Http)?;

        tracing::debug!(
            uri = %uri,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );
        tracing::trace!(uri = %uri, body = %text, "Response body");

        self.last.lock().response = Some(LastResponse {
            status,
            body: text.clone(),
        });

        Ok(RawResponse {
            uri,
            status,
            body: text,
        })
    }

    /// Classify a response and deserialize its JSON body.
    pub(crate) fn handle_response<T: DeserializeOwned>(&self, response: RawResponse) -> Result<T> {
        if response.status != 200 {
            return Err(ClientError::from_status(
                response.status,
                response.uri,
                response.body,
            ));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            ClientError::InvalidResponse(format!("{} from {}: {}", e, response.uri, response.body))
        })
    }
}

fn build_http(config: &ClientConfig) -> Result<HttpClient> {
    let mut builder = HttpClient::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent());

    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(proxy) = config.proxy() {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}
