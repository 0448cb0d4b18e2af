//! Client configuration.

use crate::encoding::PathEncoding;
use std::env;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("growthforecast-client/", env!("CARGO_PKG_VERSION"));

/// Transport and server-compatibility settings for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Total timeout for each request.
    timeout: Duration,
    /// Timeout for establishing the TCP connection.
    connect_timeout: Option<Duration>,
    /// Send `Connection: Keep-Alive` explicitly.
    keepalive: bool,
    /// User agent header.
    user_agent: String,
    /// HTTP basic auth credentials.
    basic_auth: Option<(String, String)>,
    /// Proxy URL for all requests.
    proxy: Option<String>,
    /// Zero `number` on edits of `count` graphs (older servers double-count).
    suppress_number_on_count_edit: bool,
    /// Escaping convention for the legacy `/api`, `/delete` and `/vrule` paths.
    legacy_path_encoding: PathEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            keepalive: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            basic_auth: None,
            proxy: None,
            suppress_number_on_count_edit: false,
            legacy_path_encoding: PathEncoding::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GROWTHFORECAST_TIMEOUT_SECS`: request timeout in seconds
    /// - `GROWTHFORECAST_CONNECT_TIMEOUT_SECS`: connect timeout in seconds
    /// - `GROWTHFORECAST_KEEPALIVE`: "true" or "1" to send keep-alive
    /// - `GROWTHFORECAST_USER_AGENT`: user agent header
    /// - `GROWTHFORECAST_USER` / `GROWTHFORECAST_PASSWORD`: basic auth
    /// - `GROWTHFORECAST_PROXY`: proxy URL
    /// - `GROWTHFORECAST_SUPPRESS_NUMBER_ON_COUNT_EDIT`: "true" or "1"
    /// - `GROWTHFORECAST_LEGACY_PATH_ENCODING`: "percent" or "form"
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let basic_auth = match (
            env::var("GROWTHFORECAST_USER"),
            env::var("GROWTHFORECAST_PASSWORD"),
        ) {
            (Ok(user), Ok(password)) => Some((user, password)),
            (Ok(user), Err(_)) => Some((user, String::new())),
            _ => None,
        };

        Self {
            timeout: env_secs("GROWTHFORECAST_TIMEOUT_SECS").unwrap_or(defaults.timeout),
            connect_timeout: env_secs("GROWTHFORECAST_CONNECT_TIMEOUT_SECS"),
            keepalive: env_flag("GROWTHFORECAST_KEEPALIVE"),
            user_agent: env::var("GROWTHFORECAST_USER_AGENT").unwrap_or(defaults.user_agent),
            basic_auth,
            proxy: env::var("GROWTHFORECAST_PROXY").ok(),
            suppress_number_on_count_edit: env_flag("GROWTHFORECAST_SUPPRESS_NUMBER_ON_COUNT_EDIT"),
            legacy_path_encoding: env::var("GROWTHFORECAST_LEGACY_PATH_ENCODING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.legacy_path_encoding),
        }
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the connect timeout.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Check if keep-alive is requested explicitly.
    pub fn keepalive(&self) -> bool {
        self.keepalive
    }

    /// Get the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the basic auth credentials.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        self.basic_auth
            .as_ref()
            .map(|(user, password)| (user.as_str(), password.as_str()))
    }

    /// Get the proxy URL.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Check if `number` is zeroed on edits of `count`-mode graphs.
    ///
    /// Compatibility shim for older server deployments, which added the
    /// stored `number` again when it was posted back during an edit. Newer
    /// servers ignore `number` on edit, so this is off by default.
    pub fn suppress_number_on_count_edit(&self) -> bool {
        self.suppress_number_on_count_edit
    }

    /// Get the escaping convention for legacy endpoints.
    pub fn legacy_path_encoding(&self) -> PathEncoding {
        self.legacy_path_encoding
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    keepalive: Option<bool>,
    user_agent: Option<String>,
    basic_auth: Option<(String, String)>,
    proxy: Option<String>,
    suppress_number_on_count_edit: Option<bool>,
    legacy_path_encoding: Option<PathEncoding>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Send `Connection: Keep-Alive` on every request.
    pub fn keepalive(mut self, enabled: bool) -> Self {
        self.keepalive = Some(enabled);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set basic auth credentials.
    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((user.into(), password.into()));
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Zero `number` on edits of `count`-mode graphs.
    pub fn suppress_number_on_count_edit(mut self, enabled: bool) -> Self {
        self.suppress_number_on_count_edit = Some(enabled);
        self
    }

    /// Set the escaping convention for legacy endpoints.
    pub fn legacy_path_encoding(mut self, encoding: PathEncoding) -> Self {
        self.legacy_path_encoding = Some(encoding);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.build_from(&ClientConfig::default())
    }

    /// Build the configuration, taking unset values from `base`.
    pub fn build_from(self, base: &ClientConfig) -> ClientConfig {
        let defaults = base.clone();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
            keepalive: self.keepalive.unwrap_or(defaults.keepalive),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            basic_auth: self.basic_auth.or(defaults.basic_auth),
            proxy: self.proxy.or(defaults.proxy),
            suppress_number_on_count_edit: self
                .suppress_number_on_count_edit
                .unwrap_or(defaults.suppress_number_on_count_edit),
            legacy_path_encoding: self
                .legacy_path_encoding
                .unwrap_or(defaults.legacy_path_encoding),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
        .unwrap_or(false)
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
