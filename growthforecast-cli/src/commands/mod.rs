//! CLI command implementations.

pub mod bench;
pub mod color;
pub mod create_complex;
pub mod delete;
pub mod post;
pub mod scope;
pub mod vrule;

use anyhow::{Context, Result};
use clap::Args;
use growthforecast_client::{Client, ClientConfig, ClientError, PathEncoding, percent_segment};
use std::future::Future;
use std::time::Duration;

/// Client settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct ClientArgs {
    /// Request timeout in seconds
    #[arg(long, global = true, env = "GROWTHFORECAST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Connect timeout in seconds
    #[arg(long, global = true, env = "GROWTHFORECAST_CONNECT_TIMEOUT_SECS")]
    pub connect_timeout: Option<u64>,

    /// Send `Connection: Keep-Alive` with every request
    #[arg(
        long,
        global = true,
        env = "GROWTHFORECAST_KEEPALIVE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub keepalive: bool,

    /// User agent header
    #[arg(long, global = true, env = "GROWTHFORECAST_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Basic auth user
    #[arg(long, global = true, env = "GROWTHFORECAST_USER")]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(long, global = true, env = "GROWTHFORECAST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Proxy URL for all requests
    #[arg(long, global = true, env = "GROWTHFORECAST_PROXY")]
    pub proxy: Option<String>,

    /// Zero `number` when editing count-mode graphs (older servers)
    #[arg(
        long,
        global = true,
        env = "GROWTHFORECAST_SUPPRESS_NUMBER_ON_COUNT_EDIT",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub suppress_number_on_count_edit: bool,

    /// Space escaping for /api, /delete and /vrule paths ("percent" or "form")
    #[arg(
        long,
        global = true,
        env = "GROWTHFORECAST_LEGACY_PATH_ENCODING",
        default_value_t = PathEncoding::Percent
    )]
    pub legacy_path_encoding: PathEncoding,
}

impl ClientArgs {
    /// Client configuration from the flags.
    pub fn config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout))
            .keepalive(self.keepalive)
            .suppress_number_on_count_edit(self.suppress_number_on_count_edit)
            .legacy_path_encoding(self.legacy_path_encoding);

        if let Some(secs) = self.connect_timeout {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(ref user) = self.user {
            builder = builder.basic_auth(user, self.password.clone().unwrap_or_default());
        }
        if let Some(ref proxy) = self.proxy {
            builder = builder.proxy(proxy);
        }

        builder.build()
    }

    /// Build a client for `base_uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI or proxy is invalid.
    pub fn client(&self, base_uri: &str) -> Result<Client> {
        Client::with_config(base_uri, self.config())
            .with_context(|| format!("Failed to create client for {}", base_uri))
    }
}

/// Per-item progress and failure reporting for bulk commands.
#[derive(Debug, Default)]
pub struct Report {
    silent: bool,
    succeeded: usize,
    failed: usize,
}

impl Report {
    /// Create a report; `silent` suppresses progress lines.
    pub fn new(silent: bool) -> Self {
        Self {
            silent,
            ..Self::default()
        }
    }

    /// Print a progress line to stdout unless silent.
    pub fn progress(&self, line: impl AsRef<str>) {
        if !self.silent {
            println!("{}", line.as_ref());
        }
    }

    /// Await one item, recording its outcome.
    ///
    /// A failure is printed to stderr and logged; it never aborts the batch.
    pub async fn exec<T, F>(&mut self, item: F) -> Option<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match item.await {
            Ok(value) => {
                self.succeeded += 1;
                Some(value)
            }
            Err(e) => {
                self.fail(&e);
                None
            }
        }
    }

    /// Await a listing the batch works from.
    ///
    /// A failure is reported like a failed item and yields `None`. Success is
    /// not counted as an item.
    pub async fn fetch<T, F>(&mut self, listing: F) -> Option<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match listing.await {
            Ok(value) => Some(value),
            Err(e) => {
                self.fail(&e);
                None
            }
        }
    }

    fn fail(&mut self, e: &ClientError) {
        self.failed += 1;
        tracing::warn!(kind = e.kind(), error = %e, "Bulk item failed");
        eprintln!("\tclass:{}\t{}", e.kind(), e);
    }

    /// Items that succeeded.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Items that failed.
    pub fn failed(&self) -> usize {
        self.failed
    }
}

/// `service/section/graph` with each segment percent-encoded.
pub fn escaped_path(service_name: &str, section_name: &str, graph_name: &str) -> String {
    format!(
        "{}/{}/{}",
        percent_segment(service_name),
        percent_segment(section_name),
        percent_segment(graph_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ClientArgs {
        ClientArgs {
            timeout: 30,
            connect_timeout: None,
            keepalive: false,
            user_agent: None,
            user: None,
            password: None,
            proxy: None,
            suppress_number_on_count_edit: false,
            legacy_path_encoding: PathEncoding::Percent,
        }
    }

    #[test]
    fn test_client_args_config() {
        let mut args = args();
        args.timeout = 5;
        args.keepalive = true;
        args.user = Some("ops".to_string());
        args.legacy_path_encoding = PathEncoding::Form;

        let config = args.config();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.keepalive());
        assert_eq!(config.basic_auth(), Some(("ops", "")));
        assert_eq!(config.legacy_path_encoding(), PathEncoding::Form);
    }

    #[test]
    fn test_client_args_rejects_bad_base_uri() {
        assert!(args().client("gf:5125").is_err());
    }

    #[tokio::test]
    async fn test_report_counts_and_continues() {
        let mut report = Report::new(true);

        let ok = report.exec(async { Ok::<_, ClientError>(1) }).await;
        let failed = report
            .exec(async { Err::<i32, _>(ClientError::from_status(404, "http://gf/x", "")) })
            .await;
        let ok_again = report.exec(async { Ok::<_, ClientError>(3) }).await;

        assert_eq!(ok, Some(1));
        assert_eq!(failed, None);
        assert_eq!(ok_again, Some(3));
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_escaped_path() {
        assert_eq!(
            escaped_path("app name", "host", "<1sec count"),
            "app%20name/host/%3C1sec%20count"
        );
    }
}
