//! Post command - post graph parameters to one graph.

use super::Report;
use super::scope::Target;
use anyhow::{Context, Result};
use growthforecast_client::{Client, GraphUpdate};

/// Parse a JSON object of graph parameters.
pub fn parse_params(json: &str) -> Result<GraphUpdate> {
    serde_json::from_str(json).context("Invalid JSON: expected an object of graph parameters")
}

/// Run the post command, printing the server's response as JSON.
///
/// A failed request is reported through `report`; only a URL without a full
/// triple is an error.
pub async fn run(
    client: &Client,
    target: &Target,
    params: &GraphUpdate,
    report: &mut Report,
) -> Result<()> {
    let (service, section, graph) = target.triple()?;
    tracing::info!(service, section, graph, "Posting graph parameters");

    if let Some(response) = report
        .exec(client.post_graph(service, section, graph, params))
        .await
    {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::scope::split_url;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_params() {
        let params = parse_params(r#"{"number": 10, "mode": "count"}"#).unwrap();
        assert_eq!(params.mode.as_deref(), Some("count"));
        assert!(params.number.is_some());

        assert!(parse_params("10").is_err());
        assert!(parse_params("number=10").is_err());
    }

    #[tokio::test]
    async fn test_post_to_api_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/app/host1/requests"))
            .and(body_string_contains("number=10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": 0,
                "data": {"id": 1, "service_name": "app", "section_name": "host1",
                         "graph_name": "requests", "number": 10}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let target = split_url(&format!("{}/api/app/host1/requests", server.uri())).unwrap();
        let client = Client::new(&target.base_uri).unwrap();
        let params = parse_params(r#"{"number": 10}"#).unwrap();

        let mut report = Report::new(true);
        run(&client, &target, &params, &mut report).await.unwrap();
        assert_eq!(report.succeeded(), 1);
    }

    #[tokio::test]
    async fn test_post_failure_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/app/host1/requests"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let target = split_url(&format!("{}/api/app/host1/requests", server.uri())).unwrap();
        let client = Client::new(&target.base_uri).unwrap();
        let mut report = Report::new(true);

        run(&client, &target, &GraphUpdate::new(), &mut report)
            .await
            .unwrap();
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn test_post_needs_full_triple() {
        let target = split_url("http://127.0.0.1:5125/list/app").unwrap();
        let client = Client::new(&target.base_uri).unwrap();
        let mut report = Report::new(true);
        assert!(
            run(&client, &target, &GraphUpdate::new(), &mut report)
                .await
                .is_err()
        );
    }
}
