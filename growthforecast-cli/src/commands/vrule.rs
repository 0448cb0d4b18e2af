//! Vrule commands - post and list vertical rules.

use super::Report;
use anyhow::{Context, Result};
use growthforecast_client::{Client, GraphScope, VruleParams};

/// Parse a JSON object of vrule parameters.
pub fn parse_params(json: &str) -> Result<VruleParams> {
    serde_json::from_str(json).context("Invalid JSON: expected an object of vrule parameters")
}

/// Post a vrule under `scope`, printing the server's response as JSON.
pub async fn post(
    client: &Client,
    scope: &GraphScope,
    params: &VruleParams,
    report: &mut Report,
) -> Result<()> {
    tracing::info!(scope = ?scope.segments(), "Posting vrule");
    if let Some(response) = report.exec(client.post_vrule(scope, params)).await {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

/// List vrules under `scope`, one per line.
pub async fn list(client: &Client, scope: &GraphScope, report: &mut Report) -> Result<()> {
    let rules = report
        .fetch(client.list_vrule(scope))
        .await
        .unwrap_or_default();
    for rule in rules {
        println!(
            "{}\t{}\t{}\t{}",
            rule.time, rule.graph_path, rule.color, rule.description
        );
    }
    Ok(())
}
