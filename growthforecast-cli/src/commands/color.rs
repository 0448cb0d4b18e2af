//! Color command - recolor graphs by name.

use super::Report;
use anyhow::{Result, bail};
use growthforecast_client::{Client, GraphScope, GraphUpdate};

/// Parse a `GRAPH_NAME:COLOR` pair. The color follows the last colon.
pub fn parse_color(pair: &str) -> Result<(String, String)> {
    match pair.rsplit_once(':') {
        Some((name, color)) if !name.is_empty() && !color.is_empty() => {
            Ok((name.to_string(), color.to_string()))
        }
        _ => bail!("expected GRAPH_NAME:COLOR, got '{}'", pair),
    }
}

/// Properties applied along with the color.
fn color_update(color: &str) -> GraphUpdate {
    GraphUpdate::new()
        .color(color)
        .unit("count")
        .sort(1)
        .adjust("/", "1")
}

/// Run the color command.
pub async fn run(
    client: &Client,
    scope: &GraphScope,
    colors: &[(String, String)],
    report: &mut Report,
) -> Result<()> {
    let graphs = report
        .fetch(client.list_graph(
            scope.service_name.as_deref(),
            scope.section_name.as_deref(),
            scope.graph_name.as_deref(),
        ))
        .await
        .unwrap_or_default();

    for graph in &graphs {
        let Some((_, color)) = colors.iter().find(|(name, _)| *name == graph.graph_name) else {
            continue;
        };

        report.progress(format!("Setup {} with {}", graph.path(), color));
        report
            .exec(client.edit_graph(
                &graph.service_name,
                &graph.section_name,
                &graph.graph_name,
                &color_update(color),
            ))
            .await;
    }

    Ok(())
}
