//! Delete command - delete every graph and complex graph under a URL.

use super::{Report, escaped_path};
use anyhow::Result;
use growthforecast_client::{Client, GraphScope, GraphSummary};

/// Restrict a listing to the given graph and section names; empty means all.
fn restrict(
    graphs: Vec<GraphSummary>,
    graph_names: &[String],
    section_names: &[String],
) -> Vec<GraphSummary> {
    graphs
        .into_iter()
        .filter(|g| graph_names.is_empty() || graph_names.contains(&g.graph_name))
        .filter(|g| section_names.is_empty() || section_names.contains(&g.section_name))
        .collect()
}

/// Run the delete command.
///
/// A failed listing or delete is reported and skipped.
pub async fn run(
    client: &Client,
    scope: &GraphScope,
    graph_names: &[String],
    section_names: &[String],
    report: &mut Report,
) -> Result<()> {
    let service = scope.service_name.as_deref();
    let section = scope.section_name.as_deref();
    let graph = scope.graph_name.as_deref();

    tracing::info!(?service, ?section, ?graph, "Deleting graphs");

    let graphs = restrict(
        report
            .fetch(client.list_graph(service, section, graph))
            .await
            .unwrap_or_default(),
        graph_names,
        section_names,
    );
    for g in &graphs {
        report.progress(format!(
            "Delete {}",
            escaped_path(&g.service_name, &g.section_name, &g.graph_name)
        ));
        report
            .exec(client.delete_graph(&g.service_name, &g.section_name, &g.graph_name))
            .await;
    }

    let complexes = restrict(
        report
            .fetch(client.list_complex(service, section, graph))
            .await
            .unwrap_or_default(),
        graph_names,
        section_names,
    );
    for c in &complexes {
        report.progress(format!(
            "Delete {}",
            escaped_path(&c.service_name, &c.section_name, &c.graph_name)
        ));
        report
            .exec(client.delete_complex_by_id(c.id))
            .await;
    }

    Ok(())
}
