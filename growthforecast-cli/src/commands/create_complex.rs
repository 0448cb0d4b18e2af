//! Create-complex command - one complex graph per section.

use super::Report;
use anyhow::{Result, bail};
use growthforecast_client::{Client, ComplexSource, ComplexTarget, GraphScope};

/// Run the create_complex command.
///
/// For every (service, section) in scope that has a graph named like the
/// first of `from_graphs`, creates `to_complex` there from `from_graphs` as
/// stacked gauge areas with sort 1.
pub async fn run(
    client: &Client,
    scope: &GraphScope,
    from_graphs: &[String],
    to_complex: &str,
    description: Option<&str>,
    report: &mut Report,
) -> Result<()> {
    let Some(first) = from_graphs.first() else {
        bail!("at least one source graph is required");
    };

    let graphs = report
        .fetch(client.list_graph(
            scope.service_name.as_deref(),
            scope.section_name.as_deref(),
            scope.graph_name.as_deref(),
        ))
        .await
        .unwrap_or_default();

    for graph in graphs.iter().filter(|g| &g.graph_name == first) {
        let from: Vec<ComplexSource> = from_graphs
            .iter()
            .map(|name| ComplexSource::new(&graph.service_name, &graph.section_name, name))
            .collect();
        let to = ComplexTarget::new(&graph.service_name, &graph.section_name, to_complex)
            .with_description(description.unwrap_or_default())
            .with_sort(1);

        report.progress(format!(
            "Setup /{}/{}/{} with {:?}",
            graph.service_name, graph.section_name, to_complex, from_graphs
        ));
        report.exec(client.create_complex(&from, &to)).await;
    }

    Ok(())
}
