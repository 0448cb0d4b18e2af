//! Graph operations.

use crate::client::Client;
use crate::encoding::form_pairs;
use crate::error::Result;
use crate::merge::{MergePolicy, merge};
use crate::types::{
    Graph, GraphScope, GraphSummary, GraphUpdate, PostResponse, ServiceSections, StatusResponse,
};

impl Client {
    /// List graphs, filtered client-side.
    ///
    /// The server has no filtering of its own, so the full list is fetched and
    /// each supplied filter is applied as an exact match. Server order is kept.
    ///
    /// # Arguments
    ///
    /// * `service_name` - Only graphs of this service
    /// * `section_name` - Only graphs of this section
    /// * `graph_name` - Only graphs with this name
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use growthforecast_client::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:5125")?;
    /// for graph in client.list_graph(Some("app"), None, None).await? {
    ///     println!("{}: {}", graph.id, graph.path());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_graph(
        &self,
        service_name: Option<&str>,
        section_name: Option<&str>,
        graph_name: Option<&str>,
    ) -> Result<Vec<GraphSummary>> {
        let scope = scope_of(service_name, section_name, graph_name);
        let response = self.get("/json/list/graph").await?;
        let graphs: Vec<GraphSummary> = self.handle_response(response)?;

        Ok(graphs.into_iter().filter(|g| scope.matches(g)).collect())
    }

    /// List the sections of each service, derived from [`list_graph`](Self::list_graph).
    ///
    /// Services and their sections appear in first-seen order, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_section(
        &self,
        service_name: Option<&str>,
        section_name: Option<&str>,
        graph_name: Option<&str>,
    ) -> Result<Vec<ServiceSections>> {
        let graphs = self
            .list_graph(service_name, section_name, graph_name)
            .await?;
        Ok(group_sections(&graphs))
    }

    /// List service names, derived from [`list_graph`](Self::list_graph).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_service(
        &self,
        service_name: Option<&str>,
        section_name: Option<&str>,
        graph_name: Option<&str>,
    ) -> Result<Vec<String>> {
        let graphs = self
            .list_graph(service_name, section_name, graph_name)
            .await?;
        Ok(distinct_services(&graphs))
    }

    /// Get the full property set of a graph.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`](crate::ClientError::NotFound) if the
    /// graph does not exist.
    pub async fn get_graph(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
    ) -> Result<Graph> {
        let path = format!(
            "/api/{}/{}/{}",
            self.legacy_segment(service_name),
            self.legacy_segment(section_name),
            self.legacy_segment(graph_name)
        );
        let response = self.get(&path).await?;
        self.handle_response(response)
    }

    /// Get a graph by id.
    ///
    /// The by-id representation has no `meta` and no `md5`; both come back as
    /// `None`. It carries `complex` instead.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`](crate::ClientError::NotFound) if no
    /// graph has this id.
    pub async fn get_graph_by_id(&self, id: u64) -> Result<Graph> {
        let response = self.get(&format!("/json/graph/{}", id)).await?;
        self.handle_response(response)
    }

    /// Post a sample and/or properties to a graph, creating it if needed.
    ///
    /// The parameters are sent form-encoded. The body's `error` field reports
    /// success separately from the HTTP status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use growthforecast_client::{Client, GraphUpdate};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:5125")?;
    /// let res = client
    ///     .post_graph("app", "host1", "requests", &GraphUpdate::new().number(42))
    ///     .await?;
    /// assert!(res.is_success());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post_graph(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
        params: &GraphUpdate,
    ) -> Result<PostResponse<Graph>> {
        let path = format!(
            "/api/{}/{}/{}",
            self.legacy_segment(service_name),
            self.legacy_segment(section_name),
            self.legacy_segment(graph_name)
        );
        let pairs = form_pairs(params)?;
        let response = self.post_form(&path, &pairs).await?;
        self.handle_response(response)
    }

    /// Edit the properties of a graph.
    ///
    /// The edit endpoint replaces every property, so the current state is
    /// fetched first and `params` is laid over it with [`merge`](crate::merge)
    /// under the client's [`MergePolicy`]. The updated graph is not returned.
    ///
    /// The fetch and the write are separate requests. A change made by someone
    /// else in between is overwritten with the fetched value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`](crate::ClientError::NotFound) if the
    /// graph does not exist, or an error if either request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use growthforecast_client::{Client, GraphUpdate};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:5125")?;
    /// client
    ///     .edit_graph("app", "host1", "requests", &GraphUpdate::new().color("#112233"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn edit_graph(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
        params: &GraphUpdate,
    ) -> Result<StatusResponse> {
        let current = self
            .get_graph(service_name, section_name, graph_name)
            .await?;
        let updates = merge(&current, params, MergePolicy::from(self.config()))?;

        tracing::debug!(id = current.id, graph = %current.summary().path(), "Editing graph");

        let response = self
            .post_json(&format!("/json/edit/graph/{}", current.id), &updates)
            .await?;
        self.handle_response(response)
    }

    /// Delete a graph by its triple.
    ///
    /// Not idempotent: a missing graph is reported as
    /// [`ClientError::NotFound`](crate::ClientError::NotFound).
    ///
    /// # Errors
    ///
    /// Returns an error if the graph does not exist or the request fails.
    pub async fn delete_graph(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
    ) -> Result<StatusResponse> {
        let path = format!(
            "/delete/{}/{}/{}",
            self.legacy_segment(service_name),
            self.legacy_segment(section_name),
            self.legacy_segment(graph_name)
        );
        let response = self.post_form(&path, &[]).await?;
        self.handle_response(response)
    }

    /// Delete a graph by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph does not exist or the request fails.
    pub async fn delete_graph_by_id(&self, id: u64) -> Result<StatusResponse> {
        let response = self
            .post_form(&format!("/json/delete/graph/{}", id), &[])
            .await?;
        self.handle_response(response)
    }
}

pub(crate) fn scope_of(
    service_name: Option<&str>,
    section_name: Option<&str>,
    graph_name: Option<&str>,
) -> GraphScope {
    GraphScope {
        service_name: service_name.map(str::to_string),
        section_name: section_name.map(str::to_string),
        graph_name: graph_name.map(str::to_string),
    }
}

/// Group graphs into services and their distinct sections.
pub fn group_sections(graphs: &[GraphSummary]) -> Vec<ServiceSections> {
    let mut grouped: Vec<ServiceSections> = Vec::new();

    for graph in graphs {
        let entry = match grouped
            .iter_mut()
            .position(|s| s.service_name == graph.service_name)
        {
            Some(index) => &mut grouped[index],
            None => {
                grouped.push(ServiceSections {
                    service_name: graph.service_name.clone(),
                    sections: Vec::new(),
                });
                let last = grouped.len() - 1;
                &mut grouped[last]
            }
        };

        if !entry.sections.contains(&graph.section_name) {
            entry.sections.push(graph.section_name.clone());
        }
    }

    grouped
}

/// Distinct service names in first-seen order.
pub fn distinct_services(graphs: &[GraphSummary]) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();
    for graph in graphs {
        if !services.contains(&graph.service_name) {
            services.push(graph.service_name.clone());
        }
    }
    services
}
