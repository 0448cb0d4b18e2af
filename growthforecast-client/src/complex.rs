//! Complex graph operations.

use crate::client::Client;
use crate::error::{ClientError, Result};
use crate::graphs::scope_of;
use crate::types::{
    ComplexComponent, ComplexGraph, ComplexSource, ComplexTarget, GraphSummary, StatusResponse,
};
use serde::Serialize;

/// Body of `POST /json/create/complex`.
#[derive(Debug, Serialize)]
struct CreateComplexRequest<'a> {
    service_name: &'a str,
    section_name: &'a str,
    graph_name: &'a str,
    description: &'a str,
    sort: i64,
    data: Vec<ComplexComponent>,
}

impl Client {
    /// List complex graphs, filtered client-side by exact match.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_complex(
        &self,
        service_name: Option<&str>,
        section_name: Option<&str>,
        graph_name: Option<&str>,
    ) -> Result<Vec<GraphSummary>> {
        let scope = scope_of(service_name, section_name, graph_name);
        let response = self.get("/json/list/complex").await?;
        let graphs: Vec<GraphSummary> = self.handle_response(response)?;

        Ok(graphs.into_iter().filter(|g| scope.matches(g)).collect())
    }

    /// Get a complex graph by its triple.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the complex graph does not exist.
    pub async fn get_complex(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
    ) -> Result<ComplexGraph> {
        let path = format!(
            "/json/complex/{}/{}/{}",
            self.json_segment(service_name),
            self.json_segment(section_name),
            self.json_segment(graph_name)
        );
        let response = self.get(&path).await?;
        self.handle_response(response)
    }

    /// Get a complex graph by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no complex graph has this id.
    pub async fn get_complex_by_id(&self, id: u64) -> Result<ComplexGraph> {
        let response = self.get(&format!("/json/complex/{}", id)).await?;
        self.handle_response(response)
    }

    /// Create a complex graph from existing graphs.
    ///
    /// Each source is resolved to its id with [`get_graph`](Self::get_graph),
    /// one at a time and in order. The first failed lookup aborts the creation
    /// before anything is written. The components are then submitted in a
    /// single request, in the order of `from_graphs`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if a source graph does not exist, or an
    /// error if any request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use growthforecast_client::{Client, ComplexSource, ComplexTarget};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:5125")?;
    /// let from = vec![
    ///     ComplexSource::new("app", "host1", "<1sec count"),
    ///     ComplexSource::new("app", "host1", "<2sec count"),
    /// ];
    /// let to = ComplexTarget::new("app", "host1", "response time").with_sort(1);
    /// client.create_complex(&from, &to).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_complex(
        &self,
        from_graphs: &[ComplexSource],
        to_complex: &ComplexTarget,
    ) -> Result<StatusResponse> {
        let mut data = Vec::with_capacity(from_graphs.len());
        for source in from_graphs {
            let graph = self
                .get_graph(&source.service_name, &source.section_name, &source.graph_name)
                .await?;
            data.push(ComplexComponent {
                gmode: source.gmode.clone(),
                stack: source.stack,
                graph_type: source.graph_type.clone(),
                graph_id: graph.id,
            });
        }

        let request = CreateComplexRequest {
            service_name: &to_complex.service_name,
            section_name: &to_complex.section_name,
            graph_name: &to_complex.graph_name,
            description: &to_complex.description,
            sort: to_complex.sort,
            data,
        };

        let response = self.post_json("/json/create/complex", &request).await?;
        self.handle_response(response)
    }

    /// Delete a complex graph by its triple.
    ///
    /// Finds the id by scanning [`list_complex`](Self::list_complex) and then
    /// calls [`delete_complex_by_id`](Self::delete_complex_by_id). Works on
    /// every server generation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] without issuing a delete if no complex
    /// graph matches.
    pub async fn delete_complex(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
    ) -> Result<StatusResponse> {
        let found = self
            .list_complex(Some(service_name), Some(section_name), Some(graph_name))
            .await?;

        let Some(complex) = found.first() else {
            return Err(ClientError::NotFound {
                status: 404,
                uri: format!("{}/json/list/complex", self.base_uri()),
                body: format!(
                    "complex graph {}/{}/{} not found",
                    service_name, section_name, graph_name
                ),
            });
        };

        self.delete_complex_by_id(complex.id).await
    }

    /// Delete a complex graph by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the complex graph does not exist or the request fails.
    pub async fn delete_complex_by_id(&self, id: u64) -> Result<StatusResponse> {
        let response = self
            .post_form(&format!("/delete_complex/{}", id), &[])
            .await?;
        self.handle_response(response)
    }

    /// Delete a complex graph by its triple in one request.
    ///
    /// Needs a server that has `/json/delete/complex/...`; use
    /// [`delete_complex`](Self::delete_complex) otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the complex graph does not exist or the request fails.
    pub async fn delete_complex_by_path(
        &self,
        service_name: &str,
        section_name: &str,
        graph_name: &str,
    ) -> Result<StatusResponse> {
        let path = format!(
            "/json/delete/complex/{}/{}/{}",
            self.json_segment(service_name),
            self.json_segment(section_name),
            self.json_segment(graph_name)
        );
        let response = self.post_form(&path, &[]).await?;
        self.handle_response(response)
    }
}
