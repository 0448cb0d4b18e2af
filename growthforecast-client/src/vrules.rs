//! Vertical rule operations.

use crate::client::Client;
use crate::encoding::form_pairs;
use crate::error::Result;
use crate::types::{GraphScope, PostResponse, Vrule, VruleParams};

impl Client {
    /// Post a vertical rule.
    ///
    /// The rule is scoped by the leading set segments of `scope`; an empty
    /// scope posts a global rule to `/vrule/api`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use growthforecast_client::{Client, GraphScope, VruleParams};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:5125")?;
    /// let params = VruleParams {
    ///     description: Some("deploy".to_string()),
    ///     ..Default::default()
    /// };
    /// client.post_vrule(&GraphScope::service("app"), &params).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post_vrule(
        &self,
        scope: &GraphScope,
        params: &VruleParams,
    ) -> Result<PostResponse<Vrule>> {
        let path = self.vrule_path("/vrule/api", scope);
        let pairs = form_pairs(params)?;
        let response = self.post_form(&path, &pairs).await?;
        self.handle_response(response)
    }

    /// List vertical rules under `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_vrule(&self, scope: &GraphScope) -> Result<Vec<Vrule>> {
        let path = self.vrule_path("/vrule/summary", scope);
        let response = self.get(&path).await?;
        self.handle_response(response)
    }

    fn vrule_path(&self, prefix: &str, scope: &GraphScope) -> String {
        scope
            .segments()
            .into_iter()
            .fold(prefix.to_string(), |mut path, segment| {
                path.push('/');
                path.push_str(&self.legacy_segment(segment));
                path
            })
    }
}
