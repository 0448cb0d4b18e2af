//! Type definitions for GrowthForecast entities and API payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Identifying fields of a graph or complex graph, as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Server-assigned identifier.
    pub id: u64,
    /// Service (first namespace level).
    pub service_name: String,
    /// Section (second namespace level).
    pub section_name: String,
    /// Graph name (third namespace level).
    pub graph_name: String,
}

impl GraphSummary {
    /// `service/section/graph` with each segment shown verbatim.
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.service_name, self.section_name, self.graph_name
        )
    }
}

/// Sections of one service, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSections {
    /// Service name.
    pub service_name: String,
    /// Distinct section names under the service.
    pub sections: Vec<String>,
}

/// Full property set of a graph.
///
/// Only the identity is modelled. Every other property is kept exactly as the
/// server sent it, so a fetched graph posts back with the same keys and the
/// same JSON types. Server generations differ in which properties they return
/// (the by-id form lacks `meta` and `md5`, older servers lack the short-term
/// `sllimit`/`sulimit`/`stype`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graph {
    /// Server-assigned identifier, immutable once assigned.
    pub id: u64,
    /// Service name.
    pub service_name: String,
    /// Section name.
    pub section_name: String,
    /// Graph name.
    pub graph_name: String,
    #[serde(flatten)]
    properties: Map<String, Value>,
}

impl Graph {
    /// Identifying fields of this graph.
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            id: self.id,
            service_name: self.service_name.clone(),
            section_name: self.section_name.clone(),
            graph_name: self.graph_name.clone(),
        }
    }

    /// Properties other than the identity, as received.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// A property by its wire name. Identity fields are not looked up here.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property by its wire name.
    ///
    /// `service_name`, `section_name` and `graph_name` go to the identity
    /// fields (a non-string value is stored in its JSON form). `id` is set only
    /// from an unsigned integer and ignored otherwise.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match key.as_str() {
            "id" => {
                if let Some(id) = value.as_u64() {
                    self.id = id;
                }
            }
            "service_name" => self.service_name = value_to_string(value),
            "section_name" => self.section_name = value_to_string(value),
            "graph_name" => self.graph_name = value_to_string(value),
            _ => {
                self.properties.insert(key, value);
            }
        }
    }

    /// Whether the server sent `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Latest value.
    pub fn number(&self) -> Option<&Number> {
        match self.get("number") {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Value mode ("gauge", "count", "modified", "derive").
    pub fn mode(&self) -> Option<&str> {
        self.str_property("mode")
    }

    /// Line color, e.g. "#cc6633".
    pub fn color(&self) -> Option<&str> {
        self.str_property("color")
    }

    /// Chart type ("AREA", "LINE1", "LINE2").
    pub fn graph_type(&self) -> Option<&str> {
        self.str_property("type")
    }

    /// Server-managed opaque string. Absent from the by-id representation.
    pub fn meta(&self) -> Option<&str> {
        self.str_property("meta")
    }

    /// Server-computed content hash. Absent from the by-id representation.
    pub fn md5(&self) -> Option<&str> {
        self.str_property("md5")
    }

    /// Set by the by-id endpoint.
    pub fn is_complex(&self) -> Option<bool> {
        self.get("complex").and_then(Value::as_bool)
    }

    fn str_property(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Partial set of graph properties.
///
/// Used as the parameters of a data post and as the caller's side of an edit.
/// Unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphUpdate {
    /// Rename: service name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Rename: section name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    /// Rename: graph name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_name: Option<String>,
    /// New value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    /// Value mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llimit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ulimit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sllimit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sulimit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjust: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmode: Option<String>,
    /// Chart type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub graph_type: Option<String>,
    /// Explicit `meta`. When unset, an edit sends an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Any other parameter the server accepts (e.g. `datetime`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GraphUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value.
    #[must_use]
    pub fn number(mut self, number: impl Into<Number>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Set the value mode.
    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the unit.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the display order.
    #[must_use]
    pub fn sort(mut self, sort: i64) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the display-time transform.
    #[must_use]
    pub fn adjust(mut self, adjust: impl Into<String>, adjustval: impl Into<String>) -> Self {
        self.adjust = Some(adjust.into());
        self.adjustval = Some(adjustval.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set `meta` explicitly.
    #[must_use]
    pub fn meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Set an arbitrary extra parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Body-encoded status returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    /// 0 on success, nonzero on failure.
    pub error: i64,
    /// Per-field validation messages on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Value>,
}

impl StatusResponse {
    /// Whether the body reports success.
    pub fn is_success(&self) -> bool {
        self.error == 0
    }
}

/// Body of a data post: the status plus the resulting entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse<T> {
    /// 0 on success, nonzero on failure.
    #[serde(default)]
    pub error: i64,
    /// Entity as stored after the post.
    pub data: Option<T>,
}

impl<T> PostResponse<T> {
    /// Whether the body reports success.
    pub fn is_success(&self) -> bool {
        self.error == 0
    }
}

/// One constituent of a complex graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexComponent {
    /// Graph display mode.
    pub gmode: String,
    /// Stack on top of the previous component.
    pub stack: bool,
    /// Chart type.
    #[serde(rename = "type")]
    pub graph_type: String,
    /// Id of the constituent graph.
    pub graph_id: u64,
}

/// Full property set of a complex graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexGraph {
    /// Server-assigned identifier.
    pub id: u64,
    /// Service name.
    pub service_name: String,
    /// Section name.
    pub section_name: String,
    /// Graph name.
    pub graph_name: String,
    /// Free-form description.
    pub description: String,
    /// Display order weight.
    pub sort: i64,
    /// Show the sum of all components.
    pub sumup: bool,
    /// Always zero for complex graphs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    /// Always true.
    pub complex: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Ordered constituents.
    pub data: Vec<ComplexComponent>,
    /// Attributes not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A constituent of a complex graph to create, named by its triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexSource {
    /// Service name.
    pub service_name: String,
    /// Section name.
    pub section_name: String,
    /// Graph name.
    pub graph_name: String,
    /// Graph display mode.
    pub gmode: String,
    /// Stack on top of the previous component.
    pub stack: bool,
    /// Chart type.
    #[serde(rename = "type")]
    pub graph_type: String,
}

impl ComplexSource {
    /// A stacked gauge drawn as an area.
    pub fn new(
        service_name: impl Into<String>,
        section_name: impl Into<String>,
        graph_name: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            section_name: section_name.into(),
            graph_name: graph_name.into(),
            gmode: "gauge".to_string(),
            stack: true,
            graph_type: "AREA".to_string(),
        }
    }

    /// Set the display mode.
    #[must_use]
    pub fn with_gmode(mut self, gmode: impl Into<String>) -> Self {
        self.gmode = gmode.into();
        self
    }

    /// Set stacking.
    #[must_use]
    pub fn with_stack(mut self, stack: bool) -> Self {
        self.stack = stack;
        self
    }

    /// Set the chart type.
    #[must_use]
    pub fn with_type(mut self, graph_type: impl Into<String>) -> Self {
        self.graph_type = graph_type.into();
        self
    }
}

/// Destination of a complex graph to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexTarget {
    /// Service name.
    pub service_name: String,
    /// Section name.
    pub section_name: String,
    /// Graph name.
    pub graph_name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Display order weight.
    #[serde(default)]
    pub sort: i64,
}

impl ComplexTarget {
    /// Destination with an empty description and sort 0.
    pub fn new(
        service_name: impl Into<String>,
        section_name: impl Into<String>,
        graph_name: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            section_name: section_name.into(),
            graph_name: graph_name.into(),
            description: String::new(),
            sort: 0,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the display order.
    #[must_use]
    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = sort;
        self
    }
}

/// A vertical rule as returned by the summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vrule {
    /// Scope of the rule, e.g. "/service/section/graph" or "/".
    pub graph_path: String,
    /// Unix time of the marker.
    pub time: i64,
    /// Line color.
    pub color: String,
    /// Free-form description.
    pub description: String,
    /// Dash pattern; empty for a solid line.
    pub dashes: String,
    /// Attributes not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters of a vertical rule to post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VruleParams {
    /// Unix time of the marker; the server uses "now" when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Line color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Dash pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashes: Option<String>,
    /// Any other parameter the server accepts.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional (service, section, graph) scope.
///
/// Used both as an exact-match filter over listings and as the trailing path
/// of scoped endpoints. A scope is a prefix: a section without a service is
/// ignored when building paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphScope {
    /// Service name.
    pub service_name: Option<String>,
    /// Section name.
    pub section_name: Option<String>,
    /// Graph name.
    pub graph_name: Option<String>,
}

impl GraphScope {
    /// Scope covering everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope covering one service.
    pub fn service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: Some(service_name.into()),
            ..Self::default()
        }
    }

    /// Scope covering one section.
    pub fn section(service_name: impl Into<String>, section_name: impl Into<String>) -> Self {
        Self {
            service_name: Some(service_name.into()),
            section_name: Some(section_name.into()),
            graph_name: None,
        }
    }

    /// Scope covering one graph.
    pub fn graph(
        service_name: impl Into<String>,
        section_name: impl Into<String>,
        graph_name: impl Into<String>,
    ) -> Self {
        Self {
            service_name: Some(service_name.into()),
            section_name: Some(section_name.into()),
            graph_name: Some(graph_name.into()),
        }
    }

    /// Exact-match test; unset fields match everything.
    pub fn matches(&self, graph: &GraphSummary) -> bool {
        self.service_name
            .as_deref()
            .is_none_or(|s| s == graph.service_name)
            && self
                .section_name
                .as_deref()
                .is_none_or(|s| s == graph.section_name)
            && self
                .graph_name
                .as_deref()
                .is_none_or(|s| s == graph.graph_name)
    }

    /// Leading set segments, stopping at the first unset one.
    pub fn segments(&self) -> Vec<&str> {
        [&self.service_name, &self.section_name, &self.graph_name]
            .into_iter()
            .map_while(|s| s.as_deref())
            .collect()
    }
}
