//! Target URL parsing.
//!
//! Operators copy URLs straight from the web UI, e.g.
//! `http://gf:5125/list/app/host1?t=sh` or
//! `http://gf:5125/view_graph/app/host1/requests`. The path shape tells us the
//! (service, section, graph) scope; everything before the marker is the base URI.

use anyhow::{Context, Result, bail};
use growthforecast_client::{GraphScope, decode_segment};
use url::Url;

/// Path segments that introduce a scope.
const MARKERS: &[&str] = &["list", "view_graph", "view_complex", "api", "vrule"];

/// Server base URI and scope parsed from a UI or API URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// `scheme://host:port[/prefix]`, without a trailing slash.
    pub base_uri: String,
    /// Scope named by the path.
    pub scope: GraphScope,
}

impl Target {
    /// The full (service, section, graph) triple, or an error naming the URL.
    pub fn triple(&self) -> Result<(&str, &str, &str)> {
        match (
            self.scope.service_name.as_deref(),
            self.scope.section_name.as_deref(),
            self.scope.graph_name.as_deref(),
        ) {
            (Some(service), Some(section), Some(graph)) => Ok((service, section, graph)),
            _ => bail!(
                "URL must name a graph as .../{{service}}/{{section}}/{{graph}}, got scope {:?}",
                self.scope.segments()
            ),
        }
    }
}

/// Split a URL into base URI and scope.
///
/// # Errors
///
/// Returns an error if the URL does not parse or has no host.
pub fn split_url(raw: &str) -> Result<Target> {
    let url = Url::parse(raw).with_context(|| format!("Invalid URL: {}", raw))?;
    let host = url
        .host_str()
        .with_context(|| format!("URL has no host: {}", raw))?;
    let port = url
        .port_or_known_default()
        .with_context(|| format!("URL has no port: {}", raw))?;

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let (prefix, names) = split_path(&segments);

    let mut base_uri = format!("{}://{}:{}", url.scheme(), host, port);
    for segment in prefix {
        base_uri.push('/');
        base_uri.push_str(segment);
    }

    let mut names = names.iter().map(|s| decode_segment(s));
    let scope = GraphScope {
        service_name: names.next(),
        section_name: names.next(),
        graph_name: names.next(),
    };

    Ok(Target { base_uri, scope })
}

/// Split raw path segments at the scope marker into (prefix, scope segments).
///
/// `vrule` is followed by `api` or `summary`, which is skipped too. Without a
/// marker the whole path is scope.
fn split_path<'a>(segments: &'a [&'a str]) -> (&'a [&'a str], &'a [&'a str]) {
    let Some(marker) = segments.iter().position(|s| MARKERS.contains(s)) else {
        return (&[], segments);
    };

    let mut start = marker + 1;
    if segments[marker] == "vrule"
        && segments
            .get(start)
            .is_some_and(|s| *s == "api" || *s == "summary")
    {
        start += 1;
    }

    (&segments[..marker], &segments[start.min(segments.len())..])
}
