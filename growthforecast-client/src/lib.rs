//! Async Rust client for the GrowthForecast graphing API.
//!
//! GrowthForecast stores time series as "graphs" named by a
//! (service, section, graph) triple, and overlays of several graphs as
//! "complex graphs". This crate wraps its HTTP/JSON API.
//!
//! # Features
//!
//! - Graph listing with client-side filters, plus derived service/section views
//! - Data posting, property edits with merge-and-correct, deletion
//! - Complex graph listing, creation from named graphs, deletion
//! - Vertical rules scoped by service, section or graph
//! - Typed errors mapped from HTTP status
//! - Request diagnostics via `tracing` and an optional [`RequestObserver`]
//!
//! # Example
//!
//! ```no_run
//! use growthforecast_client::{Client, GraphUpdate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://localhost:5125")?;
//!
//! // Write a sample, creating the graph if needed
//! client
//!     .post_graph("app", "host1", "requests", &GraphUpdate::new().number(10))
//!     .await?;
//!
//! // Change one property; everything else is kept
//! client
//!     .edit_graph("app", "host1", "requests", &GraphUpdate::new().color("#112233"))
//!     .await?;
//!
//! let graph = client.get_graph("app", "host1", "requests").await?;
//! println!("{} is {:?}", graph.graph_name, graph.color());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Deleting something that is
//! not there is an error, so bulk callers usually skip `NotFound`:
//!
//! ```no_run
//! # use growthforecast_client::{Client, ClientError};
//! # async fn example() -> Result<(), ClientError> {
//! # let client = Client::new("http://localhost:5125")?;
//! match client.delete_graph("app", "host1", "requests").await {
//!     Ok(_) => println!("deleted"),
//!     Err(e) if e.is_not_found() => println!("already gone"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod complex;
mod config;
mod encoding;
mod error;
mod graphs;
mod merge;
mod observer;
mod types;
mod vrules;

// Re-export the main types
pub use client::{Client, DEFAULT_BASE_URI, LastResponse};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use encoding::{
    PathEncoding, decode_segment, form_body, form_pairs, form_segment, percent_segment,
};
pub use error::{ClientError, Result};
pub use graphs::{distinct_services, group_sections};
pub use merge::{COUNT_MODE, MergePolicy, merge};
pub use observer::{OutgoingRequest, RequestObserver};
pub use types::{
    ComplexComponent, ComplexGraph, ComplexSource, ComplexTarget, Graph, GraphScope,
    GraphSummary, GraphUpdate, PostResponse, ServiceSections, StatusResponse, Vrule, VruleParams,
};
