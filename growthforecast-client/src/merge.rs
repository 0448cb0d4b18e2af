//! Merge-and-correct for graph edits.
//!
//! `/json/edit/graph/:id` replaces the whole property set, so an edit sends the
//! current state with the caller's partial update laid over it. Two fields are
//! corrected on the way out:
//!
//! - `meta` is sent as an empty string unless the caller set it. Posting the
//!   fetched value back makes the server nest it into itself on every edit.
//! - `number` is zeroed for `count` graphs when the caller did not set it and
//!   [`MergePolicy::suppress_number_on_count_edit`] is on. Older servers add the
//!   posted number to the stored sample.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::{Graph, GraphUpdate};
use serde_json::{Map, Value};

/// Mode whose stored value is a running count.
pub const COUNT_MODE: &str = "count";

/// Field-level corrections applied by [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergePolicy {
    /// Zero `number` when the merged mode is `count` and the caller left `number` unset.
    pub suppress_number_on_count_edit: bool,
}

impl From<&ClientConfig> for MergePolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            suppress_number_on_count_edit: config.suppress_number_on_count_edit(),
        }
    }
}

/// Lay `partial` over `current` and apply the corrections of `policy`.
///
/// Works key by key on the wire form: every key of `partial` replaces the
/// same key of `current`, keys `current` lacks are added, and keys neither
/// side has stay absent. A parameter set through [`GraphUpdate::param`] under
/// a modelled name replaces that property rather than adding a second key.
/// `id` is never taken from `partial`.
///
/// # Errors
///
/// Returns an error if `partial` does not serialize to a JSON object.
pub fn merge(current: &Graph, partial: &GraphUpdate, policy: MergePolicy) -> Result<Graph> {
    let overlay = match serde_json::to_value(partial)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut merged = current.clone();
    for (key, value) in &overlay {
        if key != "id" {
            merged.set(key.clone(), value.clone());
        }
    }

    if !overlay.contains_key("meta") {
        merged.set("meta", Value::String(String::new()));
    }

    if policy.suppress_number_on_count_edit
        && !overlay.contains_key("number")
        && merged.mode() == Some(COUNT_MODE)
    {
        merged.set("number", Value::from(0));
    }

    Ok(merged)
}
