//! Path-segment and form encoding.
//!
//! GrowthForecast has two escaping conventions for user-chosen names. The JSON
//! API (`/json/...`) expects `%20` for a space; the legacy query-string
//! endpoints (`/api`, `/delete`, `/vrule`) were historically fed `+`. Both are
//! modelled here as named functions and selected per endpoint family.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Escape a path segment with `%20` for spaces.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` is percent-encoded.
pub fn percent_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Escape a path segment or form component with `+` for spaces.
///
/// Identical to [`percent_segment`] except that a space becomes `+`. A literal
/// `+` in the input is still escaped as `%2B`.
pub fn form_segment(segment: &str) -> String {
    percent_segment(segment).replace("%20", "+")
}

/// Decode a segment produced by either convention.
///
/// Both `+` and `%20` decode to a space. Invalid UTF-8 after decoding falls
/// back to the raw input.
pub fn decode_segment(segment: &str) -> String {
    let plus_decoded = segment.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

/// Build an `application/x-www-form-urlencoded` body.
pub fn form_body<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", form_segment(k.as_ref()), form_segment(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Flatten a serializable parameter object into form key/value pairs.
///
/// Strings are sent verbatim, numbers and booleans in their JSON spelling,
/// nested arrays and objects as JSON text. Nulls are dropped.
///
/// # Errors
///
/// Returns an error if `params` does not serialize to a JSON object.
pub fn form_pairs<T: Serialize>(params: &T) -> serde_json::Result<Vec<(String, String)>> {
    let object = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        other => {
            return Err(serde::ser::Error::custom(format!(
                "form parameters must be an object, got {}",
                other
            )));
        }
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect())
}

/// Escaping convention for a family of endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathEncoding {
    /// Space encodes to `%20`.
    #[default]
    Percent,
    /// Space encodes to `+`.
    Form,
}

impl PathEncoding {
    /// Encode one path segment with this convention.
    pub fn encode(self, segment: &str) -> String {
        match self {
            Self::Percent => percent_segment(segment),
            Self::Form => form_segment(segment),
        }
    }
}

impl fmt::Display for PathEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => f.write_str("percent"),
            Self::Form => f.write_str("form"),
        }
    }
}

impl FromStr for PathEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percent" | "%20" => Ok(Self::Percent),
            "form" | "plus" | "+" => Ok(Self::Form),
            other => Err(format!(
                "unknown path encoding '{}', expected 'percent' or 'form'",
                other
            )),
        }
    }
}
