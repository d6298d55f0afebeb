/// Data structures for go-link records
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown in place of a key that is missing or blank
pub const NO_KEY_PLACEHOLDER: &str = "〈no key〉";

/// A link record as returned by the remote API.
///
/// The server is trusted as the source of truth, so every field is optional
/// and the legacy aliases `target` and `desc` are kept alongside the
/// canonical names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinkRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl LinkRecord {
    pub fn new(key: &str, url: &str, description: &str) -> LinkRecord {
        LinkRecord {
            key: Some(key.to_string()),
            url: Some(url.to_string()),
            description: Some(description.to_string()),
            ..LinkRecord::default()
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }

    /// `url`, falling back to `target` when absent or empty
    pub fn resolved_url(&self) -> &str {
        first_non_empty(&self.url, &self.target)
    }

    /// `description`, falling back to `desc` when absent or empty
    pub fn resolved_description(&self) -> &str {
        first_non_empty(&self.description, &self.desc)
    }
}

fn first_non_empty<'a>(primary: &'a Option<String>, alias: &'a Option<String>) -> &'a str {
    primary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| alias.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or("")
}

/// Request body for create and update calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkPayload {
    pub key: String,
    pub url: String,
    pub description: String,
}

/// Interpret a list response body.
///
/// Anything other than a JSON array is treated as an empty list. Elements
/// that aren't objects become blank records so a single bad row can't hide
/// the rest. A mistyped field only loses that field.
pub fn parse_link_list(body: Value) -> Vec<LinkRecord> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => LinkRecord {
                    key: field_text(fields.get("key")),
                    url: field_text(fields.get("url")),
                    target: field_text(fields.get("target")),
                    description: field_text(fields.get("description")),
                    desc: field_text(fields.get("desc")),
                },
                _ => LinkRecord::default(),
            })
            .collect(),
        other => {
            warn!("link list response is not an array, treating as empty: {}", other);
            Vec::new()
        }
    }
}

// Strings as-is, scalars as their text; null, arrays and objects are absent
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Display projection of one record in the link list
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRow {
    pub key_label: String,
    pub go_hint: Option<String>,
    pub url: String,
    pub description: Option<String>,
}

impl From<&LinkRecord> for LinkRow {
    fn from(record: &LinkRecord) -> Self {
        let key = record.key().trim();
        let description = record.resolved_description();

        LinkRow {
            key_label: if key.is_empty() {
                NO_KEY_PLACEHOLDER.to_string()
            } else {
                key.to_string()
            },
            go_hint: (!key.is_empty()).then(|| format!("go/{}", key)),
            url: record.resolved_url().to_string(),
            description: (!description.trim().is_empty()).then(|| description.to_string()),
        }
    }
}
