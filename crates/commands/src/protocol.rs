//! The obs-websocket protocol description
//!
//! Only the parts of `protocol.json` the generator interprets are typed here;
//! the full document is kept as raw JSON so the embedded copy in the module
//! script carries every section (`enums`, `requests`, `events`, ...).

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A fetched protocol description.
#[derive(Debug, Clone)]
pub struct ProtocolDocument {
    raw: Value,
    requests: Vec<RequestDescriptor>,
}

/// One request the protocol exposes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    /// Unique request name, e.g. `GetStats`; empty when absent or `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub request_type: String,
    /// Menu category, e.g. `general`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Request fields in protocol order
    #[serde(default)]
    pub request_fields: Vec<FieldDescriptor>,
}

/// One field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name; a `.` marks a nested path such as `keyModifiers.shift`
    pub value_name: String,
    /// Protocol type tag (`Boolean`, `Number`, `String`, `Object`, `Any`, `Array<String>`, ...)
    pub value_type: String,
    /// Whether the request can be sent without this field
    #[serde(default)]
    pub value_optional: bool,
    /// Human readable description
    #[serde(default)]
    pub value_description: String,
}

impl FieldDescriptor {
    /// Nested fields describe members of an object field and are not
    /// addressable as parameters of their own.
    pub fn is_nested(&self) -> bool {
        self.value_name.contains('.')
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct RequestSection {
    requests: Vec<RequestDescriptor>,
}

impl ProtocolDocument {
    /// Parse a protocol description from its JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: Value =
            serde_json::from_str(text).context("Protocol description is not valid JSON")?;
        Self::from_value(raw)
    }

    /// Interpret an already parsed protocol description.
    pub fn from_value(raw: Value) -> Result<Self> {
        let section = RequestSection::deserialize(&raw)
            .context("Protocol description has no valid `requests` list")?;
        Ok(Self {
            raw,
            requests: section.requests,
        })
    }

    /// The document exactly as fetched
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Requests in protocol order
    pub fn requests(&self) -> &[RequestDescriptor] {
        &self.requests
    }
}
