//! Building the `commands` section of the module manifest
//!
//! Every protocol request becomes a menu command that calls the script's
//! generic executor. The executor receives the request name, an id and the
//! field values positionally; the `data` parameter tells it which protocol
//! field each position stands for.

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Value, json};
use thiserror::Error;

use crate::json_style;
use crate::protocol::{FieldDescriptor, ProtocolDocument, RequestDescriptor};
use crate::type_map::{ParameterType, map_type};

/// Script function every generated command delegates to
pub const GENERIC_CALLBACK: &str = "genericCommandExecutor";

/// Script function behind the raw websocket command
pub const RAW_WS_CALLBACK: &str = "sendRawWSMessage";

/// Script function behind the raw request command
pub const RAW_REQUEST_CALLBACK: &str = "sendRawOBSRequest";

/// Number of field values the generic executor accepts positionally.
pub const MAX_POSITIONAL_FIELDS: usize = 9;

/// Commands keyed by their menu label, in menu order.
pub type Commands = IndexMap<String, CommandEntry>;

/// One entry of the manifest's `commands` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEntry {
    /// Submenu the command is listed under
    pub menu: String,
    /// Script function invoked when the command fires
    pub callback: String,
    /// Parameters in callback argument order
    pub parameters: IndexMap<String, ParameterSpec>,
}

/// A single command parameter.
///
/// Serializes as `type` followed by the attributes that are set. `enabled`
/// comes before `default` when the parameter was disabled before it got a
/// default, which is how the `data` parameter appears in module.json.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter type
    pub kind: ParameterType,
    /// Initial value
    pub default: Option<Value>,
    /// Tooltip text
    pub description: Option<String>,
    /// Whether the parameter is shown as editable
    pub enabled: Option<bool>,
    enabled_first: bool,
}

impl ParameterSpec {
    /// A parameter of type `kind` with nothing else set
    pub const fn new(kind: ParameterType) -> Self {
        Self {
            kind,
            default: None,
            description: None,
            enabled: None,
            enabled_first: false,
        }
    }

    /// Set the initial value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.set_default(default);
        self
    }

    /// Set the initial value in place
    pub fn set_default(&mut self, default: impl Into<Value>) {
        self.default = Some(default.into());
    }

    /// Set the tooltip text
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Hide the parameter from editing
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = Some(false);
        self.enabled_first = self.default.is_none();
        self
    }
}

impl Serialize for ParameterSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        if let (true, Some(enabled)) = (self.enabled_first, self.enabled) {
            map.serialize_entry("enabled", &enabled)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let (false, Some(enabled)) = (self.enabled_first, self.enabled) {
            map.serialize_entry("enabled", &enabled)?;
        }
        map.end()
    }
}

/// How field descriptions are rendered into parameter tooltips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptionStyle {
    /// Optional fields show only `Optional: `, required fields show
    /// `Required: ` followed by the protocol description. This is what the
    /// published module.json contains.
    #[default]
    Legacy,
    /// Both prefixes are followed by the protocol description.
    Full,
}

/// Errors raised while updating the manifest document
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest root is not a JSON object
    #[error("Manifest root must be a JSON object")]
    NotAnObject,
    /// A value could not be serialized
    #[error("Failed to serialize manifest value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Tooltip text for a protocol field.
pub fn describe_field(field: &FieldDescriptor, style: DescriptionStyle) -> String {
    match (field.value_optional, style) {
        (true, DescriptionStyle::Legacy) => "Optional: ".to_string(),
        (true, DescriptionStyle::Full) => format!("Optional: {}", field.value_description),
        (false, _) => format!("Required: {}", field.value_description),
    }
}

/// Title-case a category name: the first letter of every alphabetic run is
/// upper-cased and the rest lower-cased (`"media inputs"` -> `"Media Inputs"`).
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(ch);
            in_word = false;
        }
    }
    output
}

/// The two hand-written commands that precede the generated ones.
pub fn fixed_commands() -> Result<Commands, ManifestError> {
    let raw_message = json!({
        "op": 6,
        "d": {
            "requestType": "GetStats",
            "requestId": 0,
            "requestData": {"foo": "bar"}
        }
    });
    let raw_request_data = json!({"foo": "bar"});

    let mut commands = Commands::new();
    commands.insert(
        "Raw WS Message".to_string(),
        CommandEntry {
            menu: String::new(),
            callback: RAW_WS_CALLBACK.to_string(),
            parameters: IndexMap::from([(
                "data".to_string(),
                ParameterSpec::new(ParameterType::String)
                    .with_default(json_style::to_inline_string(&raw_message)?),
            )]),
        },
    );
    commands.insert(
        "Raw OBS Request".to_string(),
        CommandEntry {
            menu: String::new(),
            callback: RAW_REQUEST_CALLBACK.to_string(),
            parameters: IndexMap::from([
                (
                    "requestType".to_string(),
                    ParameterSpec::new(ParameterType::String).with_default("GetStats"),
                ),
                (
                    "requestId".to_string(),
                    ParameterSpec::new(ParameterType::Integer).with_default("0"),
                ),
                (
                    "requestData".to_string(),
                    ParameterSpec::new(ParameterType::String)
                        .with_default(json_style::to_inline_string(&raw_request_data)?),
                ),
            ]),
        },
    );
    Ok(commands)
}

/// Build the command for one protocol request.
pub fn build_command(
    request: &RequestDescriptor,
    style: DescriptionStyle,
) -> Result<CommandEntry, ManifestError> {
    let mut parameters = IndexMap::new();
    // Placeholder so `data` keeps its leading position; its default is known
    // once the fields are collected.
    parameters.insert(
        "data".to_string(),
        ParameterSpec::new(ParameterType::String).disabled(),
    );
    parameters.insert(
        "request".to_string(),
        ParameterSpec::new(ParameterType::String)
            .with_default(request.request_type.as_str())
            .disabled(),
    );
    parameters.insert(
        "requestId".to_string(),
        ParameterSpec::new(ParameterType::Integer).with_default("0"),
    );

    let mut field_list = Vec::new();
    for field in &request.request_fields {
        if field.is_nested() {
            continue;
        }
        let Some(kind) = map_type(&field.value_name, &field.value_type) else {
            tracing::debug!(
                request = %request.request_type,
                field = %field.value_name,
                value_type = %field.value_type,
                "Skipping field without a parameter type"
            );
            continue;
        };
        field_list.push([field.value_name.as_str(), field.value_type.as_str()]);
        parameters.insert(
            field.value_name.clone(),
            ParameterSpec::new(kind).with_description(describe_field(field, style)),
        );
    }

    if field_list.len() > MAX_POSITIONAL_FIELDS {
        tracing::warn!(
            request = %request.request_type,
            fields = field_list.len(),
            max = MAX_POSITIONAL_FIELDS,
            "Request has more fields than the generic executor passes on"
        );
    }

    let data = json_style::to_inline_string(&json!({ "fieldList": field_list }))?;
    if let Some(spec) = parameters.get_mut("data") {
        spec.set_default(data);
    }

    Ok(CommandEntry {
        menu: title_case(&request.category),
        callback: GENERIC_CALLBACK.to_string(),
        parameters,
    })
}

/// Build the complete `commands` section for a protocol document.
pub fn build_commands(
    document: &ProtocolDocument,
    style: DescriptionStyle,
) -> Result<Commands, ManifestError> {
    let mut commands = fixed_commands()?;
    for request in document.requests() {
        if request.request_type.is_empty() {
            continue;
        }
        let entry = build_command(request, style)?;
        commands.insert(request.request_type.clone(), entry);
    }
    Ok(commands)
}

/// Replace the `commands` section of `manifest`, keeping every other key and
/// the position of `commands` itself.
pub fn apply_commands(manifest: &mut Value, commands: &Commands) -> Result<(), ManifestError> {
    let root = manifest.as_object_mut().ok_or(ManifestError::NotAnObject)?;
    if !root.contains_key("commands") {
        tracing::warn!("Manifest has no `commands` section; adding one");
    }
    root.insert("commands".to_string(), serde_json::to_value(commands)?);
    Ok(())
}

/// Serialize the manifest the way it is stored on disk.
pub fn render_manifest(manifest: &Value) -> Result<String, ManifestError> {
    Ok(json_style::to_pretty_string(manifest)?)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
