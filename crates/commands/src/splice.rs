//! Rewriting the generated region of the module script
//!
//! The script is maintained by hand except for one region delimited by marker
//! comments, which holds a copy of the protocol description:
//!
//! ```text
//! // <GENERATED-CODE-API>
//! var API = { ... };
//! // </GENERATED-CODE-API>
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::json_style;

/// Line opening the generated region
pub const START_MARKER: &str = "// <GENERATED-CODE-API>";

/// Line closing the generated region
pub const END_MARKER: &str = "// </GENERATED-CODE-API>";

/// Script variable the protocol copy is assigned to
pub const API_VARIABLE: &str = "API";

/// Errors raised while splicing the generated region
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    /// The script has no complete marker pair to replace
    #[error("Marker `{marker}` not found in script; the generated region cannot be located")]
    MarkersNotFound {
        /// The marker that is missing
        marker: &'static str,
    },
}

/// Serialize the protocol document for embedding in the script.
///
/// With `escape_backslashes` set, every backslash is doubled. The payload is
/// assigned as an object literal, not embedded in a string literal, so a
/// quote escaped as `\\"` ends the JSON string early and the script no longer
/// parses. Other escapes survive as literal text (`\\n`). Pass `false` to get
/// a script that loads as-is.
pub fn embed_payload(document: &Value, escape_backslashes: bool) -> serde_json::Result<String> {
    let json = json_style::to_pretty_string(document)?;
    if escape_backslashes {
        Ok(escape_backslashes_in(&json))
    } else {
        Ok(json)
    }
}

/// Double every backslash in `text`.
pub fn escape_backslashes_in(text: &str) -> String {
    text.replace('\\', "\\\\")
}

/// The complete generated region for `payload`, markers included.
pub fn render_region(payload: &str) -> String {
    format!("{START_MARKER}\nvar {API_VARIABLE} = {payload};\n{END_MARKER}")
}

/// Replace every marker-delimited region of `source` with a fresh region
/// carrying `payload`.
///
/// Each region runs from a start marker to the nearest following end marker.
pub fn splice(source: &str, payload: &str) -> Result<String, SpliceError> {
    let region = render_region(payload);
    let mut output = String::with_capacity(source.len() + region.len());
    let mut rest = source;
    let mut replaced = 0usize;

    while let Some(start) = rest.find(START_MARKER) {
        let body = start + START_MARKER.len();
        let Some(end) = rest[body..].find(END_MARKER) else {
            break;
        };
        output.push_str(&rest[..start]);
        output.push_str(&region);
        rest = &rest[body + end + END_MARKER.len()..];
        replaced += 1;
    }

    if replaced == 0 {
        let marker = if source.contains(START_MARKER) {
            END_MARKER
        } else {
            START_MARKER
        };
        return Err(SpliceError::MarkersNotFound { marker });
    }

    output.push_str(rest);
    tracing::debug!(regions = replaced, "Spliced generated region");
    Ok(output)
}
