//! Mapping from protocol value types to Chataigne parameter types

use serde::Serialize;

/// Parameter types understood by Chataigne's command UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterType {
    /// Checkbox
    Boolean,
    /// Whole number
    Integer,
    /// Decimal number
    Float,
    /// Free text
    String,
}

/// Name suffixes of number fields that carry whole values.
const INTEGER_SUFFIXES: [&str; 5] = ["Id", "Index", "Frame", "Bytes", "Frames"];

/// The protocol has a single `Number` type; integer fields are recognised by
/// naming convention.
pub fn is_integer_field(field_name: &str) -> bool {
    INTEGER_SUFFIXES
        .iter()
        .any(|suffix| field_name.ends_with(suffix))
}

/// Map a protocol field to the parameter type it is exposed as.
///
/// Returns `None` for types that have no parameter representation (arrays and
/// unknown tags); such fields are left out of the generated command.
pub fn map_type(field_name: &str, protocol_type: &str) -> Option<ParameterType> {
    match protocol_type {
        "Boolean" => Some(ParameterType::Boolean),
        "Number" if is_integer_field(field_name) => Some(ParameterType::Integer),
        "Number" => Some(ParameterType::Float),
        // Objects travel as serialized JSON text.
        "String" | "Object" | "Any" => Some(ParameterType::String),
        _ => None,
    }
}
