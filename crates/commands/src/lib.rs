//! Command implementations for obsgen
//!
//! This crate turns the obs-websocket protocol description into the generated
//! parts of the OBS Advanced Chataigne module: the embedded protocol copy in
//! the module script and the `commands` section of `module.json`.

/// Command implementations module
pub mod commands;

/// Single-line and indented JSON output in the module's established layout
pub mod json_style;

/// The manifest `commands` builder
pub mod manifest;

/// Typed view of the protocol description
pub mod protocol;

/// Rewriting the generated region of the module script
pub mod splice;

/// Protocol type to parameter type mapping
pub mod type_map;

#[cfg(test)]
pub mod test_helpers;

// Re-export commands at the crate root for easier access
pub use commands::regenerate;
