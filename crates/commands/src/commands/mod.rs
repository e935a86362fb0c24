//! Command implementations

/// Refresh the module script and manifest from the protocol description
pub mod regenerate;
