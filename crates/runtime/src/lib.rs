//! Core runtime services for obsgen
//!
//! This crate contains the configuration constants and the dependency
//! injection interfaces (file system, HTTP, user interface) used by the
//! generator commands, together with their production implementations.

/// Configuration constants
pub mod config;
/// Dependency injection traits and implementations
pub mod deps;
/// Console output implementations
pub mod ui;

// Re-export commonly used types at the crate root
pub use config::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MANIFEST_PATH, DEFAULT_PROTOCOL_URL, DEFAULT_SCRIPT_PATH,
    PROTOCOL_URL_ENV_VAR, USER_AGENT,
};
pub use deps::{
    FileSystem, HttpClient, MessageStyle, RealFileSystem, RealHttpClient, UserInterface,
};
pub use ui::{RealUserInterface, TestUserInterface};
