//! Centralized configuration for obsgen
//!
//! This module provides a single source of truth for all configuration values
//! used throughout the generator.
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override defaults:
//! - `OBSGEN_PROTOCOL_URL`: Override the URL the protocol description is fetched from

/// Default location of the obs-websocket protocol description
pub const DEFAULT_PROTOCOL_URL: &str =
    "https://raw.githubusercontent.com/obsproject/obs-websocket/master/docs/generated/protocol.json";

/// Environment variable name for overriding the protocol URL
pub const PROTOCOL_URL_ENV_VAR: &str = "OBSGEN_PROTOCOL_URL";

/// Default module script that carries the embedded protocol copy
pub const DEFAULT_SCRIPT_PATH: &str = "OBSAdvanced.js";

/// Default command manifest of the module
pub const DEFAULT_MANIFEST_PATH: &str = "module.json";

/// Default HTTP timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("obsgen/", env!("CARGO_PKG_VERSION"));
