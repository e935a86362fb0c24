//! Dependency injection traits for testability
//!
//! This module provides trait abstractions for the external resources the
//! generator touches, allowing for easy mocking and testing.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::{DEFAULT_FETCH_TIMEOUT_SECS, USER_AGENT};

/// File system operations
pub trait FileSystem: Send + Sync {
    /// Read a file to string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string to file
    fn write_string(&self, path: &Path, content: &str) -> Result<()>;
}

/// HTTP client used to retrieve remote documents
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a GET request and return the response body
    async fn get(&self, url: &str) -> Result<String>;
}

/// User interface operations
pub trait UserInterface: Send + Sync {
    /// Print a message
    fn print(&self, message: &str);

    /// Print a styled message
    fn print_styled(&self, message: &str, style: MessageStyle);
}

/// Message styling options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Cyan colored text
    Cyan,
    /// Warning style (typically yellow)
    Warning,
    /// Success style (typically green)
    Success,
}

// Production implementations

/// Production file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write file {}", path.display()))
    }
}

/// Production HTTP client backed by `reqwest`
pub struct RealHttpClient {
    client: reqwest::Client,
}

impl RealHttpClient {
    /// Create a client with the default timeout and user agent
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for RealHttpClient {
    async fn get(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP request to {} failed with status: {}", url, response.status());
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))
    }
}
