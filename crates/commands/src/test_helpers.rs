//! Test helper utilities and mock implementations for obsgen-commands

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use mockall::mock;

use obsgen_runtime::deps::{FileSystem, HttpClient};

pub use obsgen_runtime::ui::TestUserInterface;

// Mock implementation of the FileSystem trait for testing file operations.
//
// # Example
//
// ```rust
// let mut mock_fs = MockFileSystemMock::new();
// mock_fs.expect_write_string().times(0);
// ```
mock! {
    pub FileSystemMock {}

    impl FileSystem for FileSystemMock {
        fn read_to_string(&self, path: &Path) -> Result<String>;
        fn write_string(&self, path: &Path, content: &str) -> Result<()>;
    }
}

// Mock implementation of the HttpClient trait for simulating downloads.
mock! {
    pub HttpClientMock {}

    #[async_trait]
    impl HttpClient for HttpClientMock {
        async fn get(&self, url: &str) -> Result<String>;
    }
}

/// In-memory file system that records every write.
#[derive(Default)]
pub struct InMemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<Vec<PathBuf>>,
}

impl InMemoryFileSystem {
    /// Create an empty file system
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    /// Current content of a file
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    /// Paths written so far, in write order
    pub fn written(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("Failed to read file {}: not found", path.display()))
    }

    fn write_string(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// A small protocol description covering the interesting field shapes.
pub const SAMPLE_PROTOCOL: &str = r#"{
  "enums": [
    {
      "enumType": "RequestBatchExecutionType",
      "enumIdentifiers": [
        {
          "description": "Processes all requests serially.\n\nNote: use `Sleep` for delays.",
          "enumIdentifier": "SerialRealtime",
          "enumValue": 0
        }
      ]
    }
  ],
  "requests": [
    {
      "description": "Gets statistics about OBS.",
      "requestType": "GetStats",
      "complexity": 2,
      "rpcVersion": "1",
      "category": "general",
      "requestFields": []
    },
    {
      "description": "Sets the enable state of a scene item.",
      "requestType": "SetSceneItemEnabled",
      "complexity": 3,
      "rpcVersion": "1",
      "category": "scene items",
      "requestFields": [
        {
          "valueName": "sceneName",
          "valueType": "String",
          "valueDescription": "Name of the scene the item is in",
          "valueOptional": false
        },
        {
          "valueName": "sceneItemId",
          "valueType": "Number",
          "valueDescription": "Numeric ID of the scene item",
          "valueOptional": false
        },
        {
          "valueName": "sceneItemEnabled",
          "valueType": "Boolean",
          "valueDescription": "New enable state of the scene item",
          "valueOptional": true
        }
      ]
    },
    {
      "description": "Triggers a hotkey using a sequence of keys.",
      "requestType": "TriggerHotkeyByKeySequence",
      "complexity": 4,
      "rpcVersion": "1",
      "category": "general",
      "requestFields": [
        {
          "valueName": "keyModifiers",
          "valueType": "Object",
          "valueDescription": "Object containing key modifiers to apply",
          "valueOptional": true
        },
        {
          "valueName": "keyModifiers.shift",
          "valueType": "Boolean",
          "valueDescription": "Press Shift",
          "valueOptional": true
        }
      ]
    }
  ],
  "events": []
}"#;

/// A module script with an outdated generated region.
pub const SAMPLE_SCRIPT: &str = "var obsConnected = false;\n\nfunction init() {\n    script.log(\"OBS Advanced loaded\");\n}\n\n// <GENERATED-CODE-API>\nvar API = {\"requests\": []};\n// </GENERATED-CODE-API>\n";

/// A module manifest with an outdated commands section.
pub const SAMPLE_MANIFEST: &str = "{\n  \"name\": \"OBS Advanced\",\n  \"type\": \"WebSocket\",\n  \"version\": \"1.4\",\n  \"description\": \"Control OBS \\u00e9 websocket\",\n  \"commands\": {\n    \"Old\": {\n      \"menu\": \"\",\n      \"callback\": \"old\"\n    }\n  },\n  \"scripts\": [\n    \"OBSAdvanced.js\"\n  ]\n}";
