//! Resource/config provider
//!
//! UI strings and persisted properties behind one interface. The
//! controller requires a provider at construction and calls `init()`
//! exactly once. `FileResources` stores both maps in
//! `~/.config/folio/resources.yaml`; `MemoryResources` keeps everything
//! in-process for tests and embedders.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strings and properties for the coordination core.
pub trait ResourceProvider {
    /// One-time initialization; the controller constructor calls this once
    fn init(&mut self);

    /// Resolve a UI string by key
    fn text(&self, key: &str) -> Option<String>;

    /// Read a persisted property
    fn property(&self, key: &str) -> Option<String>;

    /// Write a persisted property
    fn set_property(&mut self, key: &str, value: &str);
}

/// Failure while persisting file-backed resources
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// On-disk shape of `resources.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ResourceData {
    /// UI strings keyed by resource key
    #[serde(default)]
    strings: HashMap<String, String>,
    /// Persisted application properties
    #[serde(default)]
    properties: HashMap<String, String>,
}

/// Resource provider backed by a YAML file in the config directory.
#[derive(Debug)]
pub struct FileResources {
    path: Option<PathBuf>,
    data: ResourceData,
}

impl FileResources {
    /// Provider over the default config location
    pub fn new() -> Self {
        Self {
            path: crate::config_paths::resources_file(),
            data: ResourceData::default(),
        }
    }

    /// Provider over an explicit file, for tests and portable installs
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            data: ResourceData::default(),
        }
    }

    /// Load from disk, keeping defaults if the file is missing or unreadable
    fn load(&mut self) {
        let Some(path) = &self.path else {
            tracing::debug!("No config directory available, using default resources");
            return;
        };

        if !path.exists() {
            tracing::debug!(
                "Resource file not found at {}, using defaults",
                path.display()
            );
            return;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(data) => {
                    tracing::info!("Loaded resources from {}", path.display());
                    self.data = data;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse resources at {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read resources at {}: {}", path.display(), e);
            }
        }
    }

    /// Save to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<(), ResourceError> {
        let path = self.path.as_ref().ok_or(ResourceError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&self.data)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for FileResources {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProvider for FileResources {
    fn init(&mut self) {
        self.load();
    }

    fn text(&self, key: &str) -> Option<String> {
        self.data.strings.get(key).cloned()
    }

    fn property(&self, key: &str) -> Option<String> {
        self.data.properties.get(key).cloned()
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.data
            .properties
            .insert(key.to_string(), value.to_string());
        if let Err(e) = self.save() {
            tracing::warn!("Failed to persist property {}: {}", key, e);
        }
    }
}

/// In-process resource provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    strings: HashMap<String, String>,
    properties: HashMap<String, String>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a UI string
    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
}

impl ResourceProvider for MemoryResources {
    fn init(&mut self) {}

    fn text(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.properties
            .insert(key.to_string(), value.to_string());
    }
}
