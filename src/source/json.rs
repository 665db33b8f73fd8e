//! JSON file link source
//!
//! Reads a directory document of the form:
//!
//! ```json
//! { "states": [ { "state": "CA", "links": [ { "url": "https://..." } ] } ] }
//! ```

use crate::source::{LinkGroup, LinkSource, SourceResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level shape of the link directory file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkDirectory {
    #[serde(alias = "groups", default)]
    pub states: Vec<LinkGroup>,
}

impl LinkDirectory {
    /// Parses a directory document
    pub fn from_json(content: &str) -> SourceResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Loads the link directory from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LinkSource for JsonFileSource {
    fn load(&self) -> SourceResult<Vec<LinkGroup>> {
        let content = std::fs::read_to_string(&self.path)?;
        let directory = LinkDirectory::from_json(&content)?;
        tracing::debug!(
            "Loaded {} group(s) from {}",
            directory.states.len(),
            self.path.display()
        );
        Ok(directory.states)
    }
}
