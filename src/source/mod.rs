//! Link source: where the URLs to check come from
//!
//! The engine only needs a flat list of URLs. Sources hand over the grouped
//! directory as-is; [`flatten_urls`] and [`link_pairs`] derive the views the
//! rest of the crate works with.

mod json;

pub use json::{JsonFileSource, LinkDirectory};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading the link directory
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read link directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse link directory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for link source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// A single link of the directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkEntry {
    pub url: String,
}

/// A group of links, e.g. the portals of one state
///
/// The grouping does not affect checking. Any of `id`, `state` or `name`
/// identifies the group, in that order of preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkGroup {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

impl LinkGroup {
    /// Identifier of the group, if the directory provides one
    pub fn group_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.state.as_deref())
            .or(self.name.as_deref())
    }
}

/// Supplier of the link directory for one run
pub trait LinkSource {
    /// Loads every group; called once at the start of a run
    fn load(&self) -> SourceResult<Vec<LinkGroup>>;
}

/// Flattens groups into the URLs to check
///
/// Each URL is passed on exactly as the directory spells it, so report keys
/// match directory entries. A blank or malformed entry is kept and ends up
/// in the report as a failed link. Repeated URLs are kept only at their
/// first position.
pub fn flatten_urls(groups: &[LinkGroup]) -> Vec<String> {
    let urls: Vec<String> = link_pairs(groups).into_iter().map(|(_, url)| url).collect();
    crate::checker::dedup_preserving_order(&urls)
}

/// Lists `(groupId, url)` pairs in directory order
///
/// Groups without an identifier are named by their position.
pub fn link_pairs(groups: &[LinkGroup]) -> Vec<(String, String)> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(index, group)| {
            let group_id = group
                .group_id()
                .map(str::to_string)
                .unwrap_or_else(|| index.to_string());
            group
                .links
                .iter()
                .map(move |link| (group_id.clone(), link.url.clone()))
        })
        .collect()
}
