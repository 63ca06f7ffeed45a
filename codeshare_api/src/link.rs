use serde::{Deserialize, Serialize};

/// Logical payload of a Git-aware share link.
///
/// Line numbers are 1-indexed and inclusive; `start_line <= end_line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareLink {
    /// Normalized remote URL of the repository the file lives in.
    pub repo_url: String,
    /// Branch the link was created from.
    pub branch: String,
    /// Path of the file relative to the repository root, `/`-separated.
    pub relative_path: String,
    /// First selected line.
    pub start_line: u32,
    /// Last selected line.
    pub end_line: u32,
}

/// Payload of a stateless snippet link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnippetLink {
    /// Identifier minted by the snippet store.
    pub id: String,
}

impl SnippetLink {
    /// Wrap a store identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Either kind of decoded link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Link {
    /// `/l/<repo>/<branch>/<path>/<range>`
    Share(ShareLink),
    /// `/s/<id>`
    Snippet(SnippetLink),
}
