use serde::{Deserialize, Serialize};

use crate::ShareLink;

/// Selection handed over by the editor when the user asks for a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Absolute path of the document the selection belongs to.
    pub path: String,
    /// First selected line, 1-indexed.
    pub start_line: u32,
    /// Last selected line, 1-indexed.
    pub end_line: u32,
    /// Selected text, used when the snippet fallback is taken.
    pub text: String,
    /// Editor language identifier of the document (e.g. `rust`).
    pub language: String,
}

/// What a share request turns into once the repository has been inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareIntent {
    /// The file is tracked in a repository with a usable remote.
    GitAware(ShareLink),
    /// No repository context; the text itself has to be stored.
    Snippet {
        /// Selected text.
        code: String,
        /// Editor language identifier.
        language: String,
    },
}

impl ShareIntent {
    /// Returns true for the Git-aware variant.
    #[must_use]
    pub const fn is_git_aware(&self) -> bool {
        matches!(self, Self::GitAware(_))
    }
}

/// Location a link asks to open, before a workspace has been chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRequest {
    /// Repository URL as carried by the link (not yet normalized).
    pub repo_url: String,
    /// File path relative to the repository root.
    pub file: String,
    /// First line to select, 1-indexed.
    pub start_line: u32,
    /// Last line to select, 1-indexed.
    pub end_line: u32,
}

impl From<ShareLink> for OpenRequest {
    fn from(link: ShareLink) -> Self {
        Self {
            repo_url: link.repo_url,
            file: link.relative_path,
            start_line: link.start_line,
            end_line: link.end_line,
        }
    }
}

/// Resolved location inside a local workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTarget<H> {
    /// Handle of the workspace that matched.
    pub workspace: H,
    /// Absolute path of the file to open.
    pub path: String,
    /// First line to select, 1-indexed.
    pub start_line: u32,
    /// Last line to select, 1-indexed.
    pub end_line: u32,
}
