use serde::{Deserialize, Serialize};

/// One version-control remote as reported by a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDescriptor {
    /// Remote name, e.g. `origin`.
    pub name: String,
    /// Fetch URL exactly as configured.
    pub fetch_url: String,
}

impl RemoteDescriptor {
    /// Construct a remote descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, fetch_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fetch_url: fetch_url.into(),
        }
    }
}

/// A local checkout tested against a link's repository URL.
///
/// `H` is whatever handle the caller uses to reopen the workspace later,
/// usually its root path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCandidate<H> {
    /// Caller-owned workspace handle.
    pub id: H,
    /// Remotes in the order the repository reports them.
    #[serde(default)]
    pub remotes: Vec<RemoteDescriptor>,
}

impl<H> WorkspaceCandidate<H> {
    /// Construct a candidate from its handle and remotes.
    #[must_use]
    pub const fn new(id: H, remotes: Vec<RemoteDescriptor>) -> Self {
        Self { id, remotes }
    }
}
