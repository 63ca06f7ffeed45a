//! Core library for Codeshare links.
//!
//! The crate is layered around three primary responsibilities:
//! - normalizing and matching version-control remote URLs
//! - encoding and decoding sharable links
//! - the share and open flows that tie those to a git working tree

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Link encoding and decoding.
pub mod codec;
/// Environment-driven configuration.
pub mod config;
/// Bindings exposed to editor hosts.
pub mod ffi;
/// Remote URL canonicalization.
pub mod normalize;
/// Resolving `/open` URIs and share links to workspace files.
pub mod open;
/// Git repository access.
pub mod repository;
/// Workspace matching and remote selection.
pub mod resolver;
/// Turning an editor selection into a link.
pub mod share;

pub use codeshare_api as api;
pub use codeshare_api::{
    Link, OpenRequest, OpenTarget, RemoteDescriptor, ShareIntent, ShareLink, ShareRequest,
    SnippetLink, WorkspaceCandidate,
};
pub use codeshare_store_api::{SnippetDraft, SnippetStore, StoreError};

pub use codec::DecodeError;

// UniFFI's generated scaffolding refers to `crate::UniFfiTag`.
use ffi::UniFfiTag;

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A link segment could not be decoded.
    #[error("malformed link: {0}")]
    Decode(#[from] DecodeError),
    /// The repository has no remotes configured.
    #[error("repository has no remotes configured")]
    NoRemotes,
    /// No open workspace has a remote matching the link.
    #[error(
        "no open workspace matches {target}; remotes examined: {}",
        list_or_none(.examined)
    )]
    NoMatchingWorkspace {
        /// Normalized repository URL carried by the link.
        target: String,
        /// Every normalized remote URL compared against the target, in order.
        examined: Vec<String>,
    },
    /// An activation URI is missing or has malformed parameters.
    #[error("invalid link: {reason}")]
    InvalidLink {
        /// What was wrong with the URI.
        reason: String,
    },
    /// Underlying git operation failed.
    #[error("git error: {source}")]
    Git {
        /// Original libgit2 error.
        #[from]
        source: git2::Error,
    },
    /// Provided path does not correspond to a git repository.
    #[error("path does not reference a git repository: {path}")]
    NotARepository {
        /// Path that failed to resolve to a repository.
        path: String,
    },
    /// Bare repositories have no working tree to share from.
    #[error("repository at {path} is bare and unsupported")]
    BareRepository {
        /// Path of the repository lacking a working tree.
        path: String,
    },
    /// HEAD is detached or unborn, so there is no branch to link to.
    #[error("repository at {path} has no checked-out branch")]
    NoBranch {
        /// Repository root.
        path: String,
    },
    /// The shared file does not live inside the repository working tree.
    #[error("{path} is outside the repository at {root}")]
    OutsideRepository {
        /// File that was shared.
        path: String,
        /// Repository root.
        root: String,
    },
    /// Nothing is selected.
    #[error("select some code to share")]
    EmptySelection,
    /// The selected line range is unusable.
    #[error("invalid selection: lines {start_line}-{end_line}")]
    InvalidSelection {
        /// First selected line.
        start_line: u32,
        /// Last selected line.
        end_line: u32,
    },
    /// A configuration value could not be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        /// Environment variable or setting name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The snippet store failed to store the selection.
    #[error("could not create snippet link: {source}")]
    Store {
        /// Error reported by the store.
        #[from]
        source: StoreError,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
