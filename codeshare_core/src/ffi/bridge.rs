use std::path::PathBuf;

use codeshare_stores::HttpSnippetStore;

use crate::{
    codec,
    config::Config,
    normalize::normalize,
    open, resolver,
    share::{self, SharedLink},
    Error, OpenTarget, RemoteDescriptor, ShareLink, ShareRequest,
};

use super::CoreError;

type Result<T> = std::result::Result<T, CoreError>;

/// File and line range a host editor should open and select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    /// Workspace folder that matched the link.
    pub workspace: String,
    /// Absolute path of the file.
    pub path: String,
    /// First line to select, 1-indexed.
    pub start_line: u32,
    /// Last line to select, 1-indexed.
    pub end_line: u32,
}

impl From<OpenTarget<PathBuf>> for FileLocation {
    fn from(target: OpenTarget<PathBuf>) -> Self {
        Self {
            workspace: target.workspace.to_string_lossy().into_owned(),
            path: target.path,
            start_line: target.start_line,
            end_line: target.end_line,
        }
    }
}

/// Canonical comparison form of a remote URL.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn normalize_remote_url(raw: String) -> String {
    normalize(&raw)
}

/// Encode a Git-aware link.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn encode_share_link(link: ShareLink, base_url: String) -> String {
    codec::encode_share_link(&link, &base_url)
}

/// Decode the four trailing segments of a Git-aware link.
///
/// # Errors
///
/// Returns [`CoreError::Decode`] unless exactly four valid segments are given.
#[allow(clippy::needless_pass_by_value)]
pub fn decode_share_link(segments: Vec<String>) -> Result<ShareLink> {
    let [repo, branch, path, range] = segments.as_slice() else {
        return Err(CoreError::Decode {
            message: format!("expected 4 link segments, got {}", segments.len()),
        });
    };
    Ok(codec::decode_share_link([
        repo.as_str(),
        branch.as_str(),
        path.as_str(),
        range.as_str(),
    ])?)
}

/// Encode a snippet link.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn encode_snippet_link(id: String, base_url: String) -> String {
    codec::encode_snippet_link(&id, &base_url)
}

/// Pick the remote a share link should use.
///
/// # Errors
///
/// Returns [`CoreError::NoRemotes`] for an empty list.
#[allow(clippy::needless_pass_by_value)]
pub fn select_remote(remotes: Vec<RemoteDescriptor>) -> Result<RemoteDescriptor> {
    Ok(resolver::select_remote(&remotes)?.clone())
}

/// Resolve a link or `/open` URI against the host's workspace folders.
///
/// # Errors
///
/// Returns [`CoreError::InvalidLink`], [`CoreError::Decode`] or
/// [`CoreError::NoMatchingWorkspace`].
#[allow(clippy::needless_pass_by_value)]
pub fn resolve_link(link: String, workspace_folders: Vec<String>) -> Result<FileLocation> {
    let target = open::open_link(&link, &workspace_folders)?;
    Ok(FileLocation::from(target))
}

/// Share a selection, storing it as a snippet when no repository applies.
///
/// `base_url` falls back to the environment configuration when absent.
///
/// # Errors
///
/// Returns selection, configuration and snippet store errors.
#[allow(clippy::needless_pass_by_value)]
pub fn share_selection(request: ShareRequest, base_url: Option<String>) -> Result<String> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }

    let store = HttpSnippetStore::with_timeout(&config.base_url, config.timeout)
        .map_err(Error::from)?;
    let SharedLink { url, .. } = share::share_selection(&request, &config.base_url, &store)?;
    Ok(url)
}
