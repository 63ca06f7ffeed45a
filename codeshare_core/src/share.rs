//! Turning an editor selection into a link.
//!
//! A selection in a tracked file with a remote becomes a Git-aware link. Any
//! failure on that path (no repository, no remote, detached HEAD, file
//! outside the working tree) falls back to storing the text in a snippet
//! store.

use std::path::Path;

use serde::Serialize;

use crate::api::{ShareIntent, ShareLink, ShareRequest};
use crate::codec::{encode_share_link, encode_snippet_link};
use crate::normalize::normalize;
use crate::repository::{display_path, Repository};
use crate::resolver::select_remote;
use crate::{Error, Result, SnippetDraft, SnippetStore};

const FALLBACK_LANGUAGE: &str = "plaintext";

/// Link produced for a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedLink {
    /// Full link URL.
    pub url: String,
    /// Whether the link points into a repository rather than a stored snippet.
    pub git_aware: bool,
}

/// Decide how a selection should be shared.
///
/// # Errors
///
/// Returns [`Error::EmptySelection`] when the selected text is blank and
/// [`Error::InvalidSelection`] when the line range is zero or reversed.
/// Repository problems never surface here; they select the snippet path.
pub fn plan_share(request: &ShareRequest) -> Result<ShareIntent> {
    if request.text.trim().is_empty() {
        return Err(Error::EmptySelection);
    }
    if request.start_line == 0 || request.start_line > request.end_line {
        return Err(Error::InvalidSelection {
            start_line: request.start_line,
            end_line: request.end_line,
        });
    }

    match git_share_link(request) {
        Ok(link) => Ok(ShareIntent::GitAware(link)),
        Err(err) => {
            log::info!("sharing {} as a snippet: {err}", request.path);
            let language = request.language.trim();
            Ok(ShareIntent::Snippet {
                code: request.text.clone(),
                language: if language.is_empty() {
                    FALLBACK_LANGUAGE.to_string()
                } else {
                    language.to_string()
                },
            })
        }
    }
}

/// Build the Git-aware link for a selection without any fallback.
///
/// # Errors
///
/// Returns the repository error that prevents a Git-aware link, such as
/// [`Error::NotARepository`], [`Error::NoRemotes`] or [`Error::NoBranch`].
pub fn git_share_link(request: &ShareRequest) -> Result<ShareLink> {
    let file = std::fs::canonicalize(&request.path).map_err(|source| Error::Io {
        path: request.path.clone(),
        source,
    })?;
    let directory = file.parent().unwrap_or_else(|| Path::new("/"));

    let repository = Repository::open(directory)?;
    let remotes = repository.remotes()?;
    let remote = select_remote(&remotes)?;
    let branch = repository.current_branch()?;
    let relative_path = repository.relative_path(&file)?;

    log::debug!(
        "sharing {} from remote {} on {branch}",
        display_path(&file),
        remote.name
    );

    Ok(ShareLink {
        repo_url: normalize(&remote.fetch_url),
        branch,
        relative_path,
        start_line: request.start_line,
        end_line: request.end_line,
    })
}

/// Turn an intent into a link URL, storing the snippet when needed.
///
/// # Errors
///
/// Returns [`Error::Store`] when the snippet store rejects the snippet or
/// cannot be reached.
pub fn publish(intent: &ShareIntent, base_url: &str, store: &dyn SnippetStore) -> Result<String> {
    match intent {
        ShareIntent::GitAware(link) => Ok(encode_share_link(link, base_url)),
        ShareIntent::Snippet { code, language } => {
            log::debug!("storing snippet via {} store", store.id());
            let snippet = store.create(&SnippetDraft::new(code.as_str(), language.as_str()))?;
            Ok(encode_snippet_link(&snippet.id, base_url))
        }
    }
}

/// Plan and publish a selection in one step.
///
/// # Errors
///
/// Propagates errors from [`plan_share`] and [`publish`].
pub fn share_selection(
    request: &ShareRequest,
    base_url: &str,
    store: &dyn SnippetStore,
) -> Result<SharedLink> {
    let intent = plan_share(request)?;
    let url = publish(&intent, base_url, store)?;
    Ok(SharedLink {
        url,
        git_aware: intent.is_git_aware(),
    })
}
