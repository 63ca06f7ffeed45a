//! Matching link repositories against local workspaces.

use crate::api::{RemoteDescriptor, WorkspaceCandidate};
use crate::normalize::normalize;
use crate::{Error, Result};

const PREFERRED_REMOTES: [&str; 2] = ["origin", "upstream"];

/// Find the first workspace with a remote pointing at `target_url`.
///
/// Candidates and their remotes are scanned in the order given and the first
/// hit wins, so the same repository open twice always resolves to the
/// earlier workspace.
///
/// # Errors
///
/// Returns [`Error::NoMatchingWorkspace`] carrying the normalized target and
/// every normalized remote URL that was compared against it.
pub fn resolve<'a, H>(
    target_url: &str,
    candidates: &'a [WorkspaceCandidate<H>],
) -> Result<&'a WorkspaceCandidate<H>> {
    let target = normalize(target_url);
    let mut examined = Vec::new();

    for candidate in candidates {
        for remote in &candidate.remotes {
            let local = normalize(&remote.fetch_url);
            log::trace!("comparing {target} against remote {} ({local})", remote.name);
            if local == target {
                return Ok(candidate);
            }
            examined.push(local);
        }
    }

    Err(Error::NoMatchingWorkspace { target, examined })
}

/// Pick the remote a share link should point at.
///
/// Prefers `origin`, then `upstream`, then the first remote listed.
///
/// # Errors
///
/// Returns [`Error::NoRemotes`] when `remotes` is empty.
pub fn select_remote(remotes: &[RemoteDescriptor]) -> Result<&RemoteDescriptor> {
    PREFERRED_REMOTES
        .iter()
        .find_map(|preferred| remotes.iter().find(|remote| remote.name == *preferred))
        .or_else(|| remotes.first())
        .ok_or(Error::NoRemotes)
}
