//! Resolving activation URIs and share links to files in local workspaces.

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::api::{Link, OpenRequest, OpenTarget, WorkspaceCandidate};
use crate::codec::{decode_link, parse_line_range};
use crate::repository::{discover_candidates, display_path};
use crate::resolver::resolve;
use crate::{Error, Result};

const OPEN_PATH: &str = "/open";
const OPEN_PARAMS: [&str; 3] = ["repo", "file", "lines"];

/// Parse an `/open?repo=..&file=..&lines=..` activation URI.
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] when the URI is malformed, its path is not
/// `/open`, or a required parameter is missing, and [`Error::Decode`] when
/// `lines` is not a valid range.
pub fn parse_open_uri(uri: &str) -> Result<OpenRequest> {
    let url = Url::parse(uri.trim())
        .map_err(|err| invalid(format!("{uri:?} is not a URI: {err}")))?;
    if url.path() != OPEN_PATH {
        return Err(invalid(format!(
            "unsupported path {:?}, expected {OPEN_PATH}",
            url.path()
        )));
    }

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| invalid(format!("missing `{name}` parameter")))
    };

    let repo_url = param("repo")?;
    let file = param("file")?;
    let lines = param("lines")?;
    let (start_line, end_line) = parse_line_range(&lines)?;

    Ok(OpenRequest {
        repo_url,
        file,
        start_line,
        end_line,
    })
}

/// Parse either an activation URI or a `/l/...` share link.
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] for snippet links, which carry no
/// repository, and decoding errors for anything else that is not a link.
pub fn parse_request(link: &str) -> Result<OpenRequest> {
    if Url::parse(link.trim()).is_ok_and(|url| is_activation_uri(&url)) {
        return parse_open_uri(link);
    }

    match decode_link(link)? {
        Link::Share(share) => Ok(OpenRequest::from(share)),
        Link::Snippet(snippet) => Err(invalid(format!(
            "snippet link {} is not tied to a repository",
            snippet.id
        ))),
    }
}

/// Resolve a request against workspace candidates.
///
/// `request.file` is joined onto the path of the candidate handle.
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] when the requested file escapes the
/// workspace and [`Error::NoMatchingWorkspace`] when no remote matches.
pub fn locate<H>(
    request: &OpenRequest,
    candidates: &[WorkspaceCandidate<H>],
) -> Result<OpenTarget<H>>
where
    H: AsRef<Path> + Clone,
{
    check_relative(&request.file)?;
    let candidate = resolve(&request.repo_url, candidates)?;

    Ok(OpenTarget {
        workspace: candidate.id.clone(),
        path: display_path(&candidate.id.as_ref().join(&request.file)),
        start_line: request.start_line,
        end_line: request.end_line,
    })
}

/// Parse `link`, inspect the git remotes of `folders`, and locate the file.
///
/// The file is resolved against the working tree root of the matching
/// folder, which may be an ancestor of the folder itself. The returned
/// `workspace` is the folder as given.
///
/// # Errors
///
/// Propagates errors from [`parse_request`] and [`locate`].
pub fn open_link<P: AsRef<Path>>(link: &str, folders: &[P]) -> Result<OpenTarget<PathBuf>> {
    let request = parse_request(link)?;
    let candidates = discover_candidates(folders);
    let target = locate(&request, &candidates)?;

    Ok(OpenTarget {
        workspace: target.workspace.folder,
        path: target.path,
        start_line: target.start_line,
        end_line: target.end_line,
    })
}

/// Anything that is not a plain web link, or that carries activation
/// parameters, is treated as an activation URI.
fn is_activation_uri(url: &Url) -> bool {
    url.path() == OPEN_PATH
        || !matches!(url.scheme(), "http" | "https")
        || url
            .query_pairs()
            .any(|(key, _)| OPEN_PARAMS.contains(&&*key))
}

fn check_relative(file: &str) -> Result<()> {
    let path = Path::new(file);
    let mut has_name = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid(format!(
                    "file {file:?} must be relative to the repository root"
                )));
            }
        }
    }
    if has_name {
        Ok(())
    } else {
        Err(invalid(format!("file {file:?} does not name a file")))
    }
}

fn invalid(reason: String) -> Error {
    Error::InvalidLink { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RemoteDescriptor;
    use crate::DecodeError;

    const OPEN_URI: &str = "vscode://sarthak.codeshare/open?repo=https%3A%2F%2Fgithub.com%2Facme%2Fwidget&file=src%2Fa.ts&lines=10-12";

    fn candidates() -> Vec<WorkspaceCandidate<PathBuf>> {
        vec![
            WorkspaceCandidate::new(
                PathBuf::from("/work/other"),
                vec![RemoteDescriptor::new("origin", "https://github.com/acme/other")],
            ),
            WorkspaceCandidate::new(
                PathBuf::from("/work/widget"),
                vec![RemoteDescriptor::new("origin", "git@github.com:acme/widget.git")],
            ),
        ]
    }

    #[test]
    fn parses_open_uri() {
        let request = parse_open_uri(OPEN_URI).expect("request");
        assert_eq!(request.repo_url, "https://github.com/acme/widget");
        assert_eq!(request.file, "src/a.ts");
        assert_eq!((request.start_line, request.end_line), (10, 12));
    }

    #[test]
    fn missing_parameters_are_invalid_links() {
        for (uri, missing) in [
            ("vscode://x.y/open?file=a.rs&lines=1", "repo"),
            ("vscode://x.y/open?repo=r&lines=1", "file"),
            ("vscode://x.y/open?repo=r&file=a.rs&lines=", "lines"),
        ] {
            match parse_open_uri(uri) {
                Err(Error::InvalidLink { reason }) => {
                    assert!(reason.contains(missing), "{reason}");
                }
                other => panic!("expected invalid link for {uri}, got {other:?}"),
            }
        }
    }

    #[test]
    fn wrong_path_is_an_invalid_link() {
        assert!(matches!(
            parse_open_uri("vscode://x.y/share?repo=r&file=f&lines=1"),
            Err(Error::InvalidLink { .. })
        ));
    }

    #[test]
    fn bad_line_range_is_a_decode_error() {
        assert!(matches!(
            parse_open_uri("vscode://x.y/open?repo=r&file=f&lines=0-3"),
            Err(Error::Decode(DecodeError::LineOutOfRange { .. }))
        ));
    }

    #[test]
    fn share_links_and_uris_resolve_alike() {
        let share = "https://codeshare.example/l/aHR0cHM6Ly9naXRodWIuY29tL2FjbWUvd2lkZ2V0/bWFpbg/c3JjL2EudHM/10-12";
        let from_link = parse_request(share).expect("share request");
        let from_uri = parse_request(OPEN_URI).expect("uri request");
        assert_eq!(from_link, from_uri);

        let target = locate(&from_link, &candidates()).expect("target");
        assert_eq!(target.workspace, PathBuf::from("/work/widget"));
        assert_eq!(
            PathBuf::from(&target.path),
            Path::new("/work/widget").join("src/a.ts")
        );
        assert_eq!((target.start_line, target.end_line), (10, 12));
    }

    #[test]
    fn custom_scheme_with_wrong_path_is_an_invalid_link() {
        for uri in [
            "vscode://x.y/opn?repo=r&file=f&lines=1",
            "vscode://x.y/l/aaa/bbb/ccc/1-2",
            "https://codeshare.example/share?repo=r&file=f&lines=1",
        ] {
            assert!(
                matches!(parse_request(uri), Err(Error::InvalidLink { .. })),
                "{uri} should be an invalid activation URI"
            );
        }
    }

    #[test]
    fn snippet_links_cannot_be_opened() {
        assert!(matches!(
            parse_request("https://codeshare.example/s/k3Xy9"),
            Err(Error::InvalidLink { .. })
        ));
    }

    #[test]
    fn escaping_paths_are_rejected() {
        for file in ["../secrets.txt", "/etc/passwd", "src/../../x", ".", ""] {
            let request = OpenRequest {
                repo_url: "https://github.com/acme/widget".into(),
                file: file.into(),
                start_line: 1,
                end_line: 1,
            };
            assert!(
                matches!(
                    locate(&request, &candidates()),
                    Err(Error::InvalidLink { .. })
                ),
                "{file:?} should be rejected"
            );
        }
    }

    #[test]
    fn unmatched_repository_reports_examined_remotes() {
        let request = OpenRequest {
            repo_url: "git@github.com:someone/else.git".into(),
            file: "README.md".into(),
            start_line: 1,
            end_line: 1,
        };
        let err = locate(&request, &candidates()).expect_err("no match");
        let message = err.to_string();
        assert!(message.contains("https://github.com/someone/else"));
        assert!(message.contains("https://github.com/acme/other"));
        assert!(message.contains("https://github.com/acme/widget"));
    }
}
