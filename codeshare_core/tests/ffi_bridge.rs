use codeshare_core::ffi::{
    decode_share_link, encode_share_link, encode_snippet_link, normalize_remote_url,
    resolve_link, select_remote, share_selection, CoreError,
};
use codeshare_core::{RemoteDescriptor, ShareLink, ShareRequest};
use tempfile::TempDir;

#[test]
fn normalizes_remote_urls() {
    assert_eq!(
        normalize_remote_url("git@github.com:acme/widgets.git".to_string()),
        "https://github.com/acme/widgets"
    );
}

#[test]
fn share_link_segments_decode_back_to_the_link() {
    let link = ShareLink {
        repo_url: "https://github.com/acme/widgets".to_string(),
        branch: "feature/links".to_string(),
        relative_path: "src/main.rs".to_string(),
        start_line: 7,
        end_line: 12,
    };
    let url = encode_share_link(link.clone(), "https://codeshare.example/".to_string());
    let segments: Vec<String> = url
        .trim_start_matches("https://codeshare.example/l/")
        .split('/')
        .map(str::to_string)
        .collect();

    assert_eq!(decode_share_link(segments).expect("decode"), link);
}

#[test]
fn decode_requires_four_segments() {
    let err = decode_share_link(vec!["a".to_string(), "b".to_string()])
        .expect_err("two segments are not a link");
    assert!(matches!(err, CoreError::Decode { .. }));
    assert_eq!(err.to_string(), "expected 4 link segments, got 2");
}

#[test]
fn snippet_links_use_the_short_path() {
    assert_eq!(
        encode_snippet_link("abc123".to_string(), "https://codeshare.example".to_string()),
        "https://codeshare.example/s/abc123"
    );
}

#[test]
fn select_remote_prefers_origin_and_rejects_empty_lists() {
    let remotes = vec![
        RemoteDescriptor::new("fork", "git@github.com:me/widgets.git"),
        RemoteDescriptor::new("origin", "git@github.com:acme/widgets.git"),
    ];
    assert_eq!(select_remote(remotes).expect("remote").name, "origin");

    let err = select_remote(Vec::new()).expect_err("no remotes");
    assert!(matches!(err, CoreError::NoRemotes { .. }));
}

#[test]
fn resolve_link_without_workspaces_lists_no_remotes() {
    let plain = TempDir::new().expect("tempdir");
    let err = resolve_link(
        "https://codeshare.example/open?repo=github.com/acme/widgets&file=a.rs&lines=3".to_string(),
        vec![plain.path().to_string_lossy().into_owned()],
    )
    .expect_err("nothing to match");

    match err {
        CoreError::NoMatchingWorkspace { message } => {
            assert!(message.contains("https://github.com/acme/widgets"));
            assert!(message.ends_with("remotes examined: none"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resolve_link_rejects_snippet_links() {
    let err = resolve_link(
        "https://codeshare.example/s/abc123".to_string(),
        Vec::new(),
    )
    .expect_err("snippets have no repository");
    assert!(matches!(err, CoreError::InvalidLink { .. }));
}

#[test]
fn share_selection_rejects_blank_text_before_touching_the_network() {
    let request = ShareRequest {
        path: "/nonexistent/file.rs".to_string(),
        start_line: 1,
        end_line: 1,
        text: "   \n".to_string(),
        language: "rust".to_string(),
    };
    let err = share_selection(request, Some("http://127.0.0.1:9".to_string()))
        .expect_err("blank selection");
    assert!(matches!(err, CoreError::EmptySelection { .. }));
}
