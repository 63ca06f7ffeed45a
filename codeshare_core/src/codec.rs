//! Encoding and decoding of sharable link URLs.
//!
//! Git-aware links look like
//! `https://<host>/l/<b64url(repo)>/<b64url(branch)>/<b64url(path)>/<start>-<end>`
//! and snippet links like `https://<host>/s/<id>`.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use thiserror::Error;
use url::Url;

use crate::api::{Link, ShareLink, SnippetLink};

const SHARE_PREFIX: &str = "l";
const SNIPPET_PREFIX: &str = "s";

/// URL-safe alphabet that accepts input with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors produced while decoding a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A segment is not URL-safe base64.
    #[error("{field} segment is not valid base64url")]
    InvalidBase64 {
        /// Which payload field the segment carries.
        field: &'static str,
    },
    /// A segment decodes to bytes that are not UTF-8.
    #[error("{field} segment does not decode to UTF-8 text")]
    InvalidUtf8 {
        /// Which payload field the segment carries.
        field: &'static str,
    },
    /// The range segment is not `N` or `N-M`.
    #[error("line range {value:?} is not of the form N or N-M")]
    MalformedLineRange {
        /// Offending segment.
        value: String,
    },
    /// A line number is zero or too large.
    #[error("line number {value} in {range:?} is out of range")]
    LineOutOfRange {
        /// Offending line number text.
        value: String,
        /// Full range segment.
        range: String,
    },
    /// The range ends before it starts.
    #[error("line range {range:?} ends before it starts")]
    ReversedLineRange {
        /// Full range segment.
        range: String,
    },
    /// The input is not a link URL at all.
    #[error("{value:?} is not a link URL")]
    NotALink {
        /// Offending input.
        value: String,
    },
    /// The URL path is not `/l/...` with four segments or `/s/<id>`.
    #[error("unrecognized link path {path:?}")]
    UnknownPath {
        /// Path of the URL.
        path: String,
    },
}

/// Encode a Git-aware share link under `base_url`.
#[must_use]
pub fn encode_share_link(link: &ShareLink, base_url: &str) -> String {
    format!(
        "{}/{SHARE_PREFIX}/{}/{}/{}/{}-{}",
        base_url.trim_end_matches('/'),
        URL_SAFE_NO_PAD.encode(&link.repo_url),
        URL_SAFE_NO_PAD.encode(&link.branch),
        URL_SAFE_NO_PAD.encode(&link.relative_path),
        link.start_line,
        link.end_line,
    )
}

/// Encode a snippet link under `base_url`. The id is used verbatim.
#[must_use]
pub fn encode_snippet_link(id: &str, base_url: &str) -> String {
    format!("{}/{SNIPPET_PREFIX}/{id}", base_url.trim_end_matches('/'))
}

/// Decode the four trailing segments of a share link.
///
/// # Errors
///
/// Returns a [`DecodeError`] when a segment is not base64url text or the line
/// range is malformed, zero, or reversed.
pub fn decode_share_link(segments: [&str; 4]) -> Result<ShareLink, DecodeError> {
    let [repo, branch, path, range] = segments;
    let (start_line, end_line) = parse_line_range(range)?;

    Ok(ShareLink {
        repo_url: decode_segment("repository", repo)?,
        branch: decode_segment("branch", branch)?,
        relative_path: decode_segment("path", path)?,
        start_line,
        end_line,
    })
}

/// Parse `N` or `N-M` into an inclusive, 1-indexed line range.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the text is not of that form, a number is
/// zero or overflows, or `N > M`.
pub fn parse_line_range(range: &str) -> Result<(u32, u32), DecodeError> {
    let (start, end) = range.split_once('-').unwrap_or((range, range));
    let start = parse_line(start, range)?;
    let end = parse_line(end, range)?;

    if start > end {
        return Err(DecodeError::ReversedLineRange {
            range: range.to_string(),
        });
    }
    Ok((start, end))
}

/// Decode a full link URL into either link kind.
///
/// Extra leading path segments are allowed so links under a sub-path of the
/// host still decode.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the input is not a URL, its path is not a
/// link path, or a share link's segments fail to decode.
pub fn decode_link(link: &str) -> Result<Link, DecodeError> {
    let url = Url::parse(link.trim()).map_err(|_| DecodeError::NotALink {
        value: link.to_string(),
    })?;
    let unknown = || DecodeError::UnknownPath {
        path: url.path().to_string(),
    };

    // Empty segments are kept: an empty branch or path encodes to `//`.
    let mut segments: Vec<&str> = url.path_segments().ok_or_else(unknown)?.collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }

    match segments.as_slice() {
        [.., prefix, repo, branch, path, range] if *prefix == SHARE_PREFIX => {
            decode_share_link([*repo, *branch, *path, *range]).map(Link::Share)
        }
        [.., prefix, id] if *prefix == SNIPPET_PREFIX && !id.is_empty() => {
            Ok(Link::Snippet(SnippetLink::new(*id)))
        }
        _ => Err(unknown()),
    }
}

fn decode_segment(field: &'static str, segment: &str) -> Result<String, DecodeError> {
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .map_err(|_| DecodeError::InvalidBase64 { field })?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field })
}

fn parse_line(value: &str, range: &str) -> Result<u32, DecodeError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::MalformedLineRange {
            value: range.to_string(),
        });
    }

    match value.parse::<u32>() {
        Ok(line) if line >= 1 => Ok(line),
        _ => Err(DecodeError::LineOutOfRange {
            value: value.to_string(),
            range: range.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://codeshare.example";

    fn widget_link() -> ShareLink {
        ShareLink {
            repo_url: "https://github.com/acme/widget".into(),
            branch: "main".into(),
            relative_path: "src/a.ts".into(),
            start_line: 10,
            end_line: 12,
        }
    }

    fn trailing_segments(url: &str) -> [String; 4] {
        let parts: Vec<String> = url.rsplitn(5, '/').map(str::to_owned).collect();
        [
            parts[3].clone(),
            parts[2].clone(),
            parts[1].clone(),
            parts[0].clone(),
        ]
    }

    #[test]
    fn encodes_known_example() {
        assert_eq!(
            encode_share_link(&widget_link(), BASE),
            "https://codeshare.example/l/aHR0cHM6Ly9naXRodWIuY29tL2FjbWUvd2lkZ2V0/bWFpbg/c3JjL2EudHM/10-12"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        assert_eq!(
            encode_share_link(&widget_link(), "https://codeshare.example/"),
            encode_share_link(&widget_link(), BASE)
        );
        assert_eq!(
            encode_snippet_link("abc", "https://codeshare.example/"),
            "https://codeshare.example/s/abc"
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let links = [
            widget_link(),
            ShareLink {
                repo_url: "https://git.example.com/team/ünïcode-repo".into(),
                branch: "feature/äöü?&#".into(),
                relative_path: "docs/with space/naïve.md".into(),
                start_line: 1,
                end_line: 1,
            },
            ShareLink {
                branch: "release/2024.10".into(),
                start_line: 7,
                end_line: 7,
                ..widget_link()
            },
        ];

        for link in links {
            let encoded = encode_share_link(&link, BASE);
            let segments = trailing_segments(&encoded);
            let decoded = decode_share_link([
                segments[0].as_str(),
                segments[1].as_str(),
                segments[2].as_str(),
                segments[3].as_str(),
            ])
            .expect("decode share link");
            assert_eq!(decoded, link);
        }
    }

    #[test]
    fn padded_segments_are_accepted() {
        let link = decode_share_link([
            "aHR0cHM6Ly9naXRodWIuY29tL2FjbWUvd2lkZ2V0",
            "bWFpbg==",
            "c3JjL2EudHM=",
            "3",
        ])
        .expect("decode padded");
        assert_eq!(link.branch, "main");
        assert_eq!(link.relative_path, "src/a.ts");
    }

    #[test]
    fn single_line_range_expands() {
        assert_eq!(parse_line_range("9"), Ok((9, 9)));
        assert_eq!(parse_line_range("9-9"), Ok((9, 9)));
        assert_eq!(parse_line_range("3-40"), Ok((3, 40)));
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        assert!(matches!(
            parse_line_range("0-5"),
            Err(DecodeError::LineOutOfRange { .. })
        ));
        assert!(matches!(
            parse_line_range("5-0"),
            Err(DecodeError::LineOutOfRange { .. })
        ));
        assert!(matches!(
            parse_line_range("12-10"),
            Err(DecodeError::ReversedLineRange { .. })
        ));
        assert!(matches!(
            parse_line_range("99999999999"),
            Err(DecodeError::LineOutOfRange { .. })
        ));
        for bad in ["", "-", "1-", "-3", "a-b", "1-2-3", "+1", " 1", "1 - 2"] {
            assert!(
                matches!(
                    parse_line_range(bad),
                    Err(DecodeError::MalformedLineRange { .. })
                ),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn zero_start_fails_share_decode() {
        let result = decode_share_link([
            "aHR0cHM6Ly9naXRodWIuY29tL2FjbWUvd2lkZ2V0",
            "bWFpbg",
            "c3JjL2EudHM",
            "0-5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_base64_names_the_field() {
        assert_eq!(
            decode_share_link([
                "aHR0cHM6Ly9naXRodWIuY29tL2FjbWUvd2lkZ2V0",
                "not*base64",
                "c3JjL2EudHM",
                "1",
            ]),
            Err(DecodeError::InvalidBase64 { field: "branch" })
        );
        // Standard-alphabet characters are not part of base64url.
        assert!(matches!(
            decode_share_link(["a+b/", "bWFpbg", "c3JjL2EudHM", "1"]),
            Err(DecodeError::InvalidBase64 { field: "repository" })
        ));
        // 0xFF is not valid UTF-8.
        assert_eq!(
            decode_share_link(["_w", "bWFpbg", "c3JjL2EudHM", "1"]),
            Err(DecodeError::InvalidUtf8 { field: "repository" })
        );
    }

    #[test]
    fn decode_link_recognizes_both_kinds() {
        let share = decode_link(&encode_share_link(&widget_link(), BASE)).expect("share link");
        assert_eq!(share, Link::Share(widget_link()));

        let snippet = decode_link(&encode_snippet_link("k3Xy9", BASE)).expect("snippet link");
        assert_eq!(snippet, Link::Snippet(SnippetLink::new("k3Xy9")));

        let nested = decode_link("https://tools.example/codeshare/s/abc/").expect("nested");
        assert_eq!(nested, Link::Snippet(SnippetLink::new("abc")));
    }

    #[test]
    fn empty_branch_and_path_survive_decode_link() {
        let link = ShareLink {
            branch: String::new(),
            relative_path: String::new(),
            start_line: 1,
            end_line: 1,
            ..widget_link()
        };
        let url = encode_share_link(&link, BASE);
        assert!(url.ends_with("///1-1"), "{url}");
        assert_eq!(decode_link(&url).expect("share link"), Link::Share(link));
    }

    #[test]
    fn decode_link_rejects_other_urls() {
        assert!(matches!(
            decode_link("https://codeshare.example/about"),
            Err(DecodeError::UnknownPath { .. })
        ));
        assert!(matches!(
            decode_link("https://codeshare.example/l/a/b/c"),
            Err(DecodeError::UnknownPath { .. })
        ));
        assert!(matches!(
            decode_link("https://codeshare.example/s//"),
            Err(DecodeError::UnknownPath { .. })
        ));
        assert!(matches!(
            decode_link("codeshare link"),
            Err(DecodeError::NotALink { .. })
        ));
    }
}
