//! Canonical form for version-control remote URLs.
//!
//! Remotes show up as SCP-style SSH (`git@host:owner/repo.git`), `ssh://`
//! URLs or HTTPS URLs with and without a `.git` suffix. [`normalize`] maps
//! all of those onto `scheme://host/path` so they can be compared as strings.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

const GIT_TRANSPORT_SCHEMES: [&str; 4] = ["ssh://", "git+ssh://", "ssh+git://", "git://"];

fn scp_remote() -> Option<&'static Regex> {
    static SCP: OnceLock<Option<Regex>> = OnceLock::new();
    // `user@host:path`, where path does not start with `//` (that would be a URL).
    SCP.get_or_init(|| Regex::new(r"^[A-Za-z0-9._~-]+@([A-Za-z0-9.-]+):/?([^/].*)$").ok())
        .as_ref()
}

/// Normalize a remote URL for comparison.
///
/// Never fails: input that does not parse as a URL is returned trimmed and
/// with its `.git` suffix removed.
#[must_use]
pub fn normalize(raw: &str) -> String {
    // Suffixes go first so the fallback output parses the same way again.
    let raw = trim_repository_suffix(raw.trim());

    let mut candidate = scp_remote().and_then(|re| re.captures(raw)).map_or_else(
        || raw.to_string(),
        |caps| format!("https://{}/{}", &caps[1], &caps[2]),
    );

    if let Some(rest) = GIT_TRANSPORT_SCHEMES
        .iter()
        .find_map(|scheme| strip_prefix_ignore_case(&candidate, scheme))
    {
        candidate = format!("https://{rest}");
    }

    if !has_http_scheme(&candidate) {
        candidate.insert_str(0, "https://");
    }

    match Url::parse(&candidate) {
        Ok(url) => match url.host_str() {
            Some(host) => format!(
                "{}://{}{}",
                url.scheme(),
                host,
                trim_repository_suffix(url.path())
            ),
            None => raw.to_string(),
        },
        Err(err) => {
            log::debug!("remote url {raw:?} does not parse ({err}); comparing it verbatim");
            raw.to_string()
        }
    }
}

fn has_http_scheme(value: &str) -> bool {
    strip_prefix_ignore_case(value, "https://").is_some()
        || strip_prefix_ignore_case(value, "http://").is_some()
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

/// Drop any run of trailing `/` and `.git` suffixes.
fn trim_repository_suffix(path: &str) -> &str {
    let mut trimmed = path;
    loop {
        let next = trimmed.trim_end_matches('/').trim_end_matches(".git");
        if next.len() == trimmed.len() {
            return trimmed;
        }
        trimmed = next;
    }
}
