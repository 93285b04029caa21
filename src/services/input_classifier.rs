//! Address-bar input classification.
//!
//! Decides whether text typed into the address bar names a destination
//! (absolute URL, bare domain, IPv4 literal, local file path) or should be
//! sent to the search engine, and produces the normalized destination.

use std::path::Path;
use std::sync::LazyLock;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use regex::Regex;

use crate::types::destination::Destination;

/// Schemes passed through unchanged.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "ftp", "file"];

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").unwrap());
static DRIVE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]:[\\/]").unwrap());
static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}(:\d+)?(/.*)?$").unwrap());
static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z0-9-]+\.)+[a-z]{2,24}(/.*)?$").unwrap());

/// Characters `encodeURIComponent` leaves alone.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const FILE_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Map address-bar input to a normalized destination.
///
/// Returns `None` when the input is empty or is not recognizable as a
/// destination; the caller then builds a search URL from the original text.
pub fn classify(input: &str) -> Option<Destination> {
    let s = input.trim();
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return None;
    }

    // A drive letter also matches the scheme token, so paths go first.
    if DRIVE_PATH_RE.is_match(s) {
        return Some(Destination::new_unchecked(format!(
            "file:///{}",
            s.replace('\\', "/")
        )));
    }

    if let Some(caps) = SCHEME_RE.captures(s) {
        let scheme = caps[1].to_ascii_lowercase();
        return ALLOWED_SCHEMES
            .contains(&scheme.as_str())
            .then(|| Destination::new_unchecked(s.to_string()));
    }

    if s.starts_with("//") {
        return Some(Destination::new_unchecked(format!("https:{}", s)));
    }

    if s.starts_with('/') {
        return Some(Destination::new_unchecked(format!("file://{}", s)));
    }

    if looks_like_host(s) {
        return Some(Destination::new_unchecked(format!("https://{}", s)));
    }

    None
}

/// Whether the input should be navigated to rather than searched for.
///
/// Uses the same scheme policy as [`classify`]: the two never disagree.
pub fn is_likely_url(input: &str) -> bool {
    classify(input).is_some()
}

/// Dotted IPv4 literal or dotted domain name, each with an optional path.
fn looks_like_host(s: &str) -> bool {
    IPV4_RE.is_match(s) || DOMAIN_RE.is_match(s)
}

/// Build a search URL by substituting the encoded query for `%s`.
///
/// Templates without a placeholder get the query appended.
pub fn search_url(template: &str, query: &str) -> String {
    let encoded = utf8_percent_encode(query.trim(), QUERY_COMPONENT).to_string();
    if template.contains("%s") {
        template.replacen("%s", &encoded, 1)
    } else {
        format!("{}{}", template, encoded)
    }
}

/// Resolve address-bar input to the URL that should be loaded.
///
/// `None` only for blank input.
pub fn resolve(input: &str, search_template: &str) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }
    Some(match classify(input) {
        Some(dest) => dest.into_string(),
        None => search_url(search_template, input),
    })
}

/// `file://` URL for an absolute local path, e.g. one picked in a file dialog.
pub fn file_url_for_path(path: &Path) -> Destination {
    let raw = path.to_string_lossy().replace('\\', "/");
    let encoded = utf8_percent_encode(&raw, FILE_PATH).to_string();
    let url = if encoded.starts_with('/') {
        format!("file://{}", encoded)
    } else {
        format!("file:///{}", encoded)
    };
    Destination::new_unchecked(url)
}

/// Display title for a `file:` URL: the final path segment without its extension.
///
/// `None` for other schemes or when the URL ends in a slash.
pub fn file_title(url: &str) -> Option<String> {
    if !url.starts_with("file://") {
        return None;
    }
    let (_, segment) = url.rsplit_once('/')?;
    if segment.is_empty() {
        return None;
    }
    let stem = match segment.rfind('.') {
        Some(i) if i > 0 && i + 1 < segment.len() => &segment[..i],
        _ => segment,
    };
    Some(percent_decode_str(stem).decode_utf8_lossy().into_owned())
}
