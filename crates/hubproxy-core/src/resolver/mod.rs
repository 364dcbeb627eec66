//! Maps asset references found inside proxied content onto proxy paths.
//!
//! A relative reference `r` seen in the resource at `current` becomes
//! `/api/<normalize(dir(current) + r)>?src=<encoded source>`, so the browser asks
//! the proxy for it again with the same `src`.

mod path;

pub use path::{directory_of, normalize_path};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Prefix of every path the proxy serves.
pub const PROXY_PREFIX: &str = "/api";

/// Characters escaped the way `encodeURIComponent` does.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reference prefixes that are left alone: absolute URLs, protocol-relative URLs,
/// inline data, in-page fragments and non-fetchable schemes.
const ABSOLUTE_PREFIXES: [&str; 8] = [
    "http",
    "//",
    "data:",
    "#",
    "mailto:",
    "javascript:",
    "blob:",
    "about:",
];

/// Percent-encodes `value` like `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// True when `reference` must not be rewritten because it does not point below
/// the game's directory.
pub fn is_absolute_reference(reference: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|prefix| {
        reference.len() >= prefix.len()
            && reference.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}

/// True when `reference` is a path this resolver already produced
/// (`/api/...` whose query starts with `src=`).
pub fn is_proxied_reference(reference: &str) -> bool {
    let Some(rest) = reference.strip_prefix(PROXY_PREFIX) else {
        return false;
    };
    if !rest.starts_with('/') {
        return false;
    }
    let query = match rest.split_once('?') {
        Some((_, q)) => q.split('#').next().unwrap_or(""),
        None => return false,
    };
    query.starts_with("src=")
}

/// Rewrites references against one source document.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    encoded_src: String,
}

impl UrlResolver {
    /// `source` is the SourceReference string, re-encoded into every target.
    pub fn new(source: &str) -> Self {
        Self {
            encoded_src: encode_component(source),
        }
    }

    /// Returns the proxy path for `reference` as seen from the resource at
    /// `current`, or `None` when the reference must be left untouched.
    ///
    /// `current` is an asset path relative to the base directory (e.g.
    /// `css/style.css`); a reference starting with `/` is rooted at the base
    /// directory. The proxy's `src` always comes first in the query, followed by
    /// the reference's own query (which may carry a `src` of its own); the
    /// fragment, if any, ends up last.
    pub fn resolve(&self, current: &str, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty()
            || is_absolute_reference(reference)
            || is_proxied_reference(reference)
        {
            return None;
        }

        let (rest, fragment) = match reference.split_once('#') {
            Some((r, f)) => (r, Some(f)),
            None => (reference, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((p, q)) => (p, Some(q).filter(|q| !q.is_empty())),
            None => (rest, None),
        };
        let path = path.strip_prefix("./").unwrap_or(path);

        let joined = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}{}", directory_of(current), path)
        };

        let mut out = String::from(PROXY_PREFIX);
        out.push_str(&normalize_path(&joined));
        out.push_str("?src=");
        out.push_str(&self.encoded_src);
        if let Some(q) = query {
            out.push('&');
            out.push_str(q);
        }
        if let Some(f) = fragment {
            out.push('#');
            out.push_str(f);
        }
        Some(out)
    }
}
