//! SSRF guard for the user-supplied `src` URL.
//!
//! Every outbound fetch is derived from a [`SourceReference`], and the only way to
//! build one is [`validate_source`], so nothing reaches the fetcher unless it is an
//! absolute `http`/`https` URL.

mod source;

pub use source::SourceReference;

use crate::error::ProxyError;

/// Schemes the proxy is willing to fetch.
pub const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Validates `candidate` as an absolute http(s) URL.
///
/// Fails with `InvalidUrl` when it does not parse (relative references included) and
/// with `DisallowedScheme` for `file:`, `ftp:`, `gopher:` and every other scheme.
pub fn validate_source(candidate: &str) -> Result<SourceReference, ProxyError> {
    let url = url::Url::parse(candidate).map_err(|reason| ProxyError::InvalidUrl {
        url: candidate.to_string(),
        reason,
    })?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(ProxyError::DisallowedScheme {
            scheme: url.scheme().to_string(),
        });
    }
    Ok(SourceReference::new(candidate.to_string(), url))
}
