//! Validated source URL and the paths derived from it.

use url::Url;

/// Absolute http(s) URL of a game's entry document, as supplied by the caller.
///
/// Constructed only by [`super::validate_source`].
#[derive(Debug, Clone)]
pub struct SourceReference {
    raw: String,
    url: Url,
}

impl SourceReference {
    pub(super) fn new(raw: String, url: Url) -> Self {
        Self { raw, url }
    }

    /// The source exactly as supplied; this is what gets re-encoded into `src=`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Directory of the entry document: the URL without query, fragment and final
    /// path segment. Always ends with `/`.
    pub fn base_directory(&self) -> String {
        let mut dir = self.url.clone();
        dir.set_query(None);
        dir.set_fragment(None);
        let s = dir.as_str();
        // http(s) URLs always have a path starting with '/', so this never hits the authority.
        match s.rfind('/') {
            Some(idx) => s[..=idx].to_string(),
            None => format!("{}/", s),
        }
    }

    /// Last path segment of the entry document (e.g. `index.html`), empty for a directory URL.
    pub fn document_name(&self) -> &str {
        let path = self.url.path();
        path.rsplit('/').next().unwrap_or("")
    }

    /// Absolute URL of an asset below [`Self::base_directory`].
    ///
    /// `relative` must already be normalized (no leading `/`, no `..`); `query` is
    /// appended verbatim.
    pub fn asset_url(&self, relative: &str, query: Option<&str>) -> String {
        let mut out = self.base_directory();
        out.push_str(relative);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            out.push('?');
            out.push_str(q);
        }
        out
    }
}
