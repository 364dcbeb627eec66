//! `href`/`src` attribute rewriting for the entry document.

use super::css::{quoted, rewrite_css};
use crate::resolver::UrlResolver;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static HTML_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?P<attr>href|src)(?P<eq>\s*=\s*)(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
        .expect("valid HTML attr regex")
});

/// Rewrites every relative `href="..."` / `src="..."` (either quote style, any tag)
/// and every inline `url()` in `input`.
///
/// `document` is the entry document's own path (e.g. `index.html`), so relative
/// references resolve against the base directory.
pub fn rewrite_html(input: &str, document: &str, resolver: &UrlResolver) -> String {
    let attrs = HTML_ATTR_RE.replace_all(input, |caps: &Captures| {
        let whole = &caps[0];
        let Some((quote, reference)) = quoted(caps) else {
            return whole.to_string();
        };
        match resolver.resolve(document, reference) {
            Some(target) => format!("{}{}{quote}{target}{quote}", &caps["attr"], &caps["eq"]),
            None => whole.to_string(),
        }
    });
    rewrite_css(&attrs, document, resolver)
}
