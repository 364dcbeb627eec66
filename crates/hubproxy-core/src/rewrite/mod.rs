//! Content-specific rewriting of proxied bodies.
//!
//! Best-effort textual substitution: HTML attributes, CSS `url()`/`@import` and JS
//! module specifiers are rewritten through the [`UrlResolver`]; everything else is
//! passed through untouched. Each pass runs once per response.

mod css;
mod html;
mod js;
mod service_worker;

pub use css::rewrite_css;
pub use html::rewrite_html;
pub use js::rewrite_js;
pub use service_worker::inject_service_worker_block;

use crate::guard::SourceReference;
use crate::mime::ContentClass;
use crate::resolver::UrlResolver;

/// Text passes bound to one source document.
#[derive(Debug, Clone)]
pub struct RewriteEngine {
    resolver: UrlResolver,
    document: String,
    neutralize_service_workers: bool,
}

impl RewriteEngine {
    pub fn new(source: &SourceReference, neutralize_service_workers: bool) -> Self {
        Self {
            resolver: UrlResolver::new(source.as_str()),
            document: source.document_name().to_string(),
            neutralize_service_workers,
        }
    }

    /// Viewer pass over the entry document.
    pub fn html(&self, input: &str) -> String {
        let rewritten = rewrite_html(input, &self.document, &self.resolver);
        if self.neutralize_service_workers {
            inject_service_worker_block(&rewritten)
        } else {
            rewritten
        }
    }

    /// Style sheet at asset path `current`.
    pub fn css(&self, input: &str, current: &str) -> String {
        rewrite_css(input, current, &self.resolver)
    }

    /// Script at asset path `current`.
    pub fn js(&self, input: &str, current: &str) -> String {
        rewrite_js(input, current, &self.resolver)
    }

    /// Asset pass: CSS and JS bodies are decoded (lossy UTF-8), rewritten and
    /// re-encoded; every other class is returned unchanged.
    pub fn asset_body(&self, class: &ContentClass, current: &str, body: Vec<u8>) -> Vec<u8> {
        if !class.needs_rewrite() {
            return body;
        }
        let text = String::from_utf8_lossy(&body);
        let rewritten = if class.is_css {
            self.css(&text, current)
        } else {
            self.js(&text, current)
        };
        rewritten.into_bytes()
    }
}
