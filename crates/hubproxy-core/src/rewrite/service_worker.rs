//! Neutralizes service worker registration in proxied documents.
//!
//! A worker registered from a proxied page would be scoped to `/api/` and fetch
//! without `src`, so registration is made to fail instead.

use regex::Regex;
use std::sync::LazyLock;

/// Marker attribute on the injected script; its presence means the document is already patched.
pub const MARKER: &str = "data-hubproxy-sw";

static HEAD_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head\b[^>]*>").expect("valid head open regex"));

static BODY_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body\b").expect("valid body open regex"));

fn script() -> String {
    format!(
        "<script {MARKER}>(function(){{if(!('serviceWorker' in navigator))return;\
navigator.serviceWorker.register=function(){{return Promise.reject(\
new Error('Service workers are disabled for proxied games'));}};}})();</script>"
    )
}

/// Inserts the blocking script right after `<head ...>`, else right before `<body`,
/// else at the start of the document.
pub fn inject_service_worker_block(html: &str) -> String {
    if html.contains(MARKER) {
        return html.to_string();
    }
    let script = script();
    let at = HEAD_OPEN_RE
        .find(html)
        .map(|m| m.end())
        .or_else(|| BODY_OPEN_RE.find(html).map(|m| m.start()))
        .unwrap_or(0);
    let mut out = String::with_capacity(html.len() + script.len());
    out.push_str(&html[..at]);
    out.push_str(&script);
    out.push_str(&html[at..]);
    out
}
