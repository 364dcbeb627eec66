//! Assembly of outbound responses and their fixed header sets.

use crate::config::ResourcePolicy;
use crate::error::ProxyError;
use serde::Serialize;

/// Platform-neutral HTTP response produced for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl ProxiedResponse {
    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Builds responses from content classification; holds the deployment-wide settings.
#[derive(Debug, Clone, Copy)]
pub struct ResponseComposer {
    cache_max_age_secs: u64,
    resource_policy: ResourcePolicy,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(3600, ResourcePolicy::SameOrigin)
    }
}

impl ResponseComposer {
    pub fn new(cache_max_age_secs: u64, resource_policy: ResourcePolicy) -> Self {
        Self {
            cache_max_age_secs,
            resource_policy,
        }
    }

    fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age_secs)
    }

    /// Rewritten entry document: embeddable in any frame, cross-origin isolated.
    pub fn viewer(&self, html: String) -> ProxiedResponse {
        ProxiedResponse {
            status: 200,
            headers: vec![
                ("Content-Type", "text/html".to_string()),
                ("Cache-Control", self.cache_control()),
                ("X-Frame-Options", "ALLOWALL".to_string()),
                ("Cross-Origin-Embedder-Policy", "require-corp".to_string()),
                ("Cross-Origin-Opener-Policy", "same-origin".to_string()),
            ],
            body: html.into_bytes(),
        }
    }

    /// Any asset under the game's directory.
    pub fn asset(&self, body: Vec<u8>, mime: &str) -> ProxiedResponse {
        ProxiedResponse {
            status: 200,
            headers: vec![
                ("Content-Type", mime.to_string()),
                ("Cache-Control", self.cache_control()),
                ("Access-Control-Allow-Origin", "*".to_string()),
                (
                    "Cross-Origin-Resource-Policy",
                    self.resource_policy.header_value().to_string(),
                ),
            ],
            body,
        }
    }

    /// JSON `{"error": ...}` body with the error's status.
    pub fn error(&self, err: &ProxyError) -> ProxiedResponse {
        let message = err.client_message();
        let body = serde_json::to_vec(&ErrorBody { error: &message })
            .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec());
        ProxiedResponse {
            status: err.status(),
            headers: vec![("Content-Type", "application/json".to_string())],
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Resource;

    #[test]
    fn viewer_headers() {
        let r = ResponseComposer::default().viewer("<html></html>".to_string());
        assert_eq!(r.status, 200);
        assert_eq!(r.content_type(), Some("text/html"));
        assert_eq!(r.header("cache-control"), Some("public, max-age=3600"));
        assert_eq!(r.header("X-Frame-Options"), Some("ALLOWALL"));
        assert_eq!(r.header("Cross-Origin-Embedder-Policy"), Some("require-corp"));
        assert_eq!(r.header("Cross-Origin-Opener-Policy"), Some("same-origin"));
        assert_eq!(r.header("Access-Control-Allow-Origin"), None);
    }

    #[test]
    fn asset_headers_follow_policy() {
        let r = ResponseComposer::default().asset(vec![1, 2, 3], "application/wasm");
        assert_eq!(r.content_type(), Some("application/wasm"));
        assert_eq!(r.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(r.header("Cross-Origin-Resource-Policy"), Some("same-origin"));
        assert_eq!(r.header("X-Frame-Options"), None);
        assert_eq!(r.body, vec![1, 2, 3]);

        let r = ResponseComposer::new(60, ResourcePolicy::CrossOrigin).asset(Vec::new(), "text/css");
        assert_eq!(r.header("Cross-Origin-Resource-Policy"), Some("cross-origin"));
        assert_eq!(r.header("Cache-Control"), Some("public, max-age=60"));
    }

    #[test]
    fn error_body_is_json() {
        let r = ResponseComposer::default().error(&ProxyError::Upstream {
            status: 404,
            resource: Resource::Game,
        });
        assert_eq!(r.status, 404);
        assert_eq!(r.content_type(), Some("application/json"));
        let v: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
        assert_eq!(v["error"], "Failed to fetch game: 404");
        assert_eq!(r.header("Cache-Control"), None);
    }
}
