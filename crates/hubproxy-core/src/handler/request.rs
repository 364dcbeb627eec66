//! Platform-neutral request and endpoint routing.

use crate::resolver::PROXY_PREFIX;

/// Path segment that selects the viewer endpoint.
pub const VIEWER_SEGMENT: &str = "viewer";

/// The parts of an incoming request the proxy looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    /// Raw (still percent-encoded) request path, e.g. `/api/css/style.css`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
}

/// Which pipeline a request goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Viewer,
    /// Raw asset path after `/api/` (possibly empty).
    Asset(String),
    /// Not below `/api`.
    NotFound,
}

impl ProxyRequest {
    pub fn new(path: impl Into<String>, query: Option<&str>) -> Self {
        Self {
            path: path.into(),
            query: query.map(str::to_string),
        }
    }

    /// Parses a request target such as `/api/viewer?src=...`.
    pub fn from_target(target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => Self::new(path, Some(query)),
            None => Self::new(target, None),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        let Some(rest) = self.path.strip_prefix(PROXY_PREFIX) else {
            return Endpoint::NotFound;
        };
        let rest = match rest.strip_prefix('/') {
            Some(r) => r,
            None if rest.is_empty() => "",
            None => return Endpoint::NotFound,
        };
        if rest == VIEWER_SEGMENT {
            Endpoint::Viewer
        } else {
            Endpoint::Asset(rest.to_string())
        }
    }

    /// Decoded value of the first `src` query parameter; that one belongs to the proxy.
    pub fn source_param(&self) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "src")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }

    /// Every query pair except the proxy's own (first) `src`, raw and in original
    /// order, for forwarding upstream. Later `src` pairs belong to the game.
    pub fn forwarded_query(&self) -> Option<String> {
        let query = self.query.as_deref()?;
        let mut proxy_src_seen = false;
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| {
                let key = pair.split('=').next().unwrap_or("");
                if key == "src" && !proxy_src_seen {
                    proxy_src_seen = true;
                    return false;
                }
                true
            })
            .collect();
        if kept.is_empty() {
            None
        } else {
            Some(kept.join("&"))
        }
    }
}
