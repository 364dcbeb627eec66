//! Error taxonomy of the proxy pipeline and its mapping to HTTP statuses.

use crate::fetch::FetchError;
use std::fmt;

/// What the failed upstream fetch was for; only changes the client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The entry HTML document (viewer endpoint).
    Game,
    /// Any other file under the game's directory (asset endpoint).
    File,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Game => write!(f, "game"),
            Resource::File => write!(f, "file"),
        }
    }
}

/// Every way a proxied request can end without a successful body.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// A required input (`src` or asset path) was absent.
    #[error("{0}")]
    MissingParameter(&'static str),
    /// `src` did not parse as an absolute URL.
    #[error("invalid source URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: url::ParseError },
    /// `src` parsed but uses a scheme other than http/https.
    #[error("disallowed scheme {scheme:?} in source URL")]
    DisallowedScheme { scheme: String },
    /// The request path is not served by the proxy.
    #[error("no route for {0}")]
    NotFound(String),
    /// The origin answered with a non-2xx status.
    #[error("upstream returned HTTP {status} for {resource}")]
    Upstream { status: u16, resource: Resource },
    /// The origin could not be reached (DNS, connect, TLS, timeout).
    #[error("transport: {0}")]
    Transport(#[from] FetchError),
    /// Anything else that went wrong while fetching or transforming.
    #[error("internal: {0}")]
    Internal(String),
}

impl ProxyError {
    pub const MISSING_SRC: ProxyError = ProxyError::MissingParameter("Missing src parameter");
    pub const MISSING_PATH: ProxyError = ProxyError::MissingParameter("No path specified");

    /// HTTP status returned to the caller.
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::MissingParameter(_)
            | ProxyError::InvalidUrl { .. }
            | ProxyError::DisallowedScheme { .. } => 400,
            ProxyError::NotFound(_) => 404,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) | ProxyError::Internal(_) => 500,
        }
    }

    /// Message placed in the JSON error body. Never carries transport or internal detail.
    pub fn client_message(&self) -> String {
        match self {
            ProxyError::MissingParameter(msg) => (*msg).to_string(),
            ProxyError::InvalidUrl { .. } => "Invalid URL".to_string(),
            ProxyError::DisallowedScheme { .. } => "Invalid URL protocol".to_string(),
            ProxyError::NotFound(_) => "Not found".to_string(),
            ProxyError::Upstream { status, resource } => {
                format!("Failed to fetch {}: {}", resource, status)
            }
            ProxyError::Transport(_) | ProxyError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// True for failures that are the server's problem and must be logged in full.
    pub fn is_internal(&self) -> bool {
        matches!(self, ProxyError::Transport(_) | ProxyError::Internal(_))
    }
}
