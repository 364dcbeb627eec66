//! Transport-level fetch failures.

/// No HTTP response was obtained from the origin.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The origin answered with something that is not a usable HTTP status.
    #[error("invalid HTTP status {0}")]
    InvalidStatus(u32),
}

impl FetchError {
    /// Short classification for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Curl(e) if e.is_operation_timedout() => "timeout",
            FetchError::Curl(e) if e.is_couldnt_resolve_host() => "dns",
            FetchError::Curl(e) if e.is_couldnt_connect() => "connect",
            FetchError::Curl(e) if e.is_ssl_connect_error() || e.is_peer_failed_verification() => {
                "tls"
            }
            FetchError::Curl(e) if e.is_too_many_redirects() => "redirects",
            FetchError::Curl(_) => "transport",
            FetchError::InvalidStatus(_) => "status",
        }
    }
}
