//! Outbound fetch of origin resources.
//!
//! The route handler only depends on the [`Fetcher`] trait; [`CurlFetcher`] is the
//! production implementation. Fetchers are blocking; call them from
//! `spawn_blocking` when used from async code.

mod curl_fetcher;
mod error;

pub use curl_fetcher::CurlFetcher;
pub use error::FetchError;

/// Status and body of a completed upstream exchange (any status, including non-2xx).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a GET for an absolute URL.
///
/// Returns `Err` only when no HTTP response was obtained at all; non-2xx statuses
/// are returned as `Ok` so the caller can forward them.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}
