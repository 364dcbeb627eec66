//! libcurl-backed [`Fetcher`].

use super::{FetchError, FetchResponse, Fetcher};
use crate::config::FetchConfig;

/// Performs one GET per call on a fresh curl easy handle.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    settings: FetchConfig,
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>, settings: FetchConfig) -> Self {
        Self {
            user_agent: user_agent.into(),
            settings,
        }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.settings.max_redirections)?;
        // Empty string = accept every encoding libcurl can decode; body arrives decoded.
        easy.accept_encoding("")?;
        if let Some(t) = self.settings.connect_timeout() {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.settings.timeout() {
            easy.timeout(t)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        let status = u16::try_from(code)
            .ok()
            .filter(|s| (100..=999).contains(s))
            .ok_or(FetchError::InvalidStatus(code))?;
        tracing::debug!(url, status, bytes = body.len(), "upstream fetch complete");

        Ok(FetchResponse { status, body })
    }
}
