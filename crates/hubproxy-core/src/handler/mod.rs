//! Route handler: validate → fetch → classify → rewrite → compose.
//!
//! Every failure is turned into a complete JSON error response here; nothing
//! escapes to the server layer.

mod request;

pub use request::{Endpoint, ProxyRequest, VIEWER_SEGMENT};

use crate::config::HubProxyConfig;
use crate::error::{ProxyError, Resource};
use crate::fetch::{CurlFetcher, FetchResponse, Fetcher};
use crate::guard::{self, SourceReference};
use crate::mime;
use crate::resolver::normalize_path;
use crate::response::{ProxiedResponse, ResponseComposer};
use crate::rewrite::RewriteEngine;
use std::sync::Arc;

/// Settings that shape responses, independent of how fetching is done.
#[derive(Debug, Clone, Copy)]
pub struct HandlerSettings {
    pub composer: ResponseComposer,
    pub neutralize_service_workers: bool,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            composer: ResponseComposer::default(),
            neutralize_service_workers: true,
        }
    }
}

impl HandlerSettings {
    pub fn from_config(cfg: &HubProxyConfig) -> Self {
        Self {
            composer: ResponseComposer::new(cfg.cache_max_age_secs, cfg.resource_policy),
            neutralize_service_workers: cfg.neutralize_service_workers,
        }
    }
}

/// Stateless request handler, shared across concurrent requests.
pub struct ProxyHandler {
    fetcher: Arc<dyn Fetcher>,
    settings: HandlerSettings,
}

impl ProxyHandler {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: HandlerSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Handler backed by a [`CurlFetcher`] configured from `cfg`.
    pub fn from_config(cfg: &HubProxyConfig) -> Self {
        let fetcher = CurlFetcher::new(cfg.user_agent.clone(), cfg.fetch_or_default());
        Self::new(Arc::new(fetcher), HandlerSettings::from_config(cfg))
    }

    /// Runs the pipeline for `request` and always returns a complete response.
    pub async fn handle(&self, request: &ProxyRequest) -> ProxiedResponse {
        let endpoint = request.endpoint();
        let result = match &endpoint {
            Endpoint::Viewer => self.viewer(request).await,
            Endpoint::Asset(path) => self.asset(request, path).await,
            Endpoint::NotFound => Err(ProxyError::NotFound(request.path.clone())),
        };
        match result {
            Ok(response) => {
                tracing::info!(path = %request.path, status = response.status, "proxied");
                response
            }
            Err(err) => {
                if let ProxyError::Transport(fetch_err) = &err {
                    tracing::error!(path = %request.path, kind = fetch_err.kind(), error = %err, "upstream unreachable");
                } else if err.is_internal() {
                    tracing::error!(path = %request.path, error = %err, "proxy request failed");
                } else {
                    tracing::warn!(path = %request.path, status = err.status(), error = %err, "proxy request rejected");
                }
                self.settings.composer.error(&err)
            }
        }
    }

    fn source(&self, request: &ProxyRequest) -> Result<SourceReference, ProxyError> {
        let raw = request.source_param().ok_or(ProxyError::MISSING_SRC)?;
        guard::validate_source(&raw)
    }

    async fn viewer(&self, request: &ProxyRequest) -> Result<ProxiedResponse, ProxyError> {
        let source = self.source(request)?;
        tracing::debug!(src = source.as_str(), "viewer");

        // The parsed form is percent-encoded; the raw string only feeds `src=`.
        let fetched = self.fetch(source.url().as_str().to_string()).await?;
        if !fetched.is_success() {
            return Err(ProxyError::Upstream {
                status: fetched.status,
                resource: Resource::Game,
            });
        }

        let html = String::from_utf8_lossy(&fetched.body);
        let engine = RewriteEngine::new(&source, self.settings.neutralize_service_workers);
        Ok(self.settings.composer.viewer(engine.html(&html)))
    }

    async fn asset(
        &self,
        request: &ProxyRequest,
        raw_path: &str,
    ) -> Result<ProxiedResponse, ProxyError> {
        let source = self.source(request)?;

        // Normalized so that `..` can never climb above the base directory.
        let normalized = normalize_path(raw_path);
        let relative = normalized.trim_start_matches('/');
        if relative.is_empty() {
            return Err(ProxyError::MISSING_PATH);
        }

        let file_url = source.asset_url(relative, request.forwarded_query().as_deref());
        tracing::debug!(src = source.as_str(), file = %file_url, "asset");

        let fetched = self.fetch(file_url).await?;
        if !fetched.is_success() {
            return Err(ProxyError::Upstream {
                status: fetched.status,
                resource: Resource::File,
            });
        }

        let class = mime::classify(relative);
        let body = if class.needs_rewrite() {
            let engine = RewriteEngine::new(&source, self.settings.neutralize_service_workers);
            engine.asset_body(&class, relative, fetched.body)
        } else {
            fetched.body
        };
        Ok(self.settings.composer.asset(body, class.mime))
    }

    /// Runs the blocking fetcher on tokio's blocking pool.
    async fn fetch(&self, url: String) -> Result<FetchResponse, ProxyError> {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::task::spawn_blocking(move || fetcher.fetch(&url))
            .await
            .map_err(|e| ProxyError::Internal(format!("fetch task: {}", e)))?
            .map_err(ProxyError::Transport)
    }
}
