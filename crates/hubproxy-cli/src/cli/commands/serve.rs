//! `hubproxy serve` – run the HTTP proxy until Ctrl-C.

use anyhow::Result;
use hubproxy_core::config::HubProxyConfig;
use hubproxy_core::{server, ProxyHandler};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run_serve(
    mut cfg: HubProxyConfig,
    listen: Option<String>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(listen) = listen {
        cfg.listen = listen;
    }
    if static_dir.is_some() {
        cfg.static_dir = static_dir;
    }
    if let Some(dir) = &cfg.static_dir {
        if !dir.is_dir() {
            anyhow::bail!("static dir {} is not a directory", dir.display());
        }
        tracing::info!("serving static files from {}", dir.display());
    }

    let handler = Arc::new(ProxyHandler::from_config(&cfg));
    let app = server::router(handler, cfg.static_dir.as_deref());
    server::serve(&cfg.listen, app).await
}
