//! axum binding of the route handler.
//!
//! `/api` and everything below it go to [`ProxyHandler::handle`] with the raw path
//! and query; other paths fall back to an optional static directory.

use crate::handler::{ProxyHandler, ProxyRequest};
use crate::response::ProxiedResponse;
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            // from_bytes lowercases; the composer's names are canonical-case literals.
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(n), Ok(v)) => {
                    headers.insert(n, v);
                }
                _ => tracing::warn!(header = name, "dropping invalid header"),
            }
        }
        response
    }
}

async fn api_route(State(handler): State<Arc<ProxyHandler>>, uri: Uri) -> Response {
    let request = ProxyRequest::new(uri.path(), uri.query());
    handler.handle(&request).await.into_response()
}

/// Router serving the proxy API, optionally with `static_dir` for every other path.
pub fn router(handler: Arc<ProxyHandler>, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api", get(api_route))
        .route("/api/", get(api_route))
        .route("/api/*path", get(api_route))
        .with_state(handler);
    match static_dir {
        Some(dir) => {
            api.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        None => api,
    }
}

/// Binds `listen` and serves `app` until Ctrl-C.
pub async fn serve(listen: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("binding {}", listen))?;
    let local = listener.local_addr()?;
    tracing::info!("hubproxy listening on http://{}", local);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("hubproxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("ctrl-c handler: {}", e);
        std::future::pending::<()>().await;
    }
}
