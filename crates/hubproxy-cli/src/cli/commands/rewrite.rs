//! `hubproxy rewrite` – offline rewrite of one document to stdout.

use crate::cli::RewriteKind;
use anyhow::{Context, Result};
use hubproxy_core::config::HubProxyConfig;
use hubproxy_core::guard;
use hubproxy_core::rewrite::RewriteEngine;
use std::io::{Read, Write};
use std::path::Path;

pub fn run_rewrite(
    cfg: &HubProxyConfig,
    kind: RewriteKind,
    src: &str,
    path: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    let source = guard::validate_source(src)?;
    let input = read_input(file)?;
    let engine = RewriteEngine::new(&source, cfg.neutralize_service_workers);
    let current = path.unwrap_or_else(|| source.document_name());

    let output = match kind {
        RewriteKind::Html => engine.html(&input),
        RewriteKind::Css => engine.css(&input, current),
        RewriteKind::Js => engine.js(&input, current),
    };
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("writing to stdout")?;
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(p) => {
            let bytes = std::fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("reading stdin")?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
