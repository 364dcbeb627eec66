//! `hubproxy check-src` – run the source guard on a URL.

use anyhow::Result;
use hubproxy_core::guard;

pub fn run_check_src(url: &str) -> Result<()> {
    let source = guard::validate_source(url)?;
    println!("base: {}", source.base_directory());
    println!("document: {}", source.document_name());
    Ok(())
}
