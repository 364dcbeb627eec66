//! Tests for rewrite.

use super::parse;
use crate::cli::{Cli, CliCommand, RewriteKind};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_rewrite_html_from_stdin() {
    match parse(&[
        "hubproxy",
        "rewrite",
        "--kind",
        "html",
        "--src",
        "https://example.com/g/index.html",
    ]) {
        CliCommand::Rewrite {
            kind,
            src,
            path,
            file,
        } => {
            assert_eq!(kind, RewriteKind::Html);
            assert_eq!(src, "https://example.com/g/index.html");
            assert!(path.is_none());
            assert!(file.is_none());
        }
        _ => panic!("expected Rewrite"),
    }
}

#[test]
fn cli_parse_rewrite_css_with_path_and_file() {
    match parse(&[
        "hubproxy",
        "rewrite",
        "--kind",
        "css",
        "--src",
        "https://example.com/g/index.html",
        "--path",
        "css/style.css",
        "style.css",
    ]) {
        CliCommand::Rewrite {
            kind, path, file, ..
        } => {
            assert_eq!(kind, RewriteKind::Css);
            assert_eq!(path.as_deref(), Some("css/style.css"));
            assert_eq!(file, Some(PathBuf::from("style.css")));
        }
        _ => panic!("expected Rewrite"),
    }
}

#[test]
fn cli_rewrite_rejects_unknown_kind() {
    let r = Cli::try_parse_from([
        "hubproxy",
        "rewrite",
        "--kind",
        "wasm",
        "--src",
        "https://example.com/",
    ]);
    assert!(r.is_err());
}

#[test]
fn cli_rewrite_requires_src() {
    assert!(Cli::try_parse_from(["hubproxy", "rewrite", "--kind", "js"]).is_err());
}
