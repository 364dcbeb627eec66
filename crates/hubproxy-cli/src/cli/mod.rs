//! CLI for the hubproxy game content proxy.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use hubproxy_core::config;
use std::path::PathBuf;

use commands::{run_check_src, run_rewrite, run_serve};

/// Top-level CLI for hubproxy.
#[derive(Debug, Parser)]
#[command(name = "hubproxy")]
#[command(about = "Same-origin proxy that serves web games from remote static hosts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Document kind for offline rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RewriteKind {
    Html,
    Css,
    Js,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP proxy.
    Serve {
        /// Listen address (overrides the config file).
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
        /// Directory served for every non-/api path (the gallery).
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Rewrite a local HTML/CSS/JS file as the proxy would and print it.
    Rewrite {
        /// Kind of document.
        #[arg(long, value_enum)]
        kind: RewriteKind,
        /// Source URL of the game's entry document.
        #[arg(long)]
        src: String,
        /// Path of the file relative to the game directory (CSS/JS; defaults to the entry document name).
        #[arg(long, value_name = "ASSET")]
        path: Option<String>,
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Validate a source URL and print its base directory.
    CheckSrc {
        /// Candidate source URL.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Serve { listen, static_dir } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_serve(cfg, listen, static_dir).await?;
            }
            CliCommand::Rewrite {
                kind,
                src,
                path,
                file,
            } => {
                let cfg = config::load_or_init()?;
                run_rewrite(&cfg, kind, &src, path.as_deref(), file.as_deref())?;
            }
            CliCommand::CheckSrc { url } => run_check_src(&url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
