// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ginkgo-lens CLI entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Receiver;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use ginkgo_lens::cli::{Cli, Command};
use ginkgo_lens::config::{self, Config};
use ginkgo_lens::discovery;
use ginkgo_lens::env;
use ginkgo_lens::error::{Error, ExitCode};
use ginkgo_lens::cache::OutlineCache;
use ginkgo_lens::correlate::Event;
use ginkgo_lens::outline::{Document, GinkgoCli, Outline, Outliner};

mod cmd_outline;
mod cmd_results;
mod cmd_run;

fn init_logging() {
    let filter = EnvFilter::try_from_env(env::log_var()).unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ginkgo-lens: {}", e);
            match e.downcast_ref::<Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Outline(args)) => cmd_outline::run(&cli, args),
        Some(Command::Results(args)) => cmd_results::run(args),
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
    }
}

/// Resolve and load the config, returning it with the directory its
/// relative paths resolve against.
fn load_config(cli: &Cli) -> anyhow::Result<(Config, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    let config = match &path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(path)?
        }
        None => Config::default(),
    };
    let base = discovery::config_base(path.as_deref(), &cwd);
    Ok((config, base))
}

/// Outliner for the configured ginkgo binary. A known major version skips
/// detection.
fn outliner(config: &Config, major_version: Option<u32>) -> Outliner<GinkgoCli> {
    let ginkgo = GinkgoCli::new(&config.ginkgo_path).with_timeout(config.outline_timeout);
    match major_version {
        Some(version) => Outliner::pinned(ginkgo, version),
        None => Outliner::new(ginkgo),
    }
}

/// Read a test file into a document.
fn read_document(path: &Path) -> Result<Document, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document::new(path.display().to_string(), 0, text))
}

/// Outline `doc` through the cache.
///
/// Returns `None` for a file without Ginkgo imports: the cache answers with
/// an empty outline and the outliner announces no discovery.
fn outline_document(
    cache: &mut OutlineCache<GinkgoCli>,
    doc: &Document,
    discovered: &Receiver<Event>,
) -> Result<Option<Arc<Outline>>, Error> {
    let outline = cache.from_document(doc)?;
    if outline.is_empty() && discovered.is_empty() {
        return Ok(None);
    }
    Ok(Some(outline))
}
