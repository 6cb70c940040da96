// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::path::{Path, PathBuf};

use ginkgo_lens::cache::OutlineCache;
use ginkgo_lens::cli::{Cli, OutputFormat, RunArgs};
use ginkgo_lens::color::resolve_color;
use ginkgo_lens::correlate::Correlator;
use ginkgo_lens::error::{Error, ExitCode};
use ginkgo_lens::outline::OutlineError;
use ginkgo_lens::output::FormatOptions;
use ginkgo_lens::output::json::{JsonFormatter, RunOutput, outline_output, results_output};
use ginkgo_lens::output::text::TextFormatter;
use ginkgo_lens::report::ReportFormat;
use ginkgo_lens::run::{RunRequest, execute};

use crate::{load_config, outline_document, outliner, read_document};

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let (mut config, base) = load_config(cli)?;
    if let Some(path) = &args.ginkgo_path {
        config.ginkgo_path = path.clone();
    }

    let doc = read_document(&args.file)?;
    let (events, discovered) = crossbeam_channel::unbounded();
    let outliner = outliner(&config, args.major_version).with_events(events);
    let major_version = outliner.major_version();
    let mut cache = OutlineCache::new(outliner).with_ttl(config.cache_ttl);

    if outline_document(&mut cache, &doc, &discovered)?.is_none() {
        return Err(Error::Argument(format!(
            "{}: {}",
            doc.uri,
            OutlineError::NoGinkgoImports
        ))
        .into());
    }

    let mut correlator = Correlator::new();
    correlator.drain(&discovered);

    let cwd = run_dir(args.cwd.as_deref(), &args.file, &std::env::current_dir()?);
    let mut request = RunRequest::new(
        &config.ginkgo_path,
        &cwd,
        ReportFormat::for_major_version(major_version),
    )
    .with_env(config.effective_env(&base)?);

    match &args.focus {
        Some(key) => {
            if !correlator.prepare_to_run_key(key) {
                return Err(Error::Argument(format!("no node with key {:?} in {}", key, doc.uri)).into());
            }
            request = request.with_focus(key.as_str());
        }
        None => match correlator.root_node() {
            Some((id, _)) => correlator.prepare_to_run(id),
            None => tracing::debug!("no root node in {}, running everything", doc.uri),
        },
    }
    if args.cover {
        request = request.with_coverage();
    }

    let timeout = args.timeout.unwrap_or(config.report_timeout);
    let outcome = execute(&request, timeout, config.report_poll_interval)?;
    if !outcome.report_found && !outcome.stderr.is_empty() {
        eprint!("{}", outcome.stderr);
    }

    let summary = correlator.on_results(outcome.results.clone());
    tracing::info!(
        "correlated results: {} attached, {} dropped, {} cleared",
        summary.attached,
        summary.dropped,
        summary.cleared
    );

    match args.output {
        OutputFormat::Text => {
            let options = if args.keys {
                FormatOptions::default().with_keys()
            } else {
                FormatOptions::default()
            };
            let mut formatter = TextFormatter::stdout(resolve_color(), options);
            formatter.write_outline(&correlator)?;
            formatter.write_summary(&outcome.results)?;
        }
        OutputFormat::Json => {
            let output = RunOutput {
                results: results_output(&outcome.results, Some(summary)),
                exit_code: outcome.exit_code,
                report_found: outcome.report_found,
                outline: outline_output(&correlator, doc.uri.as_str(), major_version, false),
            };
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }

    if outcome.passed() && outcome.exit_code == Some(0) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::TestsFailed)
    }
}

/// Absolute directory ginkgo runs in: `--cwd`, else the test file's
/// directory, resolved against the process working directory.
///
/// ginkgo runs with this as its working directory, so a relative path would
/// be resolved twice.
fn run_dir(explicit: Option<&Path>, file: &Path, process_cwd: &Path) -> PathBuf {
    match explicit.or_else(|| file.parent()) {
        Some(dir) if !dir.as_os_str().is_empty() => process_cwd.join(dir),
        _ => process_cwd.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "cmd_run_tests.rs"]
mod tests;
