// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Results command implementation.

use ginkgo_lens::cli::{OutputFormat, ResultsArgs};
use ginkgo_lens::color::resolve_color;
use ginkgo_lens::error::{Error, ExitCode};
use ginkgo_lens::output::FormatOptions;
use ginkgo_lens::output::json::{JsonFormatter, results_output};
use ginkgo_lens::output::text::TextFormatter;
use ginkgo_lens::report::read_report;

/// Run the results command.
pub fn run(args: &ResultsArgs) -> anyhow::Result<ExitCode> {
    let results = read_report(&args.report).map_err(Error::from)?;
    tracing::debug!("read {} results from {}", results.len(), args.report.display());

    match args.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::stdout(resolve_color(), FormatOptions::default());
            formatter.write_results(&results)?;
            formatter.write_summary(&results)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(&results_output(&results, None))?;
        }
    }

    if results.iter().all(|r| r.passed) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::TestsFailed)
    }
}
