// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outline command implementation.

use ginkgo_lens::cache::OutlineCache;
use ginkgo_lens::cli::{Cli, OutlineArgs, OutputFormat};
use ginkgo_lens::color::resolve_color;
use ginkgo_lens::correlate::Correlator;
use ginkgo_lens::error::ExitCode;
use ginkgo_lens::outline::OutlineError;
use ginkgo_lens::output::FormatOptions;
use ginkgo_lens::output::json::{JsonFormatter, outline_output};
use ginkgo_lens::output::text::TextFormatter;

use crate::{load_config, outline_document, outliner, read_document};

/// Run the outline command.
pub fn run(cli: &Cli, args: &OutlineArgs) -> anyhow::Result<ExitCode> {
    let (mut config, _) = load_config(cli)?;
    if let Some(path) = &args.ginkgo_path {
        config.ginkgo_path = path.clone();
    }

    let doc = read_document(&args.file)?;
    let (events, discovered) = crossbeam_channel::unbounded();
    let outliner = outliner(&config, args.major_version).with_events(events);
    let major_version = outliner.major_version();
    let mut cache = OutlineCache::new(outliner).with_ttl(config.cache_ttl);

    if outline_document(&mut cache, &doc, &discovered)?.is_none() {
        eprintln!("ginkgo-lens: {}: {}", doc.uri, OutlineError::NoGinkgoImports);
    }

    let mut correlator = Correlator::new();
    correlator.drain(&discovered);

    match args.output {
        OutputFormat::Text => {
            let mut options = if args.flat {
                FormatOptions::flat()
            } else {
                FormatOptions::default()
            };
            if args.keys {
                options = options.with_keys();
            }
            TextFormatter::stdout(resolve_color(), options).write_outline(&correlator)?;
        }
        OutputFormat::Json => {
            let output = outline_output(&correlator, doc.uri.as_str(), major_version, args.flat);
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }
    Ok(ExitCode::Success)
}
