// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::duration::parse_duration;

/// Outline Ginkgo test files and correlate run results with their nodes
#[derive(Parser)]
#[command(name = "ginkgo-lens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "GINKGO_LENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the outline of a Ginkgo test file
    Outline(OutlineArgs),
    /// Print the results recorded in a ginkgo report
    Results(ResultsArgs),
    /// Run the specs of a test file and show results on its outline
    Run(RunArgs),
}

#[derive(clap::Args)]
pub struct OutlineArgs {
    /// Go test file to outline
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// ginkgo binary (overrides config)
    #[arg(long = "ginkgo", value_name = "PATH", env = "GINKGO_LENS_GINKGO")]
    pub ginkgo_path: Option<PathBuf>,

    /// Ginkgo major version (default: detected)
    #[arg(long, value_name = "N")]
    pub major_version: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Print nodes in pre-order without nesting
    #[arg(long)]
    pub flat: bool,

    /// Show each node's identity key
    #[arg(long)]
    pub keys: bool,
}

#[derive(clap::Args)]
pub struct ResultsArgs {
    /// Report file (JSON or JUnit XML)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Go test file whose outline receives the results
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Identity key of the node to run (default: the whole suite)
    #[arg(long, value_name = "KEY")]
    pub focus: Option<String>,

    /// Directory ginkgo runs from (default: the file's directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// ginkgo binary (overrides config)
    #[arg(long = "ginkgo", value_name = "PATH", env = "GINKGO_LENS_GINKGO")]
    pub ginkgo_path: Option<PathBuf>,

    /// Ginkgo major version (default: detected)
    #[arg(long, value_name = "N")]
    pub major_version: Option<u32>,

    /// Collect coverage into <DIR>/coverage
    #[arg(long)]
    pub cover: bool,

    /// Give up waiting for the report after this long (e.g. 90s, 10m)
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Show each node's identity key
    #[arg(long)]
    pub keys: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
