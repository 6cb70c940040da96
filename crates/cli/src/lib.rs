// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outline Ginkgo test files and correlate run results with outline nodes.

pub mod cache;
pub mod cli;
pub mod color;
pub mod config;
pub mod correlate;
pub mod discovery;
pub mod env;
pub mod error;
pub mod node;
pub mod outline;
pub mod output;
pub mod process;
pub mod report;
pub mod run;

pub use cache::{CacheStats, OutlineCache};
pub use cli::{Cli, Command, OutlineArgs, OutputFormat, ResultsArgs, RunArgs};
pub use config::Config;
pub use correlate::{CorrelationSummary, Correlator, Event, NodeChange};
pub use error::{Error, ExitCode, Result};
pub use node::{Node, NodeId};
pub use outline::{Document, GinkgoCli, Outline, OutlineError, OutlineSource, Outliner};
pub use report::{ReportFormat, TestRunResult};
