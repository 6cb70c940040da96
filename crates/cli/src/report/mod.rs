// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ginkgo run reports.
//!
//! Ginkgo v2 writes a JSON report (`--json-report`), v1 writes JUnit XML
//! (`-reportFile`). Both are reduced to a list of [`TestRunResult`]s whose
//! `test_name` matches the identity keys of outline nodes.

mod json;
mod junit;

pub use json::parse_json_report;
pub use junit::parse_junit_report;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of one spec in a run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunResult {
    /// Suite the spec belongs to.
    pub suite_name: String,
    /// Full spec name; correlates with a node's identity key.
    pub test_name: String,
    /// Whether the spec passed (skipped specs count as passed).
    pub passed: bool,
    /// Whether the spec was skipped or pending.
    pub skipped: bool,
    /// Failure output, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl TestRunResult {
    /// Create a passing result.
    pub fn passed(suite_name: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            test_name: test_name.into(),
            passed: true,
            skipped: false,
            output: None,
        }
    }

    /// Create a failing result.
    pub fn failed(suite_name: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            passed: false,
            ..Self::passed(suite_name, test_name)
        }
    }

    /// Create a skipped result.
    pub fn skipped(suite_name: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            skipped: true,
            ..Self::passed(suite_name, test_name)
        }
    }

    /// Attach failure output.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// On-disk report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Ginkgo v2 `--json-report`.
    Json,
    /// Ginkgo v1 `-reportFile` (JUnit XML).
    JUnit,
}

impl ReportFormat {
    /// The format Ginkgo produces for a major version.
    pub fn for_major_version(major_version: u32) -> Self {
        if major_version >= 2 {
            ReportFormat::Json
        } else {
            ReportFormat::JUnit
        }
    }

    /// Guess the format from report content.
    pub fn detect(content: &str) -> Self {
        if content.trim_start_matches('\u{feff}').trim_start().starts_with('<') {
            ReportFormat::JUnit
        } else {
            ReportFormat::Json
        }
    }
}

/// Report failures.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JUnit report: {0}")]
    Xml(String),

    #[error("failed to read report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report {} did not appear within {timeout:?}", path.display())]
    TimedOut { path: PathBuf, timeout: Duration },

    #[error("waiting for report {} was cancelled", path.display())]
    Cancelled { path: PathBuf },

    #[error("report is empty")]
    Empty,
}

/// Parse a report, detecting its format from the content.
pub fn parse_report(content: &str) -> Result<Vec<TestRunResult>, ReportError> {
    if content.trim_start_matches('\u{feff}').trim().is_empty() {
        return Err(ReportError::Empty);
    }
    match ReportFormat::detect(content) {
        ReportFormat::Json => parse_json_report(content),
        ReportFormat::JUnit => parse_junit_report(content),
    }
}

/// Read and parse a report file.
pub fn read_report(path: &Path) -> Result<Vec<TestRunResult>, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&content)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
