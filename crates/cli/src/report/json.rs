// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ginkgo v2 JSON report parsing.

use serde::Deserialize;

use super::{ReportError, TestRunResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SuiteReport {
    #[serde(default)]
    suite_description: String,
    #[serde(default)]
    spec_reports: Option<Vec<SpecReport>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpecReport {
    #[serde(default)]
    state: String,
    #[serde(default)]
    leaf_node_type: String,
    #[serde(default)]
    leaf_node_text: String,
    #[serde(default)]
    container_hierarchy_texts: Option<Vec<String>>,
    #[serde(default)]
    failure: Option<SpecFailure>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpecFailure {
    #[serde(default)]
    message: String,
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Location {
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    line_number: u64,
}

/// Parse a `--json-report` file: an array of suite reports.
pub fn parse_json_report(content: &str) -> Result<Vec<TestRunResult>, ReportError> {
    let suites: Vec<SuiteReport> = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;

    let mut results = Vec::new();
    for suite in suites {
        for spec in suite.spec_reports.unwrap_or_default() {
            results.push(to_result(&suite.suite_description, spec));
        }
    }
    Ok(results)
}

fn to_result(suite: &str, spec: SpecReport) -> TestRunResult {
    let name = spec_name(&spec);
    let mut result = match spec.state.as_str() {
        "passed" => TestRunResult::passed(suite, name),
        "skipped" | "pending" => TestRunResult::skipped(suite, name),
        _ => TestRunResult::failed(suite, name),
    };
    if let Some(failure) = spec.failure {
        result = result.with_output(failure_output(failure));
    }
    result
}

/// Containers joined with the leaf text (or kind, for text-less nodes).
fn spec_name(spec: &SpecReport) -> String {
    let leaf = if spec.leaf_node_text.is_empty() {
        &spec.leaf_node_type
    } else {
        &spec.leaf_node_text
    };
    let mut parts: Vec<&str> = spec
        .container_hierarchy_texts
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    parts.push(leaf);
    parts.join(" ").trim().to_string()
}

fn failure_output(failure: SpecFailure) -> String {
    match failure.location {
        Some(loc) => format!("{}\n{}:{}", failure.message, loc.file_name, loc.line_number),
        None => failure.message,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
