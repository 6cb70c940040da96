// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use super::Tally;
use crate::correlate::{CorrelationSummary, Correlator};
use crate::node::{Node, NodeIcon, NodeId, icon, label};
use crate::report::TestRunResult;

/// One node with its display and run state.
#[derive(Debug, Serialize)]
pub struct NodeView<'a> {
    pub id: NodeId,
    #[serde(flatten)]
    pub node: &'a Node,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<NodeIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a TestRunResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView<'a>>,
}

/// `outline` command output.
#[derive(Debug, Serialize)]
pub struct OutlineOutput<'a> {
    pub timestamp: String,
    pub file: String,
    pub major_version: u32,
    pub nodes: Vec<NodeView<'a>>,
}

/// `results` and `run` command output.
#[derive(Debug, Serialize)]
pub struct ResultsOutput<'a> {
    pub timestamp: String,
    pub passed: bool,
    pub counts: Tally,
    pub results: &'a [TestRunResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationSummary>,
}

/// `run` command output: the results plus the outline they landed on.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    #[serde(flatten)]
    pub results: ResultsOutput<'a>,
    pub exit_code: Option<i32>,
    pub report_found: bool,
    pub outline: OutlineOutput<'a>,
}

/// Build the outline view: nested from the roots, or flat in pre-order.
pub fn outline_output<'a>(
    correlator: &'a Correlator,
    file: impl Into<String>,
    major_version: u32,
    flat: bool,
) -> OutlineOutput<'a> {
    let outline = correlator.outline();
    let nodes = if flat {
        outline
            .ids()
            .filter_map(|id| view(correlator, id, false))
            .collect()
    } else {
        outline
            .roots()
            .iter()
            .filter_map(|&id| view(correlator, id, true))
            .collect()
    };
    OutlineOutput {
        timestamp: timestamp(),
        file: file.into(),
        major_version,
        nodes,
    }
}

fn view(correlator: &Correlator, id: NodeId, nested: bool) -> Option<NodeView<'_>> {
    let node = correlator.outline().get(id)?;
    let children = if nested {
        node.children
            .iter()
            .filter_map(|&c| view(correlator, c, true))
            .collect()
    } else {
        Vec::new()
    };
    Some(NodeView {
        id,
        node,
        label: label(node).trim_start().to_string(),
        icon: icon(node),
        parent: if nested { None } else { node.parent },
        running: correlator.is_running(id),
        result: correlator.result(id),
        children,
    })
}

/// Build the results view.
pub fn results_output(
    results: &[TestRunResult],
    correlation: Option<CorrelationSummary>,
) -> ResultsOutput<'_> {
    let tally = Tally::of(results);
    ResultsOutput {
        timestamp: timestamp(),
        passed: tally.failed == 0,
        counts: tally,
        results,
        correlation,
    }
}

/// Current time as RFC 3339 with second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write `value` as pretty JSON followed by a newline.
    pub fn write<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
