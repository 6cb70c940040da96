// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! Outline format:
//! ```text
//! + Widgets
//!   # BeforeEach
//!   > It adds two numbers  PASS
//!   > It subtracts  RUNNING
//! ```
//!
//! Result format:
//! ```text
//! PASS  Widgets adds two numbers
//! FAIL  Widgets subtracts
//!       expected 1 to equal 2
//! ```

use std::io::Write;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::{FormatOptions, Tally};
use crate::color::scheme;
use crate::correlate::Correlator;
use crate::node::{Node, NodeIcon, NodeId, icon, label};
use crate::report::TestRunResult;

/// Marker for kinds with no icon.
const UNKNOWN_GLYPH: char = '?';

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: FormatOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the correlator's outline with run state markers.
    pub fn write_outline(&mut self, correlator: &Correlator) -> std::io::Result<()> {
        let outline = correlator.outline();
        if self.options.flat {
            for id in outline.ids() {
                if let Some(node) = outline.get(id) {
                    self.write_node(correlator, id, node, 0)?;
                }
            }
            return Ok(());
        }

        // Pre-order walk with explicit depth.
        let mut stack: Vec<(NodeId, usize)> =
            outline.roots().iter().rev().map(|&id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = outline.get(id) else {
                continue;
            };
            self.write_node(correlator, id, node, depth)?;
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        Ok(())
    }

    fn write_node(
        &mut self,
        correlator: &Correlator,
        id: NodeId,
        node: &Node,
        depth: usize,
    ) -> std::io::Result<()> {
        let glyph = icon(node).map_or(UNKNOWN_GLYPH, NodeIcon::glyph);
        write!(self.out, "{:indent$}{} ", "", glyph, indent = depth * 2)?;

        self.out.set_color(&scheme::name())?;
        write!(self.out, "{}", label(node).trim_start())?;
        self.out.reset()?;

        if correlator.is_running(id) {
            write!(self.out, "  ")?;
            self.out.set_color(&scheme::running())?;
            write!(self.out, "RUNNING")?;
            self.out.reset()?;
        } else if let Some(result) = correlator.result(id) {
            write!(self.out, "  ")?;
            self.write_status(result)?;
        }

        if self.options.show_keys {
            write!(self.out, "  ")?;
            self.out.set_color(&scheme::key())?;
            write!(self.out, "[{}]", node.key)?;
            self.out.reset()?;
        }
        writeln!(self.out)
    }

    fn write_status(&mut self, result: &TestRunResult) -> std::io::Result<()> {
        let (spec, text) = if result.skipped {
            (scheme::skip(), "SKIP")
        } else if result.passed {
            (scheme::pass(), "PASS")
        } else {
            (scheme::fail(), "FAIL")
        };
        self.out.set_color(&spec)?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }

    /// Write one line per result, with failure output indented below.
    pub fn write_results(&mut self, results: &[TestRunResult]) -> std::io::Result<()> {
        for result in results {
            self.write_status(result)?;
            writeln!(self.out, "  {}", result.test_name)?;
            if !result.passed
                && let Some(output) = &result.output
            {
                for line in output.lines() {
                    writeln!(self.out, "      {}", line)?;
                }
            }
        }
        Ok(())
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, results: &[TestRunResult]) -> std::io::Result<()> {
        let tally = Tally::of(results);
        let mut parts = vec![format!("{} passed", tally.passed)];
        if tally.failed > 0 {
            parts.push(format!("{} failed", tally.failed));
        }
        if tally.skipped > 0 {
            parts.push(format!("{} skipped", tally.skipped));
        }
        writeln!(self.out, "{}", parts.join(", "))
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
