// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for outlines and run results.

pub mod json;
pub mod text;

use crate::report::TestRunResult;

/// Outline display options.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Print the pre-order list instead of the nested tree.
    pub flat: bool,
    /// Show each node's identity key.
    pub show_keys: bool,
}

impl FormatOptions {
    pub fn flat() -> Self {
        Self {
            flat: true,
            ..Self::default()
        }
    }

    pub fn with_keys(mut self) -> Self {
        self.show_keys = true;
        self
    }
}

/// Pass/fail/skip counts of a result batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn of(results: &[TestRunResult]) -> Self {
        let mut tally = Self::default();
        for r in results {
            if r.skipped {
                tally.skipped += 1;
            } else if r.passed {
                tally.passed += 1;
            } else {
                tally.failed += 1;
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}
