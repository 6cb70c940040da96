// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The seam between outline parsing and the process that produces outlines.

use std::time::Duration;

/// Ginkgo major version assumed until detection says otherwise.
pub const DEFAULT_MAJOR_VERSION: u32 = 2;

/// Produces raw `ginkgo outline --format=json` output for source text.
pub trait OutlineSource {
    /// Outline `source`, returning the JSON array text.
    fn outline(&self, source: &str) -> Result<String, OutlineError>;

    /// Major version of the outline tool, if it can be determined.
    fn major_version(&self) -> Option<u32> {
        None
    }
}

/// Outline failures.
///
/// [`OutlineError::NoGinkgoImports`] is the one semantic failure: the file was
/// parsed but does not use Ginkgo. Every other variant is mechanical.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    /// The file does not import Ginkgo, so it has no outline.
    #[error("file does not import ginkgo")]
    NoGinkgoImports,

    /// The outline tool could not be started.
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The outline tool exited unsuccessfully.
    #[error("error running \"{command}\"{}: {stderr}", exit_suffix(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The outline tool did not finish in time.
    #[error("{command} timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    /// The output was not a JSON node array.
    #[error("could not parse outline: {0}")]
    Malformed(#[from] serde_json::Error),

    /// I/O failure talking to the outline tool.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl OutlineError {
    /// True for the semantic "does not import ginkgo" failure.
    pub fn is_no_ginkgo_imports(&self) -> bool {
        matches!(self, OutlineError::NoGinkgoImports)
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (error code {code})"),
        None => String::new(),
    }
}
