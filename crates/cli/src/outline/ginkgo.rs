// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `ginkgo outline` process adapter.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use super::source::{OutlineError, OutlineSource};
use crate::process::{describe, run_with_input, run_with_timeout};

/// Message `ginkgo outline` prints for files without Ginkgo imports.
pub const IMPORTS_NOT_FOUND_MESSAGE: &str = "error creating outline: file does not import \"github.com/onsi/ginkgo\" or \"github.com/onsi/ginkgo/extensions/table\"";

/// Outline source backed by the `ginkgo` executable.
#[derive(Debug, Clone)]
pub struct GinkgoCli {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl GinkgoCli {
    /// Use the `ginkgo` binary at `path` (a bare name is looked up on PATH).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Bound each outline invocation.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the ginkgo binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `ginkgo version` and extract the major version.
    ///
    /// Returns `None` when the tool cannot be run or exits unsuccessfully.
    pub fn detect_major_version(&self) -> Option<u32> {
        let child = Command::new(&self.path)
            .arg("version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();
        let child = match child {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("failed to detect ginkgo version: {}", e);
                return None;
            }
        };

        match run_with_timeout(child, Some(self.timeout.unwrap_or(VERSION_TIMEOUT))) {
            Ok(out) if out.status.success() => {
                Some(parse_major_version(&String::from_utf8_lossy(&out.stdout)))
            }
            Ok(out) => {
                tracing::debug!("ginkgo version exited with {}", out.status);
                None
            }
            Err(e) => {
                tracing::debug!("failed to detect ginkgo version: {}", e);
                None
            }
        }
    }
}

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

impl OutlineSource for GinkgoCli {
    fn outline(&self, source: &str) -> Result<String, OutlineError> {
        let mut cmd = Command::new(&self.path);
        cmd.args(["outline", "--format=json", "-"]);
        let command = describe(&cmd);

        let output = match run_with_input(cmd, source, self.timeout) {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                return Err(OutlineError::TimedOut {
                    command,
                    timeout: self.timeout.unwrap_or_default(),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OutlineError::Spawn { command, source: e });
            }
            Err(e) => return Err(OutlineError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if is_imports_not_found(&stderr) {
                return Err(OutlineError::NoGinkgoImports);
            }
            return Err(OutlineError::Failed {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn major_version(&self) -> Option<u32> {
        self.detect_major_version()
    }
}

/// True when `message` reports a file without Ginkgo imports.
///
/// Matches any import path under `github.com/onsi/ginkgo`, so the v2 module
/// path is recognized alongside the v1 wording.
pub fn is_imports_not_found(message: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r#"does not import "github\.com/onsi/ginkgo"#).ok());
    match pattern {
        Some(re) => re.is_match(message),
        None => message.contains(IMPORTS_NOT_FOUND_MESSAGE),
    }
}

/// Extract the major version from `ginkgo version` output.
///
/// Output without an `X.Y.Z` triple is treated as version 1, which predates
/// the version command's current format.
pub fn parse_major_version(output: &str) -> u32 {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"([0-9]+)\.([0-9]+)\.([0-9]+)").ok());
    pattern
        .as_ref()
        .and_then(|re| re.captures(output))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

#[cfg(test)]
#[path = "ginkgo_tests.rs"]
mod tests;
