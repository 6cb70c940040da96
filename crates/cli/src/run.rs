// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Running ginkgo and collecting its report.
//!
//! Ginkgo writes its report file when the run finishes. The wait for that
//! file is bounded by a timeout and cut short by a [`CancelToken`], which the
//! runner trips as soon as the ginkgo process exits.

use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::process::{describe, run_with_timeout};
use crate::report::{ReportError, ReportFormat, TestRunResult, read_report};

/// Report file written into the working directory.
pub const REPORT_FILE_NAME: &str = "ginkgo.report";

/// Coverage directory under the working directory.
pub const COVERAGE_DIR_NAME: &str = "coverage";

/// Coverage profile written by `-coverprofile`.
pub const COVERAGE_OUT: &str = "coverage.out";

/// HTML rendering of the coverage profile.
pub const COVERAGE_HTML: &str = "coverage.html";

/// One ginkgo invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub ginkgo_path: PathBuf,
    /// Directory the suite is run from (`-r <cwd>`). Relative paths resolve
    /// against both the caller and ginkgo, so pass an absolute one.
    pub cwd: PathBuf,
    pub report_path: PathBuf,
    pub format: ReportFormat,
    /// Identity key of the node to focus, if any.
    pub focus: Option<String>,
    /// Coverage output directory, if coverage is enabled.
    pub coverage_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl RunRequest {
    pub fn new(ginkgo_path: impl Into<PathBuf>, cwd: impl Into<PathBuf>, format: ReportFormat) -> Self {
        let cwd = cwd.into();
        Self {
            ginkgo_path: ginkgo_path.into(),
            report_path: cwd.join(REPORT_FILE_NAME),
            cwd,
            format,
            focus: None,
            coverage_dir: None,
            env: BTreeMap::new(),
        }
    }

    /// Run only specs matching `key`.
    pub fn with_focus(mut self, key: impl Into<String>) -> Self {
        self.focus = Some(key.into());
        self
    }

    /// Collect coverage into `<cwd>/coverage`.
    pub fn with_coverage(mut self) -> Self {
        self.coverage_dir = Some(self.cwd.join(COVERAGE_DIR_NAME));
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    /// Arguments passed to ginkgo.
    pub fn args(&self) -> Vec<String> {
        let report_flag = match self.format {
            ReportFormat::Json => "--json-report",
            ReportFormat::JUnit => "-reportFile",
        };
        let mut args = vec![
            report_flag.to_string(),
            self.report_path.display().to_string(),
        ];
        if let Some(key) = &self.focus {
            args.push("-focus".to_string());
            args.push(focus_pattern(key));
        }
        if let Some(dir) = &self.coverage_dir {
            args.push("-cover".to_string());
            args.push("-coverpkg=./...".to_string());
            args.push(format!(
                "-coverprofile={}",
                dir.join(COVERAGE_OUT).display()
            ));
        }
        args.push("-r".to_string());
        args.push(self.cwd.display().to_string());
        args
    }

    /// The ginkgo command for this request.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.ginkgo_path);
        cmd.args(self.args())
            .current_dir(&self.cwd)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

/// `-focus` takes a regular expression; match the key literally.
pub fn focus_pattern(key: &str) -> String {
    regex::escape(key)
}

/// Cooperative cancellation flag shared between threads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wait until `path` exists.
///
/// Fails with [`ReportError::TimedOut`] once `timeout` elapses and with
/// [`ReportError::Cancelled`] when `cancel` is tripped before the file
/// appears.
pub fn wait_for_report(
    path: &Path,
    timeout: Duration,
    poll: Duration,
    cancel: &CancelToken,
) -> std::result::Result<(), ReportError> {
    let start = Instant::now();
    loop {
        if path.exists() {
            return Ok(());
        }
        if cancel.is_cancelled() {
            // The writer may have finished between the two checks.
            if path.exists() {
                return Ok(());
            }
            return Err(ReportError::Cancelled {
                path: path.to_path_buf(),
            });
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            tracing::warn!("gave up waiting for {} after {:?}", path.display(), timeout);
            return Err(ReportError::TimedOut {
                path: path.to_path_buf(),
                timeout,
            });
        }
        std::thread::sleep(poll.min(timeout - elapsed));
    }
}

/// Read a report and delete it.
pub fn take_report(path: &Path) -> std::result::Result<Vec<TestRunResult>, ReportError> {
    let results = read_report(path)?;
    if let Err(e) = std::fs::remove_file(path) {
        tracing::debug!("failed to remove report {}: {}", path.display(), e);
    }
    Ok(results)
}

/// Remove a report left over from an earlier run.
pub fn remove_stale_report(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("removed stale report {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Create the coverage directory, removing outputs of earlier runs.
pub fn prepare_coverage_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for name in [COVERAGE_OUT, COVERAGE_HTML] {
        match std::fs::remove_file(dir.join(name)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// What a finished run produced.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// Parsed report, empty when no report was written.
    pub results: Vec<TestRunResult>,
    /// Whether a report file appeared.
    pub report_found: bool,
    /// Exit code of ginkgo, if it exited normally.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutcome {
    /// True when every result passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

/// Run ginkgo for `request` and collect its report.
///
/// A run that exits without writing a report yields an outcome with no
/// results. Exceeding `timeout` kills ginkgo and fails.
pub fn execute(request: &RunRequest, timeout: Duration, poll: Duration) -> Result<RunOutcome> {
    remove_stale_report(&request.report_path).map_err(|source| Error::Io {
        path: request.report_path.clone(),
        source,
    })?;
    if let Some(dir) = &request.coverage_dir {
        prepare_coverage_dir(dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
    }

    let mut cmd = request.command();
    tracing::info!("running {}", describe(&cmd));
    let child = cmd.spawn().map_err(|source| Error::Io {
        path: request.ginkgo_path.clone(),
        source,
    })?;

    let cancel = CancelToken::new();
    let exited = cancel.clone();
    let runner = std::thread::spawn(move || {
        let output = run_with_timeout(child, Some(timeout));
        exited.cancel();
        output
    });

    let waited = wait_for_report(&request.report_path, timeout, poll, &cancel);
    let output = runner
        .join()
        .map_err(|_| Error::Internal("ginkgo runner thread panicked".to_string()))?;

    let report_found = match waited {
        Ok(()) => true,
        Err(ReportError::Cancelled { .. }) => false,
        Err(e) => return Err(e.into()),
    };
    let output = output.map_err(|source| Error::Io {
        path: request.ginkgo_path.clone(),
        source,
    })?;

    let results = if report_found {
        take_report(&request.report_path)?
    } else {
        tracing::warn!("ginkgo exited without writing {}", request.report_path.display());
        Vec::new()
    };

    Ok(RunOutcome {
        results,
        report_found,
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
