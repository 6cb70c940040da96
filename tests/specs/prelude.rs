//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the ginkgo-lens binary against a
//! temporary project with a scripted stand-in for ginkgo.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the ginkgo-lens binary
pub fn lens_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ginkgo-lens"));
    cmd.env_remove("GINKGO_LENS_CONFIG")
        .env_remove("GINKGO_LENS_GINKGO")
        .env_remove("GINKGO_LENS_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Builder for `ginkgo-lens outline`
pub fn outline(file: &str) -> LensBuilder<Text> {
    LensBuilder::new("outline", file)
}

/// Builder for `ginkgo-lens results`
pub fn results(report: &str) -> LensBuilder<Text> {
    LensBuilder::new("results", report)
}

/// Builder for `ginkgo-lens run`
pub fn run(file: &str) -> LensBuilder<Text> {
    LensBuilder::new("run", file)
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level command builder for fluent test assertions
pub struct LensBuilder<Mode = Text> {
    command: &'static str,
    target: String,
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl LensBuilder<Text> {
    fn new(command: &'static str, target: &str) -> Self {
        Self {
            command,
            target: target.to_string(),
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> LensBuilder<Json> {
        LensBuilder {
            command: self.command,
            target: self.target,
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_passes(self.command())
    }

    pub fn fails(self) -> RunAssert {
        run_fails(self.command())
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

#[allow(dead_code)]
impl LensBuilder<Json> {
    pub fn passes(self) -> JsonAssert {
        JsonAssert::new(run_passes(self.command()))
    }

    pub fn exits(self, code: i32) -> JsonAssert {
        JsonAssert::new(run_exits(self.command(), code))
    }
}

#[allow(dead_code)]
impl<Mode: 'static> LensBuilder<Mode> {
    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it
    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = lens_cmd();
        cmd.arg(self.command).arg(&self.target);

        if is_json {
            cmd.args(["-o", "json"]);
        }

        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

fn run_passes(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

fn run_fails(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        !output.status.success(),
        "expected command to fail, but it passed\nstdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    RunAssert { output }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a command run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Parsed JSON output of a command
pub struct JsonAssert {
    root: serde_json::Value,
}

impl JsonAssert {
    fn new(run: RunAssert) -> Self {
        let root = serde_json::from_slice(&run.output.stdout).expect("valid JSON");
        Self { root }
    }

    pub fn root(&self) -> &serde_json::Value {
        &self.root
    }
}

impl std::ops::Index<&str> for JsonAssert {
    type Output = serde_json::Value;

    fn index(&self, key: &str) -> &serde_json::Value {
        &self.root[key]
    }
}

// =============================================================================
// Project
// =============================================================================

/// `ginkgo outline` output for `widgets_test.go`.
pub const WIDGETS_OUTLINE: &str = r#"[{"name":"Describe","text":"Widgets","start":10,"end":300,"spec":false,"focused":false,"pending":false,"nodes":[{"name":"BeforeEach","text":"","start":30,"end":60,"spec":false,"focused":false,"pending":false,"nodes":[]},{"name":"It","text":"adds two numbers","start":70,"end":150,"spec":true,"focused":false,"pending":false,"nodes":[]},{"name":"It","text":"subtracts","start":160,"end":290,"spec":true,"focused":false,"pending":false,"nodes":[]}]}]"#;

/// JSON run report for the widgets suite with every spec passing.
pub const PASSING_REPORT: &str = r#"[{"SuiteDescription":"Widgets Suite","SpecReports":[{"State":"passed","LeafNodeType":"It","LeafNodeText":"adds two numbers","ContainerHierarchyTexts":["Widgets"]},{"State":"passed","LeafNodeType":"It","LeafNodeText":"subtracts","ContainerHierarchyTexts":["Widgets"]}]}]"#;

/// JSON run report for the widgets suite with one failure.
pub const FAILING_REPORT: &str = r#"[{"SuiteDescription":"Widgets Suite","SpecReports":[{"State":"passed","LeafNodeType":"It","LeafNodeText":"adds two numbers","ContainerHierarchyTexts":["Widgets"]},{"State":"failed","LeafNodeType":"It","LeafNodeText":"subtracts","ContainerHierarchyTexts":["Widgets"],"Failure":{"Message":"expected 1 to equal 2","Location":{"FileName":"widgets_test.go","LineNumber":12}}}]}]"#;

/// Temporary Go project with a scripted ginkgo.
///
/// The fake ginkgo answers `version` with a v2 banner, `outline` with the
/// contents of `outline.json`, and any other invocation by copying
/// `report.json` to the report path and exiting with the code in
/// `exit_code` (default 0). Arguments of the last run land in `args.txt`.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with `widgets_test.go`, its outline, and a fake ginkgo.
    #[cfg(unix)]
    pub fn widgets() -> Self {
        let temp = Self::empty();
        temp.file(
            "widgets_test.go",
            "package widgets_test\n\nimport . \"github.com/onsi/ginkgo/v2\"\n",
        );
        temp.outline_json(WIDGETS_OUTLINE);
        temp.fake_ginkgo();
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the fake ginkgo script.
    pub fn ginkgo(&self) -> PathBuf {
        self.dir.path().join("bin").join("ginkgo")
    }

    /// Write ginkgo-lens.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("ginkgo-lens.toml", &content);
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Read a file relative to the project.
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).unwrap()
    }

    /// Set what `ginkgo outline` prints.
    pub fn outline_json(&self, json: &str) {
        self.file("bin/outline.json", json);
    }

    /// Set the report the next run writes.
    pub fn report(&self, json: &str) {
        self.file("bin/report.json", json);
    }

    /// Set the exit code of the next run.
    pub fn exit_code(&self, code: i32) {
        self.file("bin/exit_code", &code.to_string());
    }

    /// Make `ginkgo outline` fail with the missing-imports message.
    pub fn without_ginkgo_imports(&self) {
        self.file("bin/no_imports", "");
    }

    #[cfg(unix)]
    fn fake_ginkgo(&self) {
        use std::os::unix::fs::PermissionsExt;

        let script = r#"#!/bin/sh
bin="$(dirname "$0")"
case "$1" in
  version)
    echo "Ginkgo Version 2.13.0"
    ;;
  outline)
    cat > /dev/null
    if [ -f "$bin/no_imports" ]; then
      echo 'error creating outline: file does not import "github.com/onsi/ginkgo" or "github.com/onsi/ginkgo/extensions/table"' >&2
      exit 1
    fi
    cat "$bin/outline.json"
    ;;
  *)
    echo "$@" > "$bin/args.txt"
    env > "$bin/env.txt"
    if [ -f "$bin/report.json" ]; then
      cp "$bin/report.json" "$2"
    else
      echo "build failed" >&2
    fi
    code=0
    if [ -f "$bin/exit_code" ]; then
      code=$(cat "$bin/exit_code")
    fi
    exit "$code"
    ;;
esac
"#;
        let path = self.ginkgo();
        self.file("bin/ginkgo", script);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
