// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by ginkgo-lens, and env-file parsing for
//! test runs.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Environment variable names.
pub mod names {
    /// Disable colored output.
    pub const NO_COLOR: &str = "NO_COLOR";
    /// Force colored output.
    pub const COLOR: &str = "COLOR";
    /// Set in CI environments.
    pub const CI: &str = "CI";
    /// Log filter directive.
    pub const GINKGO_LENS_LOG: &str = "GINKGO_LENS_LOG";
    /// Config file path override.
    pub const GINKGO_LENS_CONFIG: &str = "GINKGO_LENS_CONFIG";
    /// Default ginkgo binary.
    pub const GINKGO_LENS_GINKGO: &str = "GINKGO_LENS_GINKGO";
}

/// Name of the log filter variable.
pub fn log_var() -> &'static str {
    names::GINKGO_LENS_LOG
}

/// True when `NO_COLOR` is set to anything.
pub fn no_color() -> bool {
    std::env::var_os(names::NO_COLOR).is_some()
}

/// True when `COLOR` is set to anything.
pub fn force_color() -> bool {
    std::env::var_os(names::COLOR).is_some()
}

/// True when running under CI.
pub fn is_ci() -> bool {
    std::env::var_os(names::CI).is_some()
}

/// Parse `KEY=VALUE` lines.
///
/// Lines that do not look like assignments are skipped. A value wrapped in
/// double quotes has `\n` escapes expanded; one leading and one trailing
/// quote character are stripped from every value.
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(pattern) = PATTERN
        .get_or_init(|| Regex::new(r"^\s*([\w.\-]+)\s*=\s*(.*)$").ok())
        .as_ref()
    else {
        return BTreeMap::new();
    };

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut env = BTreeMap::new();
    for line in content.lines() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };
        let (Some(key), value) = (caps.get(1), caps.get(2).map_or("", |m| m.as_str())) else {
            continue;
        };
        env.insert(key.as_str().to_string(), unquote(value));
    }
    env
}

fn unquote(value: &str) -> String {
    let mut value = value.to_string();
    if value.len() > 1 && value.starts_with('"') && value.ends_with('"') {
        value = value.replace("\\n", "\n");
    }
    if value.starts_with(['"', '\'']) {
        value.remove(0);
    }
    if value.ends_with(['"', '\'']) {
        value.pop();
    }
    value
}

/// Read and parse an env file.
pub fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_env_file(&content))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
