// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles ginkgo-lens.toml parsing with version validation and unknown key
//! warnings.

pub mod duration;
mod suggest;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::DEFAULT_CACHE_TTL;
use crate::env::read_env_file;
use crate::error::{Error, Result};
use suggest::warn_unknown_key;

pub use suggest::suggest_key;

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Default ginkgo binary, looked up on PATH.
pub const DEFAULT_GINKGO_PATH: &str = "ginkgo";

/// Default bound on one `ginkgo outline` invocation.
pub const DEFAULT_OUTLINE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on waiting for a run report.
pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Default report-file poll period.
pub const DEFAULT_REPORT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Top-level keys understood by ginkgo-lens.
pub(crate) const KNOWN_KEYS: &[&str] = &[
    "version",
    "ginkgo_path",
    "cache_ttl",
    "outline_timeout",
    "report_timeout",
    "report_poll_interval",
    "test_env_file",
    "test_env",
];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config as written, capturing unknown keys.
#[derive(Deserialize)]
struct ConfigFile {
    version: i64,

    #[serde(default)]
    ginkgo_path: Option<PathBuf>,

    #[serde(default, deserialize_with = "duration::deserialize_option")]
    cache_ttl: Option<Duration>,

    #[serde(default, deserialize_with = "duration::deserialize_option")]
    outline_timeout: Option<Duration>,

    #[serde(default, deserialize_with = "duration::deserialize_option")]
    report_timeout: Option<Duration>,

    #[serde(default, deserialize_with = "duration::deserialize_option")]
    report_poll_interval: Option<Duration>,

    #[serde(default)]
    test_env_file: Option<PathBuf>,

    #[serde(default)]
    test_env: BTreeMap<String, String>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,
    /// Path of the ginkgo binary.
    pub ginkgo_path: PathBuf,
    /// Lifetime of a cached outline.
    pub cache_ttl: Duration,
    /// Bound on one outline invocation (`None` waits forever).
    pub outline_timeout: Option<Duration>,
    /// Bound on waiting for a run report.
    pub report_timeout: Duration,
    /// Report-file poll period.
    pub report_poll_interval: Duration,
    /// Env file applied to test runs.
    pub test_env_file: Option<PathBuf>,
    /// Extra env vars for test runs; override the env file.
    pub test_env: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            ginkgo_path: PathBuf::from(DEFAULT_GINKGO_PATH),
            cache_ttl: DEFAULT_CACHE_TTL,
            outline_timeout: Some(DEFAULT_OUTLINE_TIMEOUT),
            report_timeout: DEFAULT_REPORT_TIMEOUT,
            report_poll_interval: DEFAULT_REPORT_POLL_INTERVAL,
            test_env_file: None,
            test_env: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Environment for test runs: the env file (resolved against `base`),
    /// then `test_env` on top.
    pub fn effective_env(&self, base: &Path) -> Result<BTreeMap<String, String>> {
        let mut env = match &self.test_env_file {
            Some(file) => read_env_file(&base.join(file))?,
            None => BTreeMap::new(),
        };
        env.extend(
            self.test_env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Ok(env)
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let defaults = Config::default();
        Self {
            version: file.version,
            ginkgo_path: file.ginkgo_path.unwrap_or(defaults.ginkgo_path),
            cache_ttl: file.cache_ttl.unwrap_or(defaults.cache_ttl),
            // A zero timeout disables the bound.
            outline_timeout: match file.outline_timeout {
                Some(t) if t.is_zero() => None,
                Some(t) => Some(t),
                None => defaults.outline_timeout,
            },
            report_timeout: file.report_timeout.unwrap_or(defaults.report_timeout),
            report_poll_interval: file
                .report_poll_interval
                .filter(|d| !d.is_zero())
                .unwrap_or(defaults.report_poll_interval),
            test_env_file: file.test_env_file,
            test_env: file.test_env,
        }
    }
}

/// Load and parse config from file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config from string content (unknown keys ignored silently).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    parse_file(content, path).map(Config::from)
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let file = parse_file(content, path)?;
    for key in file.unknown.keys() {
        warn_unknown_key(path, key);
    }
    Ok(Config::from(file))
}

/// Keys in `content` that ginkgo-lens does not understand.
pub fn unknown_keys(content: &str, path: &Path) -> Result<Vec<String>> {
    Ok(parse_file(content, path)?.unknown.into_keys().collect())
}

fn parse_file(content: &str, path: &Path) -> Result<ConfigFile> {
    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade ginkgo-lens to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
