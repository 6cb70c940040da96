// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration parsing for cache lifetimes and process time limits.
//!
//! Config values are either duration strings (`"30s"`, `"500ms"`, `"1m"`,
//! `"1h"`, `"1.5s"`) or bare integers counting milliseconds.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Unit suffixes in milliseconds, longest first so `ms` wins over `m` and `s`.
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse a duration such as `"30s"`, `"500ms"`, `"1m"`, `"1h"` or `"1.5s"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let Some((amount, scale)) = UNITS
        .iter()
        .find_map(|(suffix, scale)| s.strip_suffix(suffix).map(|n| (n.trim(), *scale)))
    else {
        return Err(format!(
            "invalid duration format: {s} (use 30s, 500ms, 1m, or 1h)"
        ));
    };

    let n: f64 = amount
        .parse()
        .map_err(|_| format!("invalid duration: {s}"))?;
    if n < 0.0 {
        return Err(format!("negative duration: {s}"));
    }
    let millis = (n * scale).round();
    if !millis.is_finite() || millis > u64::MAX as f64 {
        return Err(format!("duration out of range: {s}"));
    }
    Ok(Duration::from_millis(millis as u64))
}

/// A duration string or a millisecond count.
#[derive(Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Millis(u64),
    Text(String),
}

impl DurationValue {
    fn into_duration(self) -> Result<Duration, String> {
        match self {
            DurationValue::Millis(ms) => Ok(Duration::from_millis(ms)),
            DurationValue::Text(s) => parse_duration(&s),
        }
    }
}

/// Deserialize an optional duration string or millisecond count.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<DurationValue> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(v) => v
            .into_duration()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
