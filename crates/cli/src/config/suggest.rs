// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Key name suggestions for config validation.

use std::path::Path;

use super::KNOWN_KEYS;

/// Suggest a config key for a typo.
pub fn suggest_key(unknown: &str) -> Option<&'static str> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    // Spellings carried over from editor settings
    let suggestion = match unknown {
        "ginkgoPath" | "ginkgo" | "path" | "binary" => Some("ginkgo_path"),
        "cacheTTL" | "ttl" | "cache" => Some("cache_ttl"),
        "testEnvFile" | "env_file" | "envFile" => Some("test_env_file"),
        "testEnvVars" | "env" | "testEnv" => Some("test_env"),
        "timeout" => Some("outline_timeout"),
        _ => None,
    };

    if suggestion.is_some() {
        return suggestion;
    }

    // Prefix matching (require at least 4 chars to avoid false positives)
    if unknown.len() >= 4 {
        for &name in KNOWN_KEYS {
            if name.starts_with(unknown) || unknown.starts_with(name) {
                return Some(name);
            }
        }
    }

    None
}

/// Warn about an unknown key, suggesting a known one when possible.
pub fn warn_unknown_key(path: &Path, key: &str) {
    match suggest_key(key) {
        Some(suggested) => eprintln!(
            "ginkgo-lens: warning: {}: unrecognized field `{}` (ignored). Did you mean `{}`?",
            path.display(),
            key,
            suggested
        ),
        None => eprintln!(
            "ginkgo-lens: warning: {}: unrecognized field `{}` (ignored)",
            path.display(),
            key
        ),
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
