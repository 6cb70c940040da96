// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `NO_COLOR` set → no color
//! 2. `COLOR` set → color
//! 3. otherwise color only on a terminal outside CI

use std::io::IsTerminal;

use termcolor::ColorChoice;

use crate::env;

/// Resolve color choice from environment variables.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` disables color when
/// set to any value, including the empty string.
pub fn resolve_color() -> ColorChoice {
    choose(
        env::no_color(),
        env::force_color(),
        std::io::stdout().is_terminal(),
        env::is_ci(),
    )
}

fn choose(no_color: bool, force_color: bool, terminal: bool, ci: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    if force_color {
        return ColorChoice::Always;
    }
    if !terminal || ci {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for outline and result output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Bold node label.
    pub fn name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Dimmed identity key.
    pub fn key() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Red "FAIL" indicator.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Green "PASS" indicator.
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Yellow "SKIP" indicator.
    pub fn skip() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        spec
    }

    /// Cyan "RUNNING" indicator.
    pub fn running() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
