//! Color support detection.
//!
//! The encoders always emit escape codes. This probe is for callers that want
//! to strip them when stdout cannot show color (see
//! [`crate::presets::print_styled`]).

use std::io::IsTerminal;

/// Environment variables consulted by [`supports_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub no_color: Option<String>,
    pub force_color: Option<String>,
    pub colorterm: Option<String>,
    pub term: Option<String>,
}

impl EnvSettings {
    /// Snapshot of the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            no_color: std::env::var("NO_COLOR").ok(),
            force_color: std::env::var("FORCE_COLOR").ok(),
            colorterm: std::env::var("COLORTERM").ok(),
            term: std::env::var("TERM").ok(),
        }
    }
}

/// Whether stdout should receive color.
#[must_use]
pub fn supports_color() -> bool {
    supports_color_with(&EnvSettings::from_env(), std::io::stdout().is_terminal())
}

/// Whether stderr should receive color.
#[must_use]
pub fn stderr_supports_color() -> bool {
    supports_color_with(&EnvSettings::from_env(), std::io::stderr().is_terminal())
}

/// Decide color support from explicit settings.
///
/// In order: a non-empty `NO_COLOR` disables color, a `FORCE_COLOR` other than
/// empty or `0` enables it, `TERM=dumb` (or `unknown`) disables it, a set
/// `COLORTERM` enables it, and otherwise color follows `is_tty`.
#[must_use]
pub fn supports_color_with(env: &EnvSettings, is_tty: bool) -> bool {
    // https://no-color.org/
    if env.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
        return false;
    }

    if env
        .force_color
        .as_deref()
        .map(str::trim)
        .is_some_and(|value| !value.is_empty() && value != "0")
    {
        return true;
    }

    let term = env
        .term
        .as_deref()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();
    if term == "dumb" || term == "unknown" {
        return false;
    }

    if env.colorterm.as_deref().is_some_and(|value| !value.trim().is_empty()) {
        return true;
    }

    is_tty
}
