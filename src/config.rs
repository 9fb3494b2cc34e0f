//! Logger configuration.
//!
//! Settings come either from the command line (see [`crate::cli`]) or from
//! the process environment: `LOG_LEVEL` picks the minimum severity and
//! `LOG_MODE` forces structured or interactive output.

use crate::severity::Severity;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How log entries are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Interactive when standard output is a terminal, structured otherwise
    #[default]
    Auto,

    /// One JSON record per line
    Structured,

    /// Colorized single lines
    Interactive,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Auto => write!(f, "auto"),
            OutputMode::Structured => write!(f, "structured"),
            OutputMode::Interactive => write!(f, "interactive"),
        }
    }
}

/// Everything needed to construct a [`crate::Logger`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub level: Severity,
    pub mode: OutputMode,
    /// Discard all output regardless of level and mode.
    pub silent: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: crate::defaults::LEVEL,
            mode: crate::defaults::MODE,
            silent: false,
        }
    }
}

impl LoggerConfig {
    /// Reads `LOG_LEVEL` and `LOG_MODE` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup. Unknown or missing values
    /// fall back to the defaults instead of failing startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(crate::defaults::LEVEL_ENV)
            .and_then(|value| value.parse().ok())
            .unwrap_or(crate::defaults::LEVEL);
        let mode = lookup(crate::defaults::MODE_ENV)
            .and_then(|value| OutputMode::from_str(value.trim(), true).ok())
            .unwrap_or(crate::defaults::MODE);

        Self {
            level,
            mode,
            silent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LoggerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, Severity::Info);
        assert_eq!(config.mode, OutputMode::Auto);
    }

    #[test]
    fn test_reads_level_and_mode() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_MODE", "Structured"),
        ]));
        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.mode, OutputMode::Structured);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "chatty"),
            ("LOG_MODE", "fancy"),
        ]));
        assert_eq!(config.level, Severity::Info);
        assert_eq!(config.mode, OutputMode::Auto);
    }

    #[test]
    fn test_output_mode_display() {
        assert_eq!(OutputMode::Auto.to_string(), "auto");
        assert_eq!(OutputMode::Structured.to_string(), "structured");
        assert_eq!(OutputMode::Interactive.to_string(), "interactive");
    }
}
