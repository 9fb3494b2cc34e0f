//! # Severity Scale
//!
//! Ordered log levels with the display attributes used by interactive
//! rendering. Ordering is derived from declaration order, so comparisons
//! always go through the discriminant and never through the name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Log severity, ordered from least to most important.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warn,
    Error,
    Fatal,
}

/// Returned when a severity name does not match any level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}'")]
pub struct ParseSeverityError(pub String);

impl Severity {
    /// Every level in ascending order.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Canonical upper-case name, as written in structured records.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Four-character tag shown at the start of interactive lines.
    pub fn short_name(self) -> &'static str {
        &self.name()[..4]
    }

    /// ANSI 256-color palette index for the level tag.
    pub fn color(self) -> u8 {
        match self {
            Severity::Error | Severity::Fatal => 160,
            Severity::Warn | Severity::Notice => 220,
            Severity::Info => 6,
            Severity::Debug => 8,
        }
    }

    /// Whether entries at this level belong on the error sink.
    pub fn is_error(self) -> bool {
        self >= Severity::Error
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Severity::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_monotonic() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_short_names_are_four_chars() {
        let shorts: Vec<&str> = Severity::ALL.iter().map(|s| s.short_name()).collect();
        assert_eq!(shorts, vec!["DEBU", "INFO", "NOTI", "WARN", "ERRO", "FATA"]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!(" Warn ".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_error_threshold() {
        assert!(!Severity::Warn.is_error());
        assert!(Severity::Error.is_error());
        assert!(Severity::Fatal.is_error());
    }

    #[test]
    fn test_serializes_as_upper_case_name() {
        assert_eq!(serde_json::to_string(&Severity::Notice).unwrap(), "\"NOTICE\"");
        let parsed: Severity = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(parsed, Severity::Error);
    }
}
