use crate::config::{LoggerConfig, OutputMode};
use crate::severity::Severity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// svc-log - emit and view service log records
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Minimum severity to emit (debug, info, notice, warn, error, fatal)
    #[clap(short = 'l', long, env = "LOG_LEVEL", default_value_t = crate::defaults::LEVEL, help_heading = "Logger Options")]
    pub level: Severity,

    /// Output rendering mode
    #[clap(short = 'm', long, value_enum, env = "LOG_MODE", default_value_t = crate::defaults::MODE, help_heading = "Logger Options")]
    pub mode: OutputMode,

    /// Discard all log output
    #[clap(long, default_value_t = false, help_heading = "Logger Options")]
    pub silent: bool,

    #[clap(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log one message, or a sequence of messages, at the given severity
    Emit {
        /// Severity of the entry
        severity: Severity,

        /// Message text; several values are logged as one sequence
        #[clap(required = true, num_args = 1..)]
        messages: Vec<String>,

        /// Parse each message as JSON and recognize known payload shapes
        #[clap(long, default_value_t = false)]
        json: bool,
    },

    /// Re-render structured records as interactive lines
    Pretty {
        /// File of JSON records, one per line (standard input if omitted)
        input: Option<PathBuf>,
    },
}

impl From<&Args> for LoggerConfig {
    fn from(args: &Args) -> Self {
        Self {
            level: args.level,
            mode: args.mode,
            silent: args.silent,
        }
    }
}
