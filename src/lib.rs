//! # Service Logging Engine
//!
//! A structured logging engine for service runtimes. Request handlers,
//! datastore clients and outbound HTTP clients all log through one
//! [`Logger`], which renders every entry either as a JSON record or, when
//! standard output is a terminal, as a color-coded single line.
//!
//! ## Architecture Overview
//!
//! - `severity`: the ordered level scale with display names and colors
//! - `payload`: typed payloads for request, SQL, key-value and outbound-call
//!   logs, plus a generic JSON fallback
//! - `entry`: the immutable per-call record and its structured encoding
//! - `pretty`: one interactive formatter per payload variant
//! - `terminal` and `sink`: destinations and the once-only terminal probe
//! - `logger`: filtering, routing and mode dispatch
//! - `bridge`: forwards `tracing` events into a logger
//! - `health`: the datastore health probe contract
//!
//! ## Usage Example
//!
//! ```rust
//! use svc_logging::{infof, Logger, Severity, Sink, SqlLog};
//!
//! let (out, buffer) = Sink::buffer();
//! let logger = Logger::with_sinks(Severity::Info, out, Sink::discard());
//!
//! logger.debug("filtered out");
//! infof!(logger, "listening on port {}", 8000);
//! logger.info(SqlLog {
//!     kind: "Query".to_string(),
//!     query: "SELECT 1".to_string(),
//!     duration: 210,
//!     args: vec![],
//! });
//!
//! assert_eq!(buffer.lines().len(), 2);
//! ```

pub mod bridge;

/// Command-line interface for the `svc-log` binary
///
/// Parses global logger options (level, mode, silence) and the `emit` and
/// `pretty` subcommands, and converts them into a [`LoggerConfig`].
pub mod cli;

pub mod config;
pub mod entry;
pub mod health;
pub mod logger;
pub mod payload;

/// Interactive formatters
///
/// Colorized single-line layouts for each payload variant. Only used when
/// the logger is in interactive mode.
pub mod pretty;

pub mod severity;
pub mod sink;
pub mod terminal;

pub use bridge::LoggerLayer;
pub use config::{LoggerConfig, OutputMode};
pub use entry::{LogEntry, Message};
pub use health::{Datastore, Health, HealthStatus, PoolStats};
pub use logger::Logger;
pub use payload::{Payload, RedisLog, RequestLog, ServiceErrorLog, ServiceLog, SqlLog};
pub use severity::{ParseSeverityError, Severity};
pub use sink::{SharedBuffer, Sink};

/// The current version of the logging engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    use crate::config::OutputMode;
    use crate::severity::Severity;
    use std::time::Duration;

    /// Minimum severity when nothing is configured
    pub const LEVEL: Severity = Severity::Info;

    /// Rendering mode when nothing is configured
    pub const MODE: OutputMode = OutputMode::Auto;

    /// Environment variable holding the minimum severity
    pub const LEVEL_ENV: &str = "LOG_LEVEL";

    /// Environment variable forcing the rendering mode
    pub const MODE_ENV: &str = "LOG_MODE";

    /// Budget for a datastore health ping
    pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(1);
}
