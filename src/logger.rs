//! # Logger
//!
//! The entry point every subsystem logs through. A logger is built once and
//! passed by value (it is cheap to clone) to the components that need it.
//!
//! ## Call Path
//!
//! 1. Drop the call if its severity is below the configured minimum, before
//!    any formatting happens.
//! 2. Capture a [`LogEntry`] stamped with the current time.
//! 3. Route ERROR and above to the error sink, everything else to the normal
//!    sink.
//! 4. Render as a JSON record, or as a colorized line when the normal sink
//!    was a terminal at construction, and write it synchronously.
//!
//! Nothing is returned and nothing can fail from the caller's point of view.

use crate::config::{LoggerConfig, OutputMode};
use crate::entry::{LogEntry, Message};
use crate::pretty;
use crate::severity::Severity;
use crate::sink::Sink;
use std::fmt;

/// Severity-filtered logger writing to a normal and an error sink.
#[derive(Clone, Debug)]
pub struct Logger {
    level: Severity,
    normal: Sink,
    error: Sink,
    interactive: bool,
}

impl Logger {
    /// Logger bound to standard output and standard error. Interactive mode
    /// is decided here, once, from standard output.
    pub fn new(level: Severity) -> Self {
        Self::with_sinks(level, Sink::stdout(), Sink::stderr())
    }

    /// Logger that discards everything. Used where log lines would get in
    /// the way of a tool's primary output.
    pub fn silent() -> Self {
        Self::with_sinks(Severity::Debug, Sink::discard(), Sink::discard())
    }

    /// Logger over explicit sinks; interactivity follows the normal sink.
    pub fn with_sinks(level: Severity, normal: Sink, error: Sink) -> Self {
        let interactive = normal.is_interactive();
        Self {
            level,
            normal,
            error,
            interactive,
        }
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        if config.silent {
            return Self::silent();
        }

        let logger = Self::new(config.level);
        match config.mode {
            OutputMode::Auto => logger,
            OutputMode::Structured => logger.with_interactive(false),
            OutputMode::Interactive => logger.with_interactive(true),
        }
    }

    /// Overrides the rendering mode chosen at construction.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether a call at `severity` would produce output.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level && !self.sink_for(severity).is_discard()
    }

    fn sink_for(&self, severity: Severity) -> &Sink {
        if severity.is_error() {
            &self.error
        } else {
            &self.normal
        }
    }

    /// Logs a single payload or a sequence of payloads at `severity`.
    pub fn log_at(&self, severity: Severity, message: impl Into<Message>) {
        if !self.enabled(severity) {
            return;
        }
        self.write(&LogEntry::new(severity, message));
    }

    /// Logs the output of a format template at `severity`. The template is
    /// only expanded once the severity has passed the filter.
    pub fn log_fmt_at(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }

        let message = match args.as_str() {
            Some("") => Message::Sequence(Vec::new()),
            _ => Message::Formatted(args.to_string()),
        };
        self.write(&LogEntry::new(severity, message));
    }

    /// Writes an already captured entry, keeping its timestamp.
    pub fn emit(&self, entry: &LogEntry) {
        if !self.enabled(entry.severity()) {
            return;
        }
        self.write(entry);
    }

    /// Renders an entry the way this logger would write it.
    pub fn render(&self, entry: &LogEntry) -> Vec<u8> {
        if self.interactive {
            pretty::render(entry).into_bytes()
        } else {
            entry.to_json_line().unwrap_or_default()
        }
    }

    fn write(&self, entry: &LogEntry) {
        let line = self.render(entry);
        if line.is_empty() {
            return;
        }
        self.sink_for(entry.severity()).write_line(&line);
    }

    /// Logs at DEBUG.
    pub fn debug(&self, message: impl Into<Message>) {
        self.log_at(Severity::Debug, message);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Severity::Debug, args);
    }

    /// Logs at INFO.
    pub fn info(&self, message: impl Into<Message>) {
        self.log_at(Severity::Info, message);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Severity::Info, args);
    }

    /// Alias of [`Logger::info`].
    pub fn log(&self, message: impl Into<Message>) {
        self.info(message);
    }

    /// Alias of [`Logger::infof`].
    pub fn logf(&self, args: fmt::Arguments<'_>) {
        self.infof(args);
    }

    /// Logs at NOTICE.
    pub fn notice(&self, message: impl Into<Message>) {
        self.log_at(Severity::Notice, message);
    }

    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Severity::Notice, args);
    }

    /// Logs at WARN.
    pub fn warn(&self, message: impl Into<Message>) {
        self.log_at(Severity::Warn, message);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Severity::Warn, args);
    }

    /// Logs at ERROR, on the error sink.
    pub fn error(&self, message: impl Into<Message>) {
        self.log_at(Severity::Error, message);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Severity::Error, args);
    }

    /// Logs at FATAL, on the error sink. Does not terminate the process.
    pub fn fatal(&self, message: impl Into<Message>) {
        self.log_at(Severity::Fatal, message);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt_at(Severity::Fatal, args);
    }
}

/// Format-string logging macros, e.g. `infof!(logger, "listening on {}", port)`.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debugf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)*) => {
        $logger.infof(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.logf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! noticef {
    ($logger:expr, $($arg:tt)*) => {
        $logger.noticef(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warnf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.errorf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)*) => {
        $logger.fatalf(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedBuffer;
    use serde_json::{json, Value};
    use std::cell::Cell;

    fn buffered(level: Severity) -> (Logger, SharedBuffer, SharedBuffer) {
        let (normal, out) = Sink::buffer();
        let (error, err) = Sink::buffer();
        (Logger::with_sinks(level, normal, error), out, err)
    }

    fn record(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_below_minimum_is_dropped() {
        let (logger, out, err) = buffered(Severity::Info);
        logger.debug("x");
        crate::debugf!(logger, "x={}", 1);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_filtered_call_never_formats() {
        struct Counting<'a>(&'a Cell<u32>);
        impl fmt::Display for Counting<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.set(self.0.get() + 1);
                f.write_str("counted")
            }
        }

        let calls = Cell::new(0);
        let (logger, _, _) = buffered(Severity::Error);
        crate::infof!(logger, "{}", Counting(&calls));
        assert_eq!(calls.get(), 0);
        crate::errorf!(logger, "{}", Counting(&calls));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_routing_by_severity() {
        let (logger, out, err) = buffered(Severity::Debug);
        logger.debug("d");
        logger.info("i");
        logger.notice("n");
        logger.warn("w");
        logger.error("e");
        logger.fatal("f");

        let normal: Vec<String> = out.lines().iter().map(|l| record(l)["message"].to_string()).collect();
        let errors: Vec<String> = err.lines().iter().map(|l| record(l)["message"].to_string()).collect();
        assert_eq!(normal, vec!["\"d\"", "\"i\"", "\"n\"", "\"w\""]);
        assert_eq!(errors, vec!["\"e\"", "\"f\""]);
    }

    #[test]
    fn test_log_aliases_info() {
        let (logger, out, _) = buffered(Severity::Info);
        logger.log("plain");
        crate::logf!(logger, "formatted {}", 2);
        let lines = out.lines();
        assert_eq!(record(&lines[0])["Level"], "INFO");
        assert_eq!(record(&lines[1])["Level"], "INFO");
        assert_eq!(record(&lines[1])["message"], "formatted 2");
    }

    #[test]
    fn test_message_shapes() {
        let (logger, out, _) = buffered(Severity::Debug);
        logger.info(json!({"k": [1, 2]}));
        logger.info(Vec::<Value>::new());
        logger.info(vec![json!("a"), json!(1)]);
        crate::infof!(logger, "n={}", 5);
        logger.infof(format_args!(""));

        let lines: Vec<Value> = out.lines().iter().map(|l| record(l)).collect();
        assert_eq!(lines[0]["message"], json!({"k": [1, 2]}));
        assert_eq!(lines[1]["message"], json!([]));
        assert_eq!(lines[2]["message"], json!(["a", 1]));
        assert_eq!(lines[3]["message"], json!("n=5"));
        assert_eq!(lines[4]["message"], json!([]));
    }

    #[test]
    fn test_interactive_override() {
        let (logger, out, _) = buffered(Severity::Info);
        assert!(!logger.is_interactive());
        let logger = logger.with_interactive(true);
        logger.info("hi");
        let text = out.contents();
        assert!(text.starts_with("\u{1b}[38;5;6mINFO"));
        assert!(text.ends_with("] hi\n"));
    }

    #[test]
    fn test_silent_logger_is_disabled() {
        let logger = Logger::silent();
        for severity in Severity::ALL {
            assert!(!logger.enabled(severity));
        }
        logger.fatal("nothing happens");
    }

    #[test]
    fn test_from_config_modes() {
        let config = LoggerConfig {
            level: Severity::Warn,
            mode: OutputMode::Interactive,
            silent: false,
        };
        let logger = Logger::from_config(&config);
        assert_eq!(logger.level(), Severity::Warn);
        assert!(logger.is_interactive());

        let structured = Logger::from_config(&LoggerConfig {
            mode: OutputMode::Structured,
            ..config.clone()
        });
        assert!(!structured.is_interactive());

        let silent = Logger::from_config(&LoggerConfig { silent: true, ..config });
        assert!(!silent.enabled(Severity::Fatal));
    }

    #[test]
    fn test_emit_keeps_timestamp_and_filters() {
        let (logger, out, _) = buffered(Severity::Info);
        let entry = LogEntry::new(Severity::Info, "kept");
        logger.emit(&entry);
        logger.emit(&LogEntry::new(Severity::Debug, "dropped"));

        let lines = out.lines();
        assert_eq!(lines.len(), 1);
        let decoded: LogEntry = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(decoded.time(), entry.time());
    }

    #[test]
    fn test_render_is_repeatable() {
        let (logger, _, _) = buffered(Severity::Info);
        let entry = LogEntry::new(Severity::Info, json!({"a": 1}));
        assert_eq!(logger.render(&entry), logger.render(&entry));
        let pretty = logger.with_interactive(true);
        assert_eq!(pretty.render(&entry), pretty.render(&entry));
    }

    #[test]
    fn test_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
