//! Bridge from the `tracing` ecosystem into a [`Logger`].
//!
//! Libraries underneath the service report through `tracing` macros. The
//! [`LoggerLayer`] turns each of their events into a formatted entry on the
//! service logger, so a process has a single output format no matter where a
//! line originated.

use crate::entry::Message;
use crate::logger::Logger;
use crate::severity::Severity;
use std::fmt::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A tracing layer that forwards events to a [`Logger`].
#[derive(Clone, Debug)]
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

/// Maps a tracing level onto the severity scale. TRACE has no counterpart
/// and is folded into DEBUG.
pub fn severity_for(level: Level) -> Severity {
    match level {
        Level::TRACE | Level::DEBUG => Severity::Debug,
        Level::INFO => Severity::Info,
        Level::WARN => Severity::Warn,
        Level::ERROR => Severity::Error,
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let severity = severity_for(*event.metadata().level());
        if !self.logger.enabled(severity) {
            return;
        }

        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);
        self.logger
            .log_at(severity, Message::Formatted(visitor.finish()));
    }
}

/// Collects the `message` field plus any other fields as `key=value` pairs.
#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: String,
}

impl FieldCollector {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}
