//! # Log Entry
//!
//! One immutable record per logging call. The structured encoding lives here
//! because it is a property of the entry itself: it never looks at the
//! payload's shape and never depends on the destination.

use crate::payload::Payload;
use crate::severity::Severity;
use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Field name carrying the severity in structured records.
pub const LEVEL_FIELD: &str = "Level";
/// Field name carrying the capture timestamp in structured records.
pub const TIME_FIELD: &str = "time";
/// Field name carrying the payload in structured records.
pub const MESSAGE_FIELD: &str = "message";

/// What a logging call carried: one value, a sequence of values, or the
/// output of a format template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Single(Payload),
    Sequence(Vec<Payload>),
    Formatted(String),
}

impl Message {
    /// Generic string form used when no dedicated formatter applies.
    pub fn to_plain_string(&self) -> String {
        match self {
            Message::Single(payload) => payload.to_string(),
            Message::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                format!("[{}]", parts.join(" "))
            }
            Message::Formatted(text) => text.clone(),
        }
    }
}

// Formatted strings come back as single string payloads; both render the same.
impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                Message::Sequence(items.into_iter().map(Payload::recognize).collect())
            }
            other => Message::Single(Payload::recognize(other)),
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

macro_rules! message_from_single {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(value: $ty) -> Self {
                    Message::Single(Payload::from(value))
                }
            }
        )*
    };
}

message_from_single!(
    Payload,
    crate::payload::RequestLog,
    crate::payload::SqlLog,
    crate::payload::RedisLog,
    crate::payload::ServiceLog,
    crate::payload::ServiceErrorLog,
    Value,
    &str,
    String,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
);

impl From<Vec<Payload>> for Message {
    fn from(items: Vec<Payload>) -> Self {
        Message::Sequence(items)
    }
}

impl From<Vec<Value>> for Message {
    fn from(items: Vec<Value>) -> Self {
        Message::Sequence(items.into_iter().map(Payload::Generic).collect())
    }
}

/// A rendered-once record: severity, capture time, payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "Level")]
    level: Severity,
    time: DateTime<Local>,
    message: Message,
}

impl LogEntry {
    /// Captures an entry stamped with the current local time.
    pub fn new(level: Severity, message: impl Into<Message>) -> Self {
        Self::at(level, Local::now(), message)
    }

    /// Builds an entry with an explicit timestamp.
    pub fn at(level: Severity, time: DateTime<Local>, message: impl Into<Message>) -> Self {
        Self {
            level,
            time,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.level
    }

    pub fn time(&self) -> &DateTime<Local> {
        &self.time
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Encodes the entry as one JSON object followed by a newline.
    pub fn to_json_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.short_name(), self.message)
    }
}
