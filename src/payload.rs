//! # Payload Variants
//!
//! The closed set of log payloads that interactive rendering knows how to lay
//! out, plus a generic arm that accepts any JSON value. Subsystems at the
//! boundary (request middleware, datastore clients, outbound HTTP clients)
//! build the typed variant directly; ad-hoc calls land in [`Payload::Generic`].
//!
//! Typed payloads serialize as their plain field objects without a variant
//! tag, so structured records carry exactly the fields a consumer expects.
//! [`Payload::recognize`] reverses that by inspecting an object's shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Instant;

/// Query name the key-value client uses for batched commands.
pub const PIPELINE_QUERY: &str = "pipeline";

/// Inbound HTTP request handled by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLog {
    pub id: String,
    pub method: String,
    pub uri: String,
    /// Response status code.
    pub response: u16,
    /// Handler latency in microseconds.
    pub response_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Relational datastore query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlLog {
    /// Query category, e.g. `Query`, `Exec`, `Begin`.
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    /// Execution time in microseconds.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl SqlLog {
    /// Builds a query log whose duration runs from `started` until now.
    pub fn timed(kind: impl Into<String>, query: impl Into<String>, started: Instant) -> Self {
        Self {
            kind: kind.into(),
            query: query.into(),
            duration: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

/// Key-value store command, or a batch of commands sent as one pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisLog {
    pub query: String,
    /// Round-trip time in microseconds.
    pub duration: u64,
    pub args: Vec<Value>,
}

impl RedisLog {
    pub fn is_pipeline(&self) -> bool {
        self.query == PIPELINE_QUERY
    }
}

/// Outbound call to another service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLog {
    pub correlation_id: String,
    pub http_method: String,
    pub uri: String,
    pub response_code: u16,
    /// Call latency in microseconds.
    #[serde(rename = "latency")]
    pub response_time: u64,
}

/// Outbound call that failed, with the error reported by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceErrorLog {
    #[serde(flatten)]
    pub log: ServiceLog,
    pub error_message: String,
}

/// A single renderable log payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Request(RequestLog),
    Sql(SqlLog),
    Redis(RedisLog),
    Service(ServiceLog),
    ServiceError(ServiceErrorLog),
    Generic(Value),
}

impl Payload {
    /// Infers the payload variant from the shape of a JSON value.
    ///
    /// More specific shapes are tried first: an outbound error log also
    /// satisfies the outbound log shape, and a relational log is only told
    /// apart from a key-value log by its `type` field. A shape only matches
    /// when the typed log encodes back to the very same object, so extra keys
    /// keep the value verbatim as [`Payload::Generic`].
    pub fn recognize(value: Value) -> Self {
        if !value.is_object() {
            return Payload::Generic(value);
        }

        if let Some(log) = exact_shape::<ServiceErrorLog>(&value) {
            return Payload::ServiceError(log);
        }
        if let Some(log) = exact_shape::<ServiceLog>(&value) {
            return Payload::Service(log);
        }
        if let Some(log) = exact_shape::<RequestLog>(&value) {
            return Payload::Request(log);
        }
        if let Some(log) = exact_shape::<SqlLog>(&value) {
            return Payload::Sql(log);
        }
        if let Some(log) = exact_shape::<RedisLog>(&value) {
            return Payload::Redis(log);
        }

        Payload::Generic(value)
    }
}

/// Decodes `value` as `T` only if nothing is dropped or rewritten on the way.
fn exact_shape<T: DeserializeOwned + Serialize>(value: &Value) -> Option<T> {
    let log = T::deserialize(value).ok()?;
    match serde_json::to_value(&log) {
        Ok(encoded) if encoded == *value => Some(log),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Payload::recognize)
    }
}

/// Generic string form: strings verbatim, everything else as compact JSON.
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Generic(value) => f.write_str(&value_to_string(value)),
            other => match serde_json::to_string(other) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{:?}", other),
            },
        }
    }
}

/// Renders a JSON value the way a log line shows an argument.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

macro_rules! payload_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Payload {
                fn from(log: $ty) -> Self {
                    Payload::$variant(log)
                }
            }
        )*
    };
}

payload_from_variant! {
    Request => RequestLog,
    Sql => SqlLog,
    Redis => RedisLog,
    Service => ServiceLog,
    ServiceError => ServiceErrorLog,
    Generic => Value,
}

macro_rules! payload_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Payload {
                fn from(value: $ty) -> Self {
                    Payload::Generic(Value::from(value))
                }
            }
        )*
    };
}

payload_from_scalar!(&str, String, bool, i32, i64, u32, u64, f64);
