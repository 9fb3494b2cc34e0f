//! # Datastore Health Probe
//!
//! Contract for components that own a relational datastore connection pool.
//! A probe pings the datastore under a fixed one-second budget and reports
//! `UP` with pool statistics, or `DOWN` with no details. A `DOWN` result is
//! an ordinary outcome, not an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Details key holding the serialized [`PoolStats`].
pub const STATS_KEY: &str = "stats";

/// Availability of a datastore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Up => write!(f, "UP"),
            HealthStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// Result of a health probe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: HealthStatus,
    pub details: HashMap<String, Value>,
}

impl Health {
    /// Healthy result carrying the pool statistics under `stats`.
    pub fn up(stats: &PoolStats) -> Self {
        let mut details = HashMap::new();
        if let Ok(value) = serde_json::to_value(stats) {
            details.insert(STATS_KEY.to_string(), value);
        }
        Self {
            status: HealthStatus::Up,
            details,
        }
    }

    pub fn down() -> Self {
        Self {
            status: HealthStatus::Down,
            details: HashMap::new(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

/// Connection pool counters, mirroring what SQL pool drivers expose.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoolStats {
    pub max_open_connections: u32,
    pub open_connections: u32,
    pub in_use: u32,
    pub idle: u32,
    pub wait_count: u64,
    /// Total time blocked waiting for a connection, in nanoseconds.
    #[serde(rename = "WaitDuration")]
    pub wait_duration_ns: u64,
    pub max_idle_closed: u64,
    pub max_lifetime_closed: u64,
}

/// A relational datastore that can be probed for health.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Round-trips to the datastore.
    async fn ping(&self) -> anyhow::Result<()>;

    /// Current connection pool counters.
    fn stats(&self) -> PoolStats;

    /// Pings under [`crate::defaults::HEALTH_TIMEOUT`]. Errors and timeouts
    /// both report `DOWN`.
    async fn health_check(&self) -> Health {
        match tokio::time::timeout(crate::defaults::HEALTH_TIMEOUT, self.ping()).await {
            Ok(Ok(())) => Health::up(&self.stats()),
            Ok(Err(e)) => {
                debug!(error = %e, "datastore ping failed");
                Health::down()
            }
            Err(_) => {
                debug!(
                    timeout_ms = crate::defaults::HEALTH_TIMEOUT.as_millis() as u64,
                    "datastore ping timed out"
                );
                Health::down()
            }
        }
    }
}
