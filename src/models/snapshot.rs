// Per-request snapshot of host and service state

use chrono::{DateTime, Utc};

use super::{DiskStats, MemoryStats, NetworkAddresses, ServiceStats};

/// Built once per `collect()` call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    pub hostname: String,
    /// None when `top` failed or its output could not be parsed.
    pub cpu_usage_percent: Option<f64>,
    pub memory: MemoryStats,
    pub disk: DiskStats,
    pub uptime_label: String,
    pub network: NetworkAddresses,
    pub service: ServiceStats,
}
