// JSON wire format for GET /api/stats.
// Field names and sentinel strings are consumed by existing dashboards; keep them stable.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use super::Snapshot;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_CONNECTED: &str = "Not connected";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub timestamp: String,
    pub system: SystemSection,
    #[serde(rename = "openclaw")]
    pub service: ServiceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSection {
    pub hostname: String,
    pub uptime: String,
    pub cpu: CpuSection,
    pub memory: MemorySection,
    pub disk: DiskSection,
    pub network: NetworkSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuSection {
    pub usage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySection {
    pub used: String,
    pub total: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskSection {
    pub used: String,
    pub total: String,
    pub percent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSection {
    pub local_ip: String,
    pub tailscale_ip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    pub status: String,
    pub running: bool,
    pub pid: String,
    pub cpu: String,
    pub memory: String,
    pub model: String,
    #[serde(rename = "whatsapp")]
    pub channel_connected: bool,
}

impl From<&Snapshot> for StatsResponse {
    fn from(s: &Snapshot) -> Self {
        let (pid, cpu, memory) = match &s.service.process {
            Some(p) => (
                p.pid.clone(),
                p.cpu_percent.clone(),
                p.mem_percent.clone(),
            ),
            None => (NOT_AVAILABLE.into(), "0".into(), "0".into()),
        };
        StatsResponse {
            timestamp: s.captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            system: SystemSection {
                hostname: s.hostname.clone(),
                uptime: s.uptime_label.clone(),
                cpu: CpuSection {
                    usage: s.cpu_usage_percent,
                },
                memory: MemorySection {
                    used: s.memory.used_megabytes.clone(),
                    total: s.memory.total_megabytes.clone(),
                    percent: s.memory.used_percent,
                },
                disk: DiskSection {
                    used: s.disk.used_human.clone(),
                    total: s.disk.total_human.clone(),
                    percent: s.disk.used_percent_label.clone(),
                },
                network: NetworkSection {
                    local_ip: s
                        .network
                        .local_ip
                        .clone()
                        .unwrap_or_else(|| NOT_AVAILABLE.into()),
                    tailscale_ip: s
                        .network
                        .tailscale_ip
                        .clone()
                        .unwrap_or_else(|| NOT_CONNECTED.into()),
                },
            },
            service: ServiceSection {
                status: s.service.status.clone(),
                running: s.service.is_running(),
                pid,
                cpu,
                memory,
                model: s
                    .service
                    .model
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.into()),
                channel_connected: s.service.channel_connected,
            },
        }
    }
}
