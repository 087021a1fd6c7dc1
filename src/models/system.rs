// Host resource models (memory, disk, network)

/// Memory figures from `free -m`. Megabytes are kept as the tool printed them.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStats {
    pub used_megabytes: String,
    pub total_megabytes: String,
    /// Reported by the probe, not re-derived from used/total.
    pub used_percent: f64,
}

impl Default for MemoryStats {
    fn default() -> Self {
        Self {
            used_megabytes: "0".into(),
            total_megabytes: "0".into(),
            used_percent: 0.0,
        }
    }
}

/// Root filesystem usage from `df -h /`, human-readable and unnormalised.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskStats {
    pub used_human: String,
    pub total_human: String,
    /// Keeps the trailing `%`, e.g. "21%".
    pub used_percent_label: String,
}

impl Default for DiskStats {
    fn default() -> Self {
        Self {
            used_human: "0".into(),
            total_human: "0".into(),
            used_percent_label: "0%".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkAddresses {
    pub local_ip: Option<String>,
    /// None when the overlay client is missing or not connected.
    pub tailscale_ip: Option<String>,
}
