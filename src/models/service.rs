// Monitored background service models

/// Row from the process table for the service's main process.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceProcess {
    pub pid: String,
    pub cpu_percent: String,
    pub mem_percent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceStats {
    /// Service manager state, passed through as-is ("active", "inactive", "failed", ...).
    pub status: String,
    pub process: Option<ServiceProcess>,
    pub model: Option<String>,
    pub channel_connected: bool,
}

impl Default for ServiceStats {
    fn default() -> Self {
        Self {
            status: "inactive".into(),
            process: None,
            model: None,
            channel_connected: false,
        }
    }
}

impl ServiceStats {
    pub fn is_running(&self) -> bool {
        self.status == "active"
    }
}
