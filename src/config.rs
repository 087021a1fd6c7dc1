use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Deadline shared by the primary probe batch (cpu, memory, disk, ...).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Deadline shared by the journal probes that run after the primary batch.
    #[serde(default = "default_log_probe_timeout_ms")]
    pub log_probe_timeout_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            log_probe_timeout_ms: default_log_probe_timeout_ms(),
        }
    }
}

fn default_probe_timeout_ms() -> u64 {
    3000
}

fn default_log_probe_timeout_ms() -> u64 {
    2000
}

/// The monitored background service and the log heuristics used to inspect it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Pass `--user` to systemctl and journalctl.
    #[serde(default = "default_user_scope")]
    pub user_scope: bool,
    /// Substring matched against the `ps` command column. Falls back to `unit`.
    #[serde(default)]
    pub process_pattern: Option<String>,
    #[serde(default = "default_model_marker")]
    pub model_marker: String,
    #[serde(default = "default_model_log_lines")]
    pub model_log_lines: u32,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    #[serde(default = "default_channel_marker")]
    pub channel_marker: String,
    #[serde(default = "default_channel_log_lines")]
    pub channel_log_lines: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            user_scope: default_user_scope(),
            process_pattern: None,
            model_marker: default_model_marker(),
            model_log_lines: default_model_log_lines(),
            channel_name: default_channel_name(),
            channel_marker: default_channel_marker(),
            channel_log_lines: default_channel_log_lines(),
        }
    }
}

impl ServiceConfig {
    pub fn process_pattern(&self) -> &str {
        self.process_pattern.as_deref().unwrap_or(&self.unit)
    }
}

fn default_unit() -> String {
    "openclaw-gateway".into()
}

fn default_user_scope() -> bool {
    true
}

fn default_model_marker() -> String {
    "agent model:".into()
}

fn default_model_log_lines() -> u32 {
    100
}

fn default_channel_name() -> String {
    "whatsapp".into()
}

fn default_channel_marker() -> String {
    "listening".into()
}

fn default_channel_log_lines() -> u32 {
    50
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// Display name reported instead of probing `hostname`.
    #[serde(default)]
    pub hostname: Option<String>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.collector.probe_timeout_ms > 0,
            "collector.probe_timeout_ms must be > 0, got {}",
            self.collector.probe_timeout_ms
        );
        anyhow::ensure!(
            self.collector.log_probe_timeout_ms > 0,
            "collector.log_probe_timeout_ms must be > 0, got {}",
            self.collector.log_probe_timeout_ms
        );
        anyhow::ensure!(
            !self.service.unit.trim().is_empty(),
            "service.unit must be non-empty"
        );
        anyhow::ensure!(
            !self.service.process_pattern().trim().is_empty(),
            "service.process_pattern must be non-empty"
        );
        anyhow::ensure!(
            !self.service.model_marker.trim().is_empty(),
            "service.model_marker must be non-empty"
        );
        anyhow::ensure!(
            !self.service.channel_name.trim().is_empty(),
            "service.channel_name must be non-empty"
        );
        anyhow::ensure!(
            !self.service.channel_marker.trim().is_empty(),
            "service.channel_marker must be non-empty"
        );
        anyhow::ensure!(
            self.service.model_log_lines > 0,
            "service.model_log_lines must be > 0, got {}",
            self.service.model_log_lines
        );
        anyhow::ensure!(
            self.service.channel_log_lines > 0,
            "service.channel_log_lines must be > 0, got {}",
            self.service.channel_log_lines
        );
        if let Some(name) = &self.dashboard.hostname {
            anyhow::ensure!(
                !name.trim().is_empty(),
                "dashboard.hostname must be non-empty when set"
            );
        }
        Ok(())
    }
}
