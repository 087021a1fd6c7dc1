// Snapshot collector: fan out the probes, tolerate failures, assemble one snapshot

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, instrument, warn};

use crate::config::AppConfig;
use crate::models::{NetworkAddresses, ServiceStats, Snapshot};
use crate::probe::{ProbeError, ProbeRunner, ProbeSpec, parse};

/// Probe names, as carried in `ProbeSpec::name` and in log fields.
pub mod names {
    pub const CPU: &str = "cpu";
    pub const MEMORY: &str = "memory";
    pub const DISK: &str = "disk";
    pub const UPTIME: &str = "uptime";
    pub const LOCAL_IP: &str = "local_ip";
    pub const TAILSCALE_IP: &str = "tailscale_ip";
    pub const SERVICE_STATE: &str = "service_state";
    pub const SERVICE_PROCESS: &str = "service_process";
    pub const HOSTNAME: &str = "hostname";
    pub const SERVICE_MODEL: &str = "service_model";
    pub const SERVICE_CHANNEL: &str = "service_channel";
}

const UNKNOWN_HOSTNAME: &str = "unknown";
const UNKNOWN_UPTIME: &str = "N/A";
const INACTIVE: &str = "inactive";

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("process spawning unavailable: all {attempted} probes failed to start")]
    Unavailable { attempted: usize },
}

/// Descriptors for every probe, built once from config.
#[derive(Debug, Clone)]
struct ProbeSet {
    cpu: ProbeSpec,
    memory: ProbeSpec,
    disk: ProbeSpec,
    uptime: ProbeSpec,
    local_ip: ProbeSpec,
    tailscale_ip: ProbeSpec,
    service_state: ProbeSpec,
    service_process: ProbeSpec,
    /// None when the display name is configured.
    hostname: Option<ProbeSpec>,
    service_model: ProbeSpec,
    service_channel: ProbeSpec,
}

impl ProbeSet {
    fn from_config(config: &AppConfig) -> Self {
        let primary = Duration::from_millis(config.collector.probe_timeout_ms);
        let logs = Duration::from_millis(config.collector.log_probe_timeout_ms);
        let service = &config.service;
        let scope: &[&str] = if service.user_scope { &["--user"] } else { &[] };

        let mut is_active = scope.to_vec();
        is_active.extend(["is-active", service.unit.as_str()]);

        let journal = |name: &'static str, lines: u32| {
            let lines = lines.to_string();
            let mut args = scope.to_vec();
            args.extend(["-u", service.unit.as_str(), "-n", lines.as_str(), "--no-pager"]);
            ProbeSpec::new(name, "journalctl", &args, logs)
        };

        Self {
            cpu: ProbeSpec::new(names::CPU, "top", &["-bn1"], primary),
            memory: ProbeSpec::new(names::MEMORY, "free", &["-m"], primary),
            disk: ProbeSpec::new(names::DISK, "df", &["-h", "/"], primary),
            uptime: ProbeSpec::new(names::UPTIME, "uptime", &["-p"], primary),
            local_ip: ProbeSpec::new(names::LOCAL_IP, "hostname", &["-I"], primary),
            tailscale_ip: ProbeSpec::new(
                names::TAILSCALE_IP,
                "tailscale",
                &["ip", "-4"],
                primary,
            ),
            service_state: ProbeSpec::new(
                names::SERVICE_STATE,
                "systemctl",
                &is_active,
                primary,
            ),
            service_process: ProbeSpec::new(names::SERVICE_PROCESS, "ps", &["aux"], primary),
            hostname: match config.dashboard.hostname {
                Some(_) => None,
                None => Some(ProbeSpec::new(names::HOSTNAME, "hostname", &[], primary)),
            },
            service_model: journal(names::SERVICE_MODEL, service.model_log_lines),
            service_channel: journal(names::SERVICE_CHANNEL, service.channel_log_lines),
        }
    }
}

/// Runs the probe set against a `ProbeRunner` and builds snapshots.
///
/// Holds no per-call state; overlapping `collect()` calls are independent.
pub struct Collector {
    runner: Arc<dyn ProbeRunner>,
    probes: ProbeSet,
    primary_timeout: Duration,
    log_timeout: Duration,
    display_hostname: Option<String>,
    process_pattern: String,
    model_marker: String,
    channel_name: String,
    channel_marker: String,
}

impl Collector {
    pub fn new(runner: Arc<dyn ProbeRunner>, config: &AppConfig) -> Self {
        Self {
            runner,
            probes: ProbeSet::from_config(config),
            primary_timeout: Duration::from_millis(config.collector.probe_timeout_ms),
            log_timeout: Duration::from_millis(config.collector.log_probe_timeout_ms),
            display_hostname: config.dashboard.hostname.clone(),
            process_pattern: config.service.process_pattern().to_string(),
            model_marker: config.service.model_marker.clone(),
            channel_name: config.service.channel_name.clone(),
            channel_marker: config.service.channel_marker.clone(),
        }
    }

    /// Collect one snapshot.
    ///
    /// The primary probes run concurrently against one shared deadline, then the
    /// two journal probes run concurrently against a second one. Any probe that
    /// fails or times out falls back to its field defaults. Only when every
    /// primary probe failed to even start is the whole collection an error.
    #[instrument(skip(self), fields(operation = "collect"))]
    pub async fn collect(&self) -> Result<Snapshot, CollectionError> {
        let started = Instant::now();
        let captured_at = Utc::now();
        let p = &self.probes;

        let deadline = started + self.primary_timeout;
        let hostname_probe = async {
            match &p.hostname {
                Some(spec) => Some(self.run(spec, deadline).await),
                None => None,
            }
        };
        let (
            cpu,
            memory,
            disk,
            uptime,
            local_ip,
            tailscale_ip,
            state,
            process,
            hostname,
        ) = tokio::join!(
            self.run(&p.cpu, deadline),
            self.run(&p.memory, deadline),
            self.run(&p.disk, deadline),
            self.run(&p.uptime, deadline),
            self.run(&p.local_ip, deadline),
            self.run(&p.tailscale_ip, deadline),
            self.run(&p.service_state, deadline),
            self.run(&p.service_process, deadline),
            hostname_probe,
        );

        let mut primary: Vec<&Result<String, ProbeError>> = vec![
            &cpu,
            &memory,
            &disk,
            &uptime,
            &local_ip,
            &tailscale_ip,
            &state,
            &process,
        ];
        if let Some(h) = &hostname {
            primary.push(h);
        }
        if primary
            .iter()
            .all(|r| matches!(r, Err(e) if e.is_spawn()))
        {
            return Err(CollectionError::Unavailable {
                attempted: primary.len(),
            });
        }

        let log_deadline = Instant::now() + self.log_timeout;
        let (model_log, channel_log) = tokio::join!(
            self.run(&p.service_model, log_deadline),
            self.run(&p.service_channel, log_deadline),
        );

        let hostname = match &self.display_hostname {
            Some(name) => name.clone(),
            None => hostname
                .and_then(|r| parsed(names::HOSTNAME, r, parse::first_line))
                .unwrap_or_else(|| UNKNOWN_HOSTNAME.into()),
        };

        let snapshot = Snapshot {
            captured_at,
            hostname,
            cpu_usage_percent: parsed(names::CPU, cpu, parse::cpu_usage),
            memory: parsed(names::MEMORY, memory, parse::memory).unwrap_or_default(),
            disk: parsed(names::DISK, disk, parse::disk).unwrap_or_default(),
            uptime_label: parsed(names::UPTIME, uptime, parse::first_line)
                .unwrap_or_else(|| UNKNOWN_UPTIME.into()),
            network: NetworkAddresses {
                local_ip: parsed(names::LOCAL_IP, local_ip, parse::first_token),
                tailscale_ip: parsed(names::TAILSCALE_IP, tailscale_ip, parse::first_line),
            },
            service: ServiceStats {
                status: parsed(names::SERVICE_STATE, with_exit_output(state), parse::first_line)
                    .unwrap_or_else(|| INACTIVE.into()),
                process: parsed(names::SERVICE_PROCESS, process, |out| {
                    parse::service_process(out, &self.process_pattern)
                }),
                model: parsed(names::SERVICE_MODEL, model_log, |out| {
                    parse::last_marked_value(out, &self.model_marker)
                }),
                channel_connected: log_flag(channel_log, |out| {
                    parse::channel_listening(out, &self.channel_name, &self.channel_marker)
                }),
            },
        };

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Snapshot collected"
        );
        Ok(snapshot)
    }

    /// Run one probe, bounded by the earlier of the batch deadline and its own timeout.
    async fn run(&self, spec: &ProbeSpec, deadline: Instant) -> Result<String, ProbeError> {
        let started = Instant::now();
        let deadline = deadline.min(started + spec.timeout);
        let result = match timeout_at(deadline, self.runner.run(spec)).await {
            Ok(r) => r,
            Err(_) => Err(ProbeError::Timeout {
                program: spec.program.clone(),
                after: started.elapsed(),
            }),
        };
        if let Err(e) = &result {
            warn!(probe = spec.name, command = %spec.display(), error = %e, "probe failed");
        }
        result
    }
}

/// Parse a probe's output; failed probes and parse misses both yield None.
fn parsed<T>(
    probe: &str,
    result: Result<String, ProbeError>,
    parse_output: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let out = result.ok()?;
    let value = parse_output(&out);
    if value.is_none() {
        debug!(probe, output_len = out.len(), "probe output not recognised");
    }
    value
}

/// `systemctl is-active` exits non-zero for every state but "active" while still
/// printing the state; keep that output instead of treating it as a failure.
fn with_exit_output(result: Result<String, ProbeError>) -> Result<String, ProbeError> {
    result.or_else(|e| match e.exit_output().map(str::to_owned) {
        Some(out) => Ok(out),
        None => Err(e),
    })
}

/// Boolean log-derived fields: a failed probe reads as false.
fn log_flag(
    result: Result<String, ProbeError>,
    matches: impl FnOnce(&str) -> bool,
) -> bool {
    result.map(|out| matches(&out)).unwrap_or(false)
}
