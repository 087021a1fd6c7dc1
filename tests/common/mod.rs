// Shared test helpers: a scripted probe runner and canned tool output

#![allow(dead_code)]

use async_trait::async_trait;
use statusboard::collector::{Collector, names};
use statusboard::config::AppConfig;
use statusboard::probe::{ProbeError, ProbeRunner, ProbeSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOP: &str = "top - 10:00:01 up 18:02,  1 user,  load average: 0.10, 0.20, 0.30
Tasks: 210 total,   1 running, 209 sleeping,   0 stopped,   0 zombie
%Cpu(s):  9.0 us,  3.0 sy,  0.0 ni, 87.5 id,  0.5 wa,  0.0 hi,  0.0 si,  0.0 st
";

pub const FREE: &str = "               total        used        free      shared  buff/cache   available
Mem:           16000        1234        9000          10        5766       14500
Swap:           2047           0        2047
";

pub const DF: &str = "Filesystem      Size  Used Avail Use% Mounted on
/dev/sda1        98G   20G   74G  21% /
";

pub const PS: &str = "USER         PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND
root           1  0.0  0.1 168000 12000 ?        Ss   Oct18   0:02 /sbin/init
bot         4242  1.2  3.4 900000 500000 ?       Ssl  Oct18  12:00 node /opt/openclaw/openclaw-gateway
";

pub const JOURNAL: &str = "Oct 19 09:59:58 homebot node[4242]: [gateway] agent model: anthropic/claude-x
Oct 19 09:59:59 homebot node[4242]: [whatsapp] Listening for personal messages on +100000
";

pub const PRIMARY_PROBES: &[&str] = &[
    names::CPU,
    names::MEMORY,
    names::DISK,
    names::UPTIME,
    names::LOCAL_IP,
    names::TAILSCALE_IP,
    names::SERVICE_STATE,
    names::SERVICE_PROCESS,
    names::HOSTNAME,
];

pub const LOG_PROBES: &[&str] = &[names::SERVICE_MODEL, names::SERVICE_CHANNEL];

#[derive(Debug, Clone)]
pub enum Step {
    Output(String),
    /// Non-zero exit.
    Fail,
    /// Non-zero exit that still printed to stdout.
    FailWithOutput(String),
    /// Program could not be started.
    SpawnError,
    /// Never completes; only the collector's deadline ends it.
    Hang,
    Delayed(Duration, String),
}

/// ProbeRunner that answers from a per-probe script and records call order.
pub struct ScriptedRunner {
    steps: HashMap<&'static str, Step>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedRunner {
    /// Every probe answers with realistic output for a healthy host.
    pub fn healthy() -> Self {
        let steps = HashMap::from([
            (names::CPU, Step::Output(TOP.into())),
            (names::MEMORY, Step::Output(FREE.into())),
            (names::DISK, Step::Output(DF.into())),
            (names::UPTIME, Step::Output("up 18 hours, 2 minutes\n".into())),
            (names::LOCAL_IP, Step::Output("192.168.1.10 172.17.0.1 \n".into())),
            (names::TAILSCALE_IP, Step::Output("100.101.102.103\n".into())),
            (names::SERVICE_STATE, Step::Output("active\n".into())),
            (names::SERVICE_PROCESS, Step::Output(PS.into())),
            (names::HOSTNAME, Step::Output("homebot\n".into())),
            (names::SERVICE_MODEL, Step::Output(JOURNAL.into())),
            (names::SERVICE_CHANNEL, Step::Output(JOURNAL.into())),
        ]);
        Self {
            steps,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, probe: &'static str, step: Step) -> Self {
        self.steps.insert(probe, step);
        self
    }

    pub fn output(self, probe: &'static str, out: &str) -> Self {
        self.with(probe, Step::Output(out.into()))
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProbeRunner for ScriptedRunner {
    async fn run(&self, spec: &ProbeSpec) -> Result<String, ProbeError> {
        self.calls.lock().unwrap().push(spec.name);
        match self.steps.get(spec.name).cloned() {
            Some(Step::Output(out)) => Ok(out),
            Some(Step::Delayed(delay, out)) => {
                tokio::time::sleep(delay).await;
                Ok(out)
            }
            Some(Step::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
            Some(Step::SpawnError) => Err(ProbeError::Spawn {
                program: spec.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
            Some(Step::FailWithOutput(stdout)) => Err(ProbeError::Exit {
                program: spec.program.clone(),
                code: Some(3),
                stdout,
                stderr: String::new(),
            }),
            Some(Step::Fail) | None => Err(ProbeError::Exit {
                program: spec.program.clone(),
                code: Some(1),
                stdout: String::new(),
                stderr: String::new(),
            }),
        }
    }
}

pub const TEST_CONFIG: &str = r#"
[server]
port = 3000
host = "127.0.0.1"

[collector]
probe_timeout_ms = 300
log_probe_timeout_ms = 300

[service]
unit = "openclaw-gateway"
"#;

pub fn test_config() -> AppConfig {
    AppConfig::load_from_str(TEST_CONFIG).unwrap()
}

pub fn collector_with(runner: Arc<ScriptedRunner>) -> Collector {
    Collector::new(runner, &test_config())
}
