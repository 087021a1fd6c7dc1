// Probe descriptors and the runner seam between the collector and process spawning

mod command;
pub mod parse;

pub use command::CommandRunner;

use async_trait::async_trait;
use std::time::Duration;

/// One external command invocation producing a fragment of the snapshot.
///
/// Probes never go through a shell: `program` is executed directly with `args`,
/// so nothing in the descriptor is subject to shell expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    pub name: &'static str,
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ProbeSpec {
    pub fn new(name: &'static str, program: &str, args: &[&str], timeout: Duration) -> Self {
        Self {
            name,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    /// Command line for logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        /// Some tools report their answer through the exit code and still print it
        /// (`systemctl is-active` prints "failed" and exits 3).
        stdout: String,
        stderr: String,
    },
    #[error("{program} timed out after {after:?}")]
    Timeout { program: String, after: Duration },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "signal".into(),
    }
}

impl ProbeError {
    /// Stdout of a command that ran but exited non-zero, when it printed anything.
    pub fn exit_output(&self) -> Option<&str> {
        match self {
            ProbeError::Exit { stdout, .. } if !stdout.trim().is_empty() => Some(stdout.as_str()),
            _ => None,
        }
    }

    /// True when the command never started, as opposed to starting and failing.
    pub fn is_spawn(&self) -> bool {
        matches!(self, ProbeError::Spawn { .. })
    }
}

/// Executes a probe and returns its captured stdout.
///
/// Implementations report non-zero exits and spawn failures as errors; the
/// collector enforces deadlines, so runners need not time out on their own.
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn run(&self, spec: &ProbeSpec) -> Result<String, ProbeError>;
}
