// Production runner: spawn the probe program with tokio::process

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::{ProbeError, ProbeRunner, ProbeSpec};

/// Longest stderr excerpt kept in an `Exit` error.
const STDERR_EXCERPT_LEN: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProbeRunner for CommandRunner {
    async fn run(&self, spec: &ProbeSpec) -> Result<String, ProbeError> {
        // kill_on_drop: when the collector's deadline fires this future is dropped
        // and the child must not outlive it.
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.trim().chars().take(STDERR_EXCERPT_LEN).collect();
            return Err(ProbeError::Exit {
                program: spec.program.clone(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
