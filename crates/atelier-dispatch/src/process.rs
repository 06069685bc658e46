//! Process-backed execution environment
//!
//! Runs the project's configured interpreter on the argument file and
//! collects output lines. One environment per user; the running child is
//! tracked so `cancel` can kill it.

use crate::environment::{EnvironmentFactory, ExecutionEnvironment};
use async_trait::async_trait;
use atelier_core::{ExecError, ExecutionConfig, FileStore};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio::sync::Mutex;

/// Command kind understood by this environment
pub const RUN: &str = "run";

/// Environment that executes files with the configured interpreter
#[derive(Debug)]
pub struct ProcessEnvironment {
    user: String,
    running: Mutex<Option<Child>>,
}

impl ProcessEnvironment {
    /// Create an environment for a user
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            running: Mutex::new(None),
        }
    }

    /// Owning user identity
    #[inline]
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    async fn run(
        &self,
        file: &FileStore,
        config: &ExecutionConfig,
    ) -> Result<Vec<String>, ExecError> {
        let mut command = tokio::process::Command::new(&config.interpreter);
        command
            .args(&config.interpreter_args)
            .arg(file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::info!(
            user = %self.user,
            interpreter = %config.interpreter,
            file = %file.path().display(),
            "spawning execution"
        );

        let mut child = command.spawn()?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        *self.running.lock().await = Some(child);

        // One deadline covers output collection and process exit; a child
        // that closes its pipes but keeps running must not hold the slot
        // past the configured timeout.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(config.timeout_secs);
        let timed_out = || {
            ExecError::ExecutionFailed(format!("timed out after {}s", config.timeout_secs))
        };

        let collected = tokio::time::timeout_at(
            deadline,
            collect_output(stdout, stderr, config.max_output_lines),
        )
        .await;

        // Reclaim the child whether or not we timed out; cancel may have
        // taken it already.
        let child = self.running.lock().await.take();

        match collected {
            Ok(result) => {
                let mut lines = result?;
                if let Some(mut child) = child {
                    match tokio::time::timeout_at(deadline, child.wait()).await {
                        Ok(status) => {
                            let status = status?;
                            if !status.success() {
                                lines.push(format!("Process exited with status {status}"));
                            }
                        }
                        Err(_) => {
                            child.kill().await?;
                            return Err(timed_out());
                        }
                    }
                }
                Ok(lines)
            }
            Err(_) => {
                if let Some(mut child) = child {
                    child.kill().await?;
                }
                Err(timed_out())
            }
        }
    }
}

async fn collect_output(
    stdout: Option<tokio::process::ChildStdout>,
    stderr: Option<tokio::process::ChildStderr>,
    max_lines: usize,
) -> Result<Vec<String>, ExecError> {
    let mut lines = Vec::new();
    if let Some(stdout) = stdout {
        let mut reader = BufReader::new(stdout).lines();
        while let Some(line) = reader.next_line().await? {
            if lines.len() >= max_lines {
                break;
            }
            lines.push(line);
        }
    }
    if let Some(stderr) = stderr {
        let mut reader = BufReader::new(stderr).lines();
        while let Some(line) = reader.next_line().await? {
            if lines.len() >= max_lines {
                break;
            }
            lines.push(line);
        }
    }
    Ok(lines)
}

#[async_trait]
impl ExecutionEnvironment for ProcessEnvironment {
    async fn execute(
        &self,
        kind: &str,
        file: &FileStore,
        config: &ExecutionConfig,
    ) -> Result<Vec<String>, ExecError> {
        match kind {
            RUN => self.run(file, config).await,
            other => Err(ExecError::ExecutionFailed(format!(
                "unsupported command: {other}"
            ))),
        }
    }

    async fn cancel(&self) -> Result<Vec<String>, ExecError> {
        let mut guard = self.running.lock().await;
        match guard.take() {
            Some(mut child) => {
                child.kill().await?;
                tracing::info!(user = %self.user, "execution cancelled");
                Ok(vec!["Execution cancelled.".to_string()])
            }
            None => Ok(vec!["No running execution.".to_string()]),
        }
    }
}

/// Factory producing [`ProcessEnvironment`] instances
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironmentFactory;

impl EnvironmentFactory for ProcessEnvironmentFactory {
    fn create(&self, user: &str) -> Arc<dyn ExecutionEnvironment> {
        Arc::new(ProcessEnvironment::new(user))
    }
}
