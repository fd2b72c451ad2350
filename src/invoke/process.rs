//! Subprocess invoker - runs the action as a child process

use crate::core::{Invocation, RunConfig};
use crate::invoke::{CaseEnvironment, CaseInvoker, InvokeError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Invoker that launches an executable once per case
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    /// Path to the executable (e.g., "node", "/usr/local/bin/node")
    executable: String,

    /// Entry script passed as the only argument, if any
    script: Option<String>,
}

impl ProcessInvoker {
    /// Create a new process invoker
    ///
    /// # Arguments
    /// * `executable` - Path to the executable, looked up on `PATH` if bare
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            script: None,
        }
    }

    /// Build an invoker from the run configuration
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            script: config.script.clone(),
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    fn command(&self, env: &CaseEnvironment) -> Command {
        let mut cmd = Command::new(&self.executable);
        if let Some(script) = &self.script {
            cmd.arg(script);
        }
        cmd.envs(env.vars())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CaseInvoker for ProcessInvoker {
    /// Launch the executable and wait for it to exit
    ///
    /// # Errors
    /// Returns `InvokeError` if:
    /// - The executable cannot be spawned
    /// - The standard output is not valid UTF-8
    ///
    /// A non-zero exit status is not an error.
    async fn invoke(&self, env: &CaseEnvironment) -> Result<Invocation, InvokeError> {
        debug!(
            "Spawning {} (title length: {}, body length: {})",
            self.executable,
            env.title.len(),
            env.body.len()
        );

        let output = self
            .command(env)
            .output()
            .await
            .map_err(|source| InvokeError::Spawn {
                program: self.executable.clone(),
                source,
            })?;

        if !output.stderr.is_empty() {
            debug!(
                "{} stderr: {}",
                self.executable,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        let exit_code = output.status.code();
        if !output.status.success() {
            warn!(
                "{} exited with {}",
                self.executable,
                exit_code.map_or_else(|| "a signal".to_string(), |c| format!("code {}", c))
            );
        }

        let stdout = String::from_utf8(output.stdout).map_err(|source| InvokeError::Decode {
            program: self.executable.clone(),
            source,
        })?;

        debug!("{} returned {} bytes of output", self.executable, stdout.len());

        Ok(Invocation::new(stdout).with_exit_code(exit_code))
    }
}
