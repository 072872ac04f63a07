use super::ExtractionError;
use std::ffi::OsStr;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Runs external tools with a deadline and captured output.
#[derive(Clone)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl CommandExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn execute(&self, program: &str, args: &[&OsStr]) -> Result<Output, ExtractionError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            program = %program,
            args = ?args,
            timeout_secs = %self.timeout.as_secs(),
            "Executing command"
        );

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ExtractionError::TimedOut(self.timeout.as_secs()))?
            .map_err(|e| {
                tracing::error!(program = %program, error = %e, "Failed to spawn command");
                ExtractionError::Unavailable(format!("{}: {}", program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                program = %program,
                status = ?output.status.code(),
                stderr = %stderr,
                "Command failed"
            );
            return Err(ExtractionError::Unreadable(if stderr.is_empty() {
                format!("{} exited with {}", program, output.status)
            } else {
                stderr
            }));
        }

        tracing::debug!(
            program = %program,
            output_size = output.stdout.len(),
            "Command succeeded"
        );

        Ok(output)
    }
}
