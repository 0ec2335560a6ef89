use crate::domain::ports::PageServer;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const PROBE_REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Static file server run as a child process, built from a command
/// template with `{dir}` and `{port}` placeholders. Readiness is an HTTP
/// probe with a bounded deadline, not a fixed sleep: any response status
/// counts, since a 404 still proves the listener is up.
pub struct SpawnedServer {
    argv: Vec<String>,
    probe_url: String,
    ready_timeout: Duration,
    client: reqwest::Client,
    child: Option<Child>,
}

impl SpawnedServer {
    pub fn new(
        command_template: &str,
        publish_dir: &str,
        port: u16,
        ready_timeout: Duration,
    ) -> Result<Self> {
        let argv = build_command(command_template, publish_dir, port)?;
        let client = reqwest::Client::builder()
            .timeout(PROBE_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            argv,
            probe_url: format!("http://127.0.0.1:{}/", port),
            ready_timeout,
            client,
            child: None,
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(|child| child.id())
    }

    fn command_line(&self) -> String {
        self.argv.join(" ")
    }

    /// Child processes that die right after spawn (port already bound,
    /// bad arguments) surface here instead of as a readiness timeout.
    fn check_still_running(&mut self) -> Result<()> {
        let command = self.argv.join(" ");
        if let Some(child) = self.child.as_mut() {
            let early_exit = child.try_wait().map_err(|e| ExportError::ServerSpawnError {
                command: command.clone(),
                reason: e.to_string(),
            })?;
            if let Some(status) = early_exit {
                return Err(ExportError::ServerSpawnError {
                    command,
                    reason: format!("exited early with {}", status),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageServer for SpawnedServer {
    async fn start(&mut self) -> Result<()> {
        let mut command = Command::new(&self.argv[0]);
        command
            .args(&self.argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| ExportError::ServerSpawnError {
            command: self.command_line(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            "Static server spawned: `{}` (pid {:?})",
            self.command_line(),
            child.id()
        );
        self.child = Some(child);
        Ok(())
    }

    async fn wait_ready(&mut self) -> Result<()> {
        let deadline = tokio::time::Instant::now() + self.ready_timeout;

        loop {
            self.check_still_running()?;

            match self.client.get(&self.probe_url).send().await {
                Ok(response) => {
                    tracing::debug!(
                        "Static server ready at {} (status {})",
                        self.probe_url,
                        response.status()
                    );
                    return Ok(());
                }
                Err(e) => tracing::trace!("Readiness probe not answered yet: {}", e),
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(ExportError::ServerReadyError {
                    url: self.probe_url.clone(),
                    waited_ms: self.ready_timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            match child.start_kill() {
                Ok(()) => tracing::debug!("Static server killed"),
                // InvalidInput means the child already exited on its own.
                Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {}
                Err(e) => tracing::warn!("Failed to kill static server: {}", e),
            }
            // Reap so the pid does not linger as a zombie.
            let _ = child.wait().await;
        }
        Ok(())
    }
}

fn build_command(template: &str, publish_dir: &str, port: u16) -> Result<Vec<String>> {
    let argv: Vec<String> = template
        .split_whitespace()
        .map(|token| {
            token
                .replace("{dir}", publish_dir)
                .replace("{port}", &port.to_string())
        })
        .collect();

    if argv.is_empty() {
        return Err(ExportError::InvalidConfigValueError {
            field: "server_command".to_string(),
            value: template.to_string(),
            reason: "Command template cannot be empty".to_string(),
        });
    }

    Ok(argv)
}
