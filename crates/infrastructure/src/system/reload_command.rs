//! Runs the operator's zone reload command after the fragments change.

use acme_zonefile_application::ports::ZoneReloader;
use acme_zonefile_domain::{DomainError, ValidatedDomainName};
use async_trait::async_trait;
use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, info};

pub const DEFAULT_RELOAD_TIMEOUT_SECS: u64 = 60;

/// How the reload command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Exited(i32),
    Signaled { signal: i32, core_dumped: bool },
    Unknown,
}

impl ReloadOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ReloadOutcome::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ReloadOutcome::Signaled {
                    signal,
                    core_dumped: status.core_dumped(),
                };
            }
        }
        ReloadOutcome::Unknown
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReloadOutcome::Exited(0))
    }
}

impl fmt::Display for ReloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadOutcome::Exited(code) => write!(f, "exited with code {}", code),
            ReloadOutcome::Signaled {
                signal,
                core_dumped: true,
            } => write!(f, "killed by signal {} (core dumped)", signal),
            ReloadOutcome::Signaled { signal, .. } => write!(f, "killed by signal {}", signal),
            ReloadOutcome::Unknown => f.write_str("ended with unknown status"),
        }
    }
}

/// Runs `program [args...] <zone>` without a shell.
pub struct CommandReloader {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandReloader {
    /// Splits `command` on whitespace; the first word is the program.
    pub fn from_command_line(command: &str) -> Result<Self, DomainError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| DomainError::ConfigError("reload command is empty".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
            timeout_secs: DEFAULT_RELOAD_TIMEOUT_SECS,
        })
    }

    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl ZoneReloader for CommandReloader {
    async fn reload(&self, zone: &ValidatedDomainName) -> Result<(), DomainError> {
        let command = self.describe();
        info!(command = %command, zone = %zone, "Running reload command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(zone.without_root())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::ReloadFailed(format!("cannot start '{}': {}", command, e))
            })?;

        let status = match timeout(Duration::from_secs(self.timeout_secs), child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                return Err(DomainError::ReloadFailed(format!(
                    "waiting for '{}': {}",
                    command, e
                )))
            }
            Err(_) => {
                let _ = child.kill().await;
                error!(command = %command, "Reload command timed out");
                return Err(DomainError::ReloadFailed(format!(
                    "'{}' timed out after {} seconds",
                    command, self.timeout_secs
                )));
            }
        };

        let outcome = ReloadOutcome::from_status(status);
        if outcome.is_success() {
            debug!(command = %command, "Reload command finished");
            Ok(())
        } else {
            error!(command = %command, outcome = %outcome, "Reload command failed");
            Err(DomainError::ReloadFailed(format!("'{} {}' {}", command, zone.without_root(), outcome)))
        }
    }
}
