//! Helpers for running child processes.
//!
//! Every call blocks until the child exits. Three flavours:
//! - captured: stdout/stderr piped, for checks like `--version`.
//! - inherited: the child shares the operator's terminal, for installs and renders.
//! - detached: all stdio nulled, for launchers whose grandchildren outlive them.

use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, error, instrument};

/// Captured child process output.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Run a command to completion, capturing stdout/stderr.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_captured(mut cmd: Command) -> Result<CommandOutput> {
    debug!("spawning child process");
    let output = match cmd.stdin(Stdio::null()).output() {
        Ok(output) => output,
        Err(e) => {
            debug!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };
    debug!(exit_code = ?output.status.code(), "command finished");
    Ok(CommandOutput {
        status: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// Run a command to completion, sharing the parent's stdin/stdout/stderr.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_inherited(mut cmd: Command) -> Result<ExitStatus> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    spawn_and_wait(cmd)
}

/// Run a command to completion with no stdio attached.
///
/// Only the child's exit is awaited: processes it leaves running hold no
/// pipes back to us.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_detached(mut cmd: Command) -> Result<ExitStatus> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    spawn_and_wait(cmd)
}

fn spawn_and_wait(mut cmd: Command) -> Result<ExitStatus> {
    debug!("spawning child process");
    let status = match cmd.status() {
        Ok(status) => status,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };
    debug!(exit_code = ?status.code(), "command finished");
    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn captures_stdout_and_status() {
        let out = run_captured(sh("echo 1.2.3; exit 0")).expect("run");
        assert!(out.success());
        assert_eq!(out.stdout_lossy(), "1.2.3");
    }

    #[test]
    fn reports_non_zero_exit() {
        let out = run_captured(sh("echo boom >&2; exit 3")).expect("run");
        assert!(!out.success());
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(out.stderr_lossy(), "boom");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let cmd = Command::new("blast-radius-definitely-missing-program");
        let err = run_captured(cmd).unwrap_err();
        assert!(err.to_string().contains("spawn command"));
    }

    #[test]
    fn inherited_reports_exit_status() {
        let status = run_inherited(sh("exit 2")).expect("run");
        assert!(!status.success());
        assert_eq!(status.code(), Some(2));
    }

    #[test]
    fn inherited_waits_for_slow_child() {
        let started = Instant::now();
        let status = run_inherited(sh("sleep 2; exit 0")).expect("run");
        assert!(status.success());
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[test]
    fn detached_returns_when_child_exits_despite_background_grandchild() {
        let started = Instant::now();
        let status = run_detached(sh("sleep 5 & exit 0")).expect("run");
        assert!(status.success());
        assert!(
            started.elapsed() < Duration::from_secs(3),
            "blocked for {:?}",
            started.elapsed()
        );
    }
}
