//! Adapter for the external `dep-tree` executable.
//!
//! The [`DepTool`] trait decouples the visualization flow from the real
//! binary. Tests use scripted tools that return predetermined outcomes without
//! spawning processes.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument, warn};

use crate::core::types::RenderOutcome;
use crate::io::config::ToolConfig;
use crate::io::process::{run_captured, run_inherited};

/// Parameters for a single `entropy` render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub entry_point: PathBuf,
    pub output_path: PathBuf,
    pub depth: u32,
    /// Glob passed as `--include`.
    pub include: String,
}

/// Abstraction over the dependency-visualization backend.
pub trait DepTool {
    /// Return the tool's version string, or an error if it cannot be run.
    fn version(&self) -> Result<String>;

    /// Install the tool. `Err` means the install failed.
    fn install(&self) -> Result<()>;

    /// Render `request.entry_point` to `request.output_path`.
    fn render(&self, request: &RenderRequest) -> Result<RenderOutcome>;
}

/// `dep-tree` invoked as a subprocess.
#[derive(Debug, Clone)]
pub struct DepTreeCli {
    program: String,
    install_command: Vec<String>,
}

impl DepTreeCli {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            program: config.program.clone(),
            install_command: config.install_command.clone(),
        }
    }

    /// Arguments for `entropy`, in the order the tool expects.
    pub fn entropy_args(request: &RenderRequest) -> Vec<std::ffi::OsString> {
        vec![
            "entropy".into(),
            request.entry_point.clone().into_os_string(),
            "--output".into(),
            request.output_path.clone().into_os_string(),
            "--depth".into(),
            request.depth.to_string().into(),
            "--include".into(),
            request.include.clone().into(),
        ]
    }
}

impl DepTool for DepTreeCli {
    #[instrument(skip_all, fields(program = %self.program))]
    fn version(&self) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--version");
        let output = run_captured(cmd)
            .with_context(|| format!("run {} --version", self.program))?;
        if !output.success() {
            return Err(anyhow!(
                "{} --version failed with status {:?}: {}",
                self.program,
                output.status.code(),
                output.stderr_lossy()
            ));
        }
        Ok(output.stdout_lossy())
    }

    #[instrument(skip_all)]
    fn install(&self) -> Result<()> {
        let (program, args) = self
            .install_command
            .split_first()
            .ok_or_else(|| anyhow!("install command is empty"))?;
        info!(command = %self.install_command.join(" "), "installing tool");
        let mut cmd = Command::new(program);
        cmd.args(args);
        let status = run_inherited(cmd)
            .with_context(|| format!("run {}", self.install_command.join(" ")))?;
        if !status.success() {
            return Err(anyhow!("install failed with status {:?}", status.code()));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(entry_point = %request.entry_point.display()))]
    fn render(&self, request: &RenderRequest) -> Result<RenderOutcome> {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::entropy_args(request));
        let status = run_inherited(cmd)
            .with_context(|| format!("run {} entropy", self.program))?;
        if !status.success() {
            warn!(exit_code = ?status.code(), "render failed");
            return Ok(RenderOutcome::Failed {
                code: status.code(),
            });
        }
        debug!("render completed successfully");
        Ok(RenderOutcome::Rendered)
    }
}
