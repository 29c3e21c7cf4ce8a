//! Orchestration for a single visualization run.
//!
//! The flow is strictly sequential: check (or install) the tool, pick a
//! directory, scan it, pick an entry point, render, open. Expected failures
//! end the run with a [`VisualizeOutcome`] and a printed explanation; only
//! unexpected conditions (closed stdin, unwritable output directory) are
//! returned as errors.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::choice::{parse_directory_choice, parse_entry_choice};
use crate::core::types::{Candidate, EntryChoice, RenderOutcome, ToolStatus};
use crate::io::browser::Browser;
use crate::io::config::{BlastConfig, ToolConfig};
use crate::io::prompt::Prompter;
use crate::io::scan::find_entry_points;
use crate::io::tool::{DepTool, RenderRequest};

/// Per-run inputs that come from the CLI rather than the config file.
#[derive(Debug, Clone)]
pub struct VisualizeOptions {
    /// Directory to scan. `None` shows the directory menu.
    pub directory: Option<PathBuf>,
    /// Entry point to render. `Some` skips scanning and selection.
    pub entry_point: Option<PathBuf>,
    /// Base for the configured output directory.
    pub workdir: PathBuf,
    pub open_browser: bool,
    pub allow_install: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualizeOutcome {
    /// The report was written to `html_path`.
    Generated { html_path: PathBuf },
    /// The tool was missing and could not be installed.
    ToolUnavailable,
    /// The directory could not be scanned at all.
    ScanFailed { directory: PathBuf },
    /// The scan found nothing to offer.
    NoEntryPoints { directory: PathBuf },
    /// The tool exited unsuccessfully or could not be started.
    RenderFailed,
}

impl VisualizeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VisualizeOutcome::Generated { .. })
    }
}

/// Run the whole flow.
#[instrument(skip_all)]
pub fn generate_visualization<T: DepTool, B: Browser, P: Prompter>(
    config: &BlastConfig,
    options: &VisualizeOptions,
    tool: &T,
    browser: &B,
    prompter: &mut P,
) -> Result<VisualizeOutcome> {
    let status = check_tool(tool, &config.tool, options.allow_install, prompter)?;
    if !status.is_usable() {
        return Ok(VisualizeOutcome::ToolUnavailable);
    }

    let entry_point = match &options.entry_point {
        Some(entry_point) => entry_point.clone(),
        None => {
            let directory = match &options.directory {
                Some(directory) => directory.clone(),
                None => choose_directory(prompter, &config.menu)?,
            };

            prompter.say(&format!(
                "Finding entry points in {}...",
                directory.display()
            ))?;
            let candidates = match find_entry_points(&directory, &config.scan) {
                Ok(candidates) => candidates,
                Err(err) => {
                    let reason = format!("{err:#}");
                    warn!(err = %reason, "scan failed");
                    prompter.say(&format!("Cannot scan {}: {reason}", directory.display()))?;
                    return Ok(VisualizeOutcome::ScanFailed { directory });
                }
            };
            if candidates.is_empty() {
                prompter.say(&format!(
                    "No entry points found in {}. Please specify a file manually.",
                    directory.display()
                ))?;
                return Ok(VisualizeOutcome::NoEntryPoints { directory });
            }
            choose_entry_point(prompter, &candidates)?
        }
    };

    render_and_open(config, options, &entry_point, tool, browser, prompter)
}

/// Check the tool; if it is missing, make one install attempt.
///
/// A successful install is trusted without running `--version` again.
pub fn check_tool<T: DepTool, P: Prompter>(
    tool: &T,
    config: &ToolConfig,
    allow_install: bool,
    prompter: &mut P,
) -> Result<ToolStatus> {
    let version_err = match tool.version() {
        Ok(version) => {
            debug!(version = %version, "tool present");
            return Ok(ToolStatus::Present(version));
        }
        Err(err) => format!("{err:#}"),
    };
    debug!(err = %version_err, "tool version check failed");

    if !allow_install {
        prompter.say(&format!("{} is not installed.", config.program))?;
        prompter.say("Please install it manually:")?;
        prompter.say(&config.install_hint())?;
        return Ok(ToolStatus::Unavailable(version_err));
    }

    prompter.say(&format!("{} is not installed. Installing...", config.program))?;
    match tool.install() {
        Ok(()) => {
            info!(program = %config.program, "tool installed");
            Ok(ToolStatus::Installed)
        }
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(err = %reason, "install failed");
            prompter.say(&format!(
                "Failed to install {}. Please install it manually:",
                config.program
            ))?;
            prompter.say(&config.install_hint())?;
            Ok(ToolStatus::Unavailable(reason))
        }
    }
}

/// Show the directory menu and block for an answer.
pub fn choose_directory<P: Prompter>(prompter: &mut P, menu: &[String]) -> Result<PathBuf> {
    prompter.say("Available directories to analyze:")?;
    for (i, name) in menu.iter().enumerate() {
        prompter.say(&format!("{}. {}", i + 1, name))?;
    }
    let answer = prompter.ask(&format!(
        "Select a directory to analyze (1-{}) or enter a custom path: ",
        menu.len()
    ))?;
    Ok(parse_directory_choice(&answer, menu).into_path())
}

/// Show the numbered candidates and block for an answer.
///
/// Anything that is not a listed number is used verbatim as a path.
pub fn choose_entry_point<P: Prompter>(
    prompter: &mut P,
    candidates: &[Candidate],
) -> Result<PathBuf> {
    prompter.say("Found potential entry points:")?;
    for (i, candidate) in candidates.iter().enumerate() {
        prompter.say(&format!("{}. {}", i + 1, candidate.path.display()))?;
    }
    let answer = prompter.ask(&format!(
        "Select an entry point (1-{}) or enter a custom file path: ",
        candidates.len()
    ))?;
    let entry_point = match parse_entry_choice(&answer, candidates.len()) {
        EntryChoice::Listed(index) => candidates[index].path.clone(),
        EntryChoice::Literal(path) => {
            debug!(path = %path.display(), "using literal entry point");
            path
        }
    };
    Ok(entry_point)
}

/// Render `entry_point` and, on success, open the report.
///
/// A browser failure is reported but does not fail the run.
pub fn render_and_open<T: DepTool, B: Browser, P: Prompter>(
    config: &BlastConfig,
    options: &VisualizeOptions,
    entry_point: &Path,
    tool: &T,
    browser: &B,
    prompter: &mut P,
) -> Result<VisualizeOutcome> {
    prompter.say(&format!(
        "Generating visualization for {}...",
        entry_point.display()
    ))?;

    let html_path = std::path::absolute(config.render.output_path(&options.workdir))
        .context("resolve output path")?;
    if let Some(parent) = html_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }

    let request = RenderRequest {
        entry_point: entry_point.to_path_buf(),
        output_path: html_path.clone(),
        depth: config.render.depth,
        include: config.render.include.clone(),
    };
    let outcome = match tool.render(&request) {
        Ok(outcome) => outcome,
        Err(err) => {
            prompter.say(&format!("Error generating visualization: {err:#}"))?;
            return Ok(VisualizeOutcome::RenderFailed);
        }
    };
    if let RenderOutcome::Failed { code } = outcome {
        let code = code.map_or_else(|| "signal".to_string(), |code| code.to_string());
        prompter.say(&format!(
            "Error generating visualization: {} exited with status {code}",
            config.tool.program
        ))?;
        return Ok(VisualizeOutcome::RenderFailed);
    }

    prompter.say(&format!("Visualization saved to: {}", html_path.display()))?;
    if options.open_browser
        && let Err(err) = browser.open(&html_path)
    {
        let reason = format!("{err:#}");
        warn!(err = %reason, "failed to open browser");
        prompter.say(&format!("Could not open a browser: {reason}"))?;
    }
    prompter.say("Visualization generated successfully!")?;
    Ok(VisualizeOutcome::Generated { html_path })
}
