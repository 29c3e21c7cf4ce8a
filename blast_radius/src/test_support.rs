//! Test-only helpers: temporary source trees and scripted adapters.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::core::types::RenderOutcome;
use crate::io::browser::Browser;
use crate::io::prompt::Prompter;
use crate::io::tool::{DepTool, RenderRequest};

/// Temporary directory populated with source files.
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        self.write_bytes(relative, contents.as_bytes())
    }

    pub fn write_bytes(&self, relative: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

/// `DepTool` with fixed answers that records every call.
pub struct ScriptedTool {
    version_ok: bool,
    install_ok: bool,
    render: RenderOutcome,
    calls: RefCell<Vec<String>>,
    requests: RefCell<Vec<RenderRequest>>,
}

impl ScriptedTool {
    fn new(version_ok: bool, install_ok: bool) -> Self {
        Self {
            version_ok,
            install_ok,
            render: RenderOutcome::Rendered,
            calls: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn present() -> Self {
        Self::new(true, false)
    }

    pub fn missing_installable() -> Self {
        Self::new(false, true)
    }

    pub fn missing_uninstallable() -> Self {
        Self::new(false, false)
    }

    pub fn with_render(mut self, outcome: RenderOutcome) -> Self {
        self.render = outcome;
        self
    }

    /// Names of the trait methods called, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.borrow().clone()
    }
}

impl DepTool for ScriptedTool {
    fn version(&self) -> Result<String> {
        self.calls.borrow_mut().push("version".to_string());
        if self.version_ok {
            Ok("dep-tree 0.0.0-test".to_string())
        } else {
            Err(anyhow!("spawn command: No such file or directory"))
        }
    }

    fn install(&self) -> Result<()> {
        self.calls.borrow_mut().push("install".to_string());
        if self.install_ok {
            Ok(())
        } else {
            Err(anyhow!("install failed with status Some(1)"))
        }
    }

    fn render(&self, request: &RenderRequest) -> Result<RenderOutcome> {
        self.calls.borrow_mut().push("render".to_string());
        self.requests.borrow_mut().push(request.clone());
        Ok(self.render)
    }
}

/// `Browser` that records opened paths instead of launching anything.
#[derive(Default)]
pub struct RecordingBrowser {
    fail: bool,
    opened: RefCell<Vec<PathBuf>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        if self.fail {
            return Err(anyhow!("no display"));
        }
        Ok(())
    }
}

/// `Prompter` that replays canned answers and records the conversation.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub lines: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    /// All status lines joined with newlines.
    pub fn transcript(&self) -> String {
        self.lines.join("\n")
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("input closed while waiting for an answer"))
    }
}
