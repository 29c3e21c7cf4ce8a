//! Tool configuration stored in `blast_radius.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::rank::RankStrategy;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "blast_radius.toml";

/// Top-level configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults
/// for a Ruby codebase analysed with `dep-tree`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlastConfig {
    /// Directories offered by the interactive menu, in order.
    pub menu: Vec<String>,
    pub scan: ScanConfig,
    pub tool: ToolConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Source file extensions, without the dot.
    pub extensions: Vec<String>,
    /// Path substrings that disqualify a file (test directories).
    pub exclude_markers: Vec<String>,
    /// A file qualifies if its contents contain any of these.
    pub keywords: Vec<String>,
    /// Maximum number of candidates presented.
    pub limit: usize,
    pub rank: RankStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable providing `--version` and `entropy`.
    pub program: String,
    /// Command run when the executable is missing (e.g. `["pip","install","python-dep-tree"]`).
    pub install_command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Output directory, relative to the working directory unless absolute.
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Recursion depth passed as `--depth`.
    pub depth: u32,
    /// File filter passed as `--include`.
    pub include: String,
    /// Opener for the report, URL appended. Empty means the platform default.
    pub browser_command: Vec<String>,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            menu: ["core", "frontend", "backend", "api", "lib"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scan: ScanConfig::default(),
            tool: ToolConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["rb".to_string()],
            exclude_markers: vec!["spec/".to_string(), "test/".to_string()],
            keywords: vec!["class ".to_string(), "module ".to_string()],
            limit: 5,
            rank: RankStrategy::SmallestFirst,
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "dep-tree".to_string(),
            install_command: vec![
                "pip".to_string(),
                "install".to_string(),
                "python-dep-tree".to_string(),
            ],
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("blast_radius_output"),
            output_file: "dependency_graph.html".to_string(),
            depth: 5,
            include: "*.rb".to_string(),
            browser_command: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Install command as a single shell-style line for operator messages.
    pub fn install_hint(&self) -> String {
        self.install_command.join(" ")
    }
}

impl RenderConfig {
    /// Output file path relative to `workdir` (or absolute if configured so).
    pub fn output_path(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.output_dir).join(&self.output_file)
    }
}

impl BlastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.menu.iter().any(|entry| entry.trim().is_empty()) {
            return Err(anyhow!("menu entries must be non-empty"));
        }
        if self.scan.extensions.is_empty() {
            return Err(anyhow!("scan.extensions must be a non-empty array"));
        }
        if self.scan.keywords.iter().all(|keyword| keyword.is_empty()) {
            return Err(anyhow!("scan.keywords must contain a non-empty keyword"));
        }
        if self.scan.limit == 0 {
            return Err(anyhow!("scan.limit must be > 0"));
        }
        if self.tool.program.trim().is_empty() {
            return Err(anyhow!("tool.program must be non-empty"));
        }
        if self.tool.install_command.is_empty() || self.tool.install_command[0].trim().is_empty()
        {
            return Err(anyhow!("tool.install_command must be a non-empty array"));
        }
        if self
            .render
            .browser_command
            .first()
            .is_some_and(|program| program.trim().is_empty())
        {
            return Err(anyhow!("render.browser_command must start with a program"));
        }
        if self.render.output_file.trim().is_empty() {
            return Err(anyhow!("render.output_file must be non-empty"));
        }
        if self.render.depth == 0 {
            return Err(anyhow!("render.depth must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BlastConfig::default()`.
pub fn load_config(path: &Path) -> Result<BlastConfig> {
    if !path.exists() {
        let cfg = BlastConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BlastConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BlastConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, BlastConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("blast_radius.toml");
        let mut cfg = BlastConfig::default();
        cfg.scan.rank = RankStrategy::Path;
        cfg.render.depth = 3;
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("blast_radius.toml");
        fs::write(
            &path,
            "menu = [\"src\"]\n\n[scan]\nextensions = [\"py\"]\n\n[render]\ninclude = \"*.py\"\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.menu, vec!["src".to_string()]);
        assert_eq!(cfg.scan.extensions, vec!["py".to_string()]);
        assert_eq!(cfg.scan.limit, 5);
        assert_eq!(cfg.render.include, "*.py");
        assert_eq!(cfg.render.depth, 5);
        assert_eq!(cfg.tool.program, "dep-tree");
    }

    #[test]
    fn zero_limit_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("blast_radius.toml");
        fs::write(&path, "[scan]\nlimit = 0\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("scan.limit must be > 0"));
    }

    #[test]
    fn blank_browser_program_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("blast_radius.toml");
        fs::write(&path, "[render]\nbrowser_command = [\" \", \"--new-tab\"]\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("render.browser_command"));
    }

    #[test]
    fn output_path_joins_dir_and_file() {
        let render = RenderConfig::default();
        assert_eq!(
            render.output_path(Path::new("/work")),
            PathBuf::from("/work/blast_radius_output/dependency_graph.html")
        );
    }
}
