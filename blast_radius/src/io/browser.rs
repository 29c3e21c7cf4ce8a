//! Opening the generated report in the system's default browser.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::io::config::RenderConfig;
use crate::io::process::run_detached;

pub trait Browser {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Hands a `file://` URL to an opener command.
///
/// Defaults to the platform opener (`xdg-open`, `open`, `start`); a configured
/// `render.browser_command` replaces it and receives the URL as its last
/// argument.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    command: Vec<String>,
}

impl SystemBrowser {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            command: config.browser_command.clone(),
        }
    }

    fn opener(&self, url: &str) -> Command {
        match self.command.split_first() {
            Some((program, args)) => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(url);
                cmd
            }
            None => platform_opener(url),
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&self, path: &Path) -> Result<()> {
        let url = file_url(path);
        debug!(url = %url, "opening browser");
        let status = run_detached(self.opener(&url)).with_context(|| format!("open {url}"))?;
        if !status.success() {
            return Err(anyhow!(
                "browser opener exited with status {:?}",
                status.code()
            ));
        }
        Ok(())
    }
}

/// `file://` URL for an absolute path, using forward slashes.
pub fn file_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    if normalized.starts_with('/') {
        format!("file://{normalized}")
    } else {
        format!("file:///{normalized}")
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn platform_opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_path_gets_two_slashes() {
        assert_eq!(
            file_url(Path::new("/tmp/out/graph.html")),
            "file:///tmp/out/graph.html"
        );
    }

    #[test]
    fn drive_path_gets_three_slashes() {
        assert_eq!(
            file_url(Path::new("C:\\out\\graph.html")),
            "file:///C:/out/graph.html"
        );
    }

    #[cfg(unix)]
    #[test]
    fn configured_command_receives_url() {
        let temp = tempfile::tempdir().expect("tempdir");
        let marker = temp.path().join("opened.txt");
        let config = RenderConfig {
            browser_command: vec![
                "sh".to_string(),
                "-c".to_string(),
                format!("printf '%s' \"$1\" > '{}'", marker.display()),
                "opener".to_string(),
            ],
            ..RenderConfig::default()
        };

        SystemBrowser::from_config(&config)
            .open(Path::new("/tmp/graph.html"))
            .expect("open");
        assert_eq!(
            std::fs::read_to_string(&marker).expect("read marker"),
            "file:///tmp/graph.html"
        );
    }

    #[cfg(unix)]
    #[test]
    fn open_returns_while_launched_browser_keeps_running() {
        use std::time::{Duration, Instant};

        let config = RenderConfig {
            browser_command: vec![
                "sh".to_string(),
                "-c".to_string(),
                "sleep 5 & exit 0".to_string(),
                "opener".to_string(),
            ],
            ..RenderConfig::default()
        };

        let started = Instant::now();
        SystemBrowser::from_config(&config)
            .open(Path::new("/tmp/graph.html"))
            .expect("open");
        assert!(
            started.elapsed() < Duration::from_secs(3),
            "blocked for {:?}",
            started.elapsed()
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_opener_is_an_error() {
        let config = RenderConfig {
            browser_command: vec!["false".to_string()],
            ..RenderConfig::default()
        };
        let err = SystemBrowser::from_config(&config)
            .open(Path::new("/tmp/graph.html"))
            .unwrap_err();
        assert!(err.to_string().contains("browser opener exited"));
    }
}
