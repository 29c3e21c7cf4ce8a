//! `blast-radius`: pick an entry point and render its dependency graph.
//!
//! Scans a directory for likely entry points, asks which one to use, runs
//! `dep-tree entropy` on it and opens the resulting HTML report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use blast_radius::core::rank::RankStrategy;
use blast_radius::exit_codes;
use blast_radius::io::browser::SystemBrowser;
use blast_radius::io::config::{BlastConfig, DEFAULT_CONFIG_FILE, load_config, write_config};
use blast_radius::io::prompt::LinePrompter;
use blast_radius::io::scan::find_entry_points;
use blast_radius::io::tool::DepTreeCli;
use blast_radius::logging;
use blast_radius::visualize::{VisualizeOptions, generate_visualization};
use clap::Parser;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "blast-radius",
    version,
    about = "Find likely entry points and render their dependency graph with dep-tree"
)]
struct Cli {
    /// Directory to scan. Omit to choose from a menu.
    directory: Option<PathBuf>,

    /// Config file (missing file means defaults).
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Render this file directly, skipping the scan and selection.
    #[arg(long, conflicts_with = "list")]
    entry: Option<PathBuf>,

    /// Override the render depth.
    #[arg(long)]
    depth: Option<u32>,

    /// Override how candidates are ordered.
    #[arg(long, value_enum)]
    rank: Option<RankStrategy>,

    /// Override how many candidates are offered.
    #[arg(long)]
    limit: Option<usize>,

    /// Do not open the report in a browser.
    #[arg(long)]
    no_open: bool,

    /// Fail instead of installing the tool when it is missing.
    #[arg(long)]
    no_install: bool,

    /// Print candidates for DIRECTORY and exit without rendering.
    #[arg(long, requires = "directory")]
    list: bool,

    /// With `--list`, print candidates as JSON.
    #[arg(long, requires = "list")]
    json: bool,

    /// Write the default config to `--config` and exit.
    #[arg(long, conflicts_with_all = ["list", "entry"])]
    init_config: bool,

    /// With `--init-config`, overwrite an existing file.
    #[arg(long, requires = "init_config")]
    force: bool,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    if cli.init_config {
        return cmd_init_config(&cli.config, cli.force);
    }

    let mut config = load_config(&cli.config)?;
    apply_overrides(&mut config, &cli);
    config.validate().context("invalid command-line override")?;
    debug!(?config, "configuration loaded");

    if cli.list {
        let directory = cli
            .directory
            .as_deref()
            .context("--list requires a directory")?;
        return cmd_list(&config, directory, cli.json);
    }
    cmd_visualize(&config, &cli)
}

fn apply_overrides(config: &mut BlastConfig, cli: &Cli) {
    if let Some(depth) = cli.depth {
        config.render.depth = depth;
    }
    if let Some(rank) = cli.rank {
        config.scan.rank = rank;
    }
    if let Some(limit) = cli.limit {
        config.scan.limit = limit;
    }
}

fn cmd_init_config(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_config(path, &BlastConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_list(config: &BlastConfig, directory: &Path, json: bool) -> Result<i32> {
    let candidates = find_entry_points(directory, &config.scan)?;
    if json {
        let payload = serde_json::to_string_pretty(&candidates).context("serialize json")?;
        println!("{payload}");
    } else {
        for candidate in &candidates {
            println!("{}\t{}", candidate.size, candidate.path.display());
        }
    }
    if candidates.is_empty() {
        eprintln!("No entry points found in {}.", directory.display());
        return Ok(exit_codes::FAILED);
    }
    Ok(exit_codes::OK)
}

fn cmd_visualize(config: &BlastConfig, cli: &Cli) -> Result<i32> {
    let options = VisualizeOptions {
        directory: cli.directory.clone(),
        entry_point: cli.entry.clone(),
        workdir: std::env::current_dir().context("resolve working directory")?,
        open_browser: !cli.no_open,
        allow_install: !cli.no_install,
    };
    let tool = DepTreeCli::from_config(&config.tool);
    let browser = SystemBrowser::from_config(&config.render);
    let mut prompter = LinePrompter::stdio();

    let outcome = generate_visualization(config, &options, &tool, &browser, &mut prompter)?;
    debug!(?outcome, "run finished");
    if outcome.is_success() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::FAILED)
    }
}
