//! Runs summary CLI - renders run plays by direction and team

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use runs_summary_core::config::{self, ResolvedConfig};
use runs_summary_core::html::render_html_page;
use runs_summary_core::session::{self, Session};
use runs_summary_core::{render_json, render_session, render_text, SummaryState};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runs-summary")]
#[command(about = "Summarize run plays by direction and team as stacked bars")]
#[command(version = env!("RUNS_SUMMARY_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount the summary on the session's page and emit the result
    Render {
        /// Path to a session JSON file
        session: PathBuf,

        /// Output format
        #[arg(long, default_value = "html")]
        format: RenderFormat,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: nearest config at or above the session)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the run tallies without rendering a page
    Aggregate {
        /// Path to a session JSON file
        session: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: AggregateFormat,

        /// Path to config file (default: nearest config at or above the session)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or inspect a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    /// Standalone HTML page
    Html,
    /// Only the summary container's markup
    Fragment,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AggregateFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            session: session_path,
            format,
            output,
            config: config_path,
        } => {
            let (session, resolved_config) = load_inputs(&session_path, config_path.as_deref())?;
            let rendered = render_session(&session, &resolved_config);

            if rendered.state == SummaryState::Uninitialized {
                eprintln!(
                    "Run summary not mounted: the page needs #{} and the schema needs \"direction\" and \"play-type\" fields",
                    resolved_config.anchors.playing_area
                );
            }

            let text = match format {
                RenderFormat::Html => render_html_page(&rendered.document, "Run Summary"),
                RenderFormat::Fragment => rendered
                    .document
                    .element_by_id(&resolved_config.anchors.container)
                    .map(|c| c.to_html())
                    .unwrap_or_default(),
            };

            match output {
                Some(path) => {
                    write_output(&path, &text)?;
                    eprintln!("Run summary written to: {}", path.display());
                }
                None => print!("{}", text),
            }
        }
        Commands::Aggregate {
            session: session_path,
            format,
            config: config_path,
        } => {
            let (session, resolved_config) = load_inputs(&session_path, config_path.as_deref())?;
            let rendered = render_session(&session, &resolved_config);

            match format {
                AggregateFormat::Text => {
                    print!("{}", render_text(&rendered.aggregate, &rendered.team_names));
                }
                AggregateFormat::Json => {
                    println!("{}", render_json(&rendered.aggregate, &rendered.team_names));
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let root = std::env::current_dir()?;
                match config::load_and_resolve(&root, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&root, path.as_deref())
                    .context("failed to load configuration")?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Load the session file and the config that applies to it
fn load_inputs(
    session_path: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<(Session, ResolvedConfig)> {
    if !session_path.exists() {
        anyhow::bail!("Session file does not exist: {}", session_path.display());
    }
    let session = session::load_session(session_path)?;

    // Absolute, so config discovery can walk above the working directory
    let absolute = session_path
        .canonicalize()
        .with_context(|| format!("failed to resolve session path: {}", session_path.display()))?;
    let root = match absolute.parent() {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let resolved_config = config::load_and_resolve(&root, config_path)
        .context("failed to load configuration")?;
    if let Some(p) = &resolved_config.config_path {
        eprintln!("Using config: {}", p.display());
    }
    tracing::debug!(
        container = %resolved_config.anchors.container,
        blue_control = %resolved_config.team_names.blue_control,
        orange_control = %resolved_config.team_names.orange_control,
        "resolved configuration"
    );

    Ok((session, resolved_config))
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Team names (used when the controls are blank):");
    println!("  blue: {}", resolved.team_names.blue_default);
    println!("  orange: {}", resolved.team_names.orange_default);
    println!();
    println!("Controls:");
    println!("  blue: #{}", resolved.team_names.blue_control);
    println!("  orange: #{}", resolved.team_names.orange_control);
    println!();
    println!("Anchors:");
    println!("  playing_area: #{}", resolved.anchors.playing_area);
    println!("  legend: #{}", resolved.anchors.legend);
    println!("  container: #{}", resolved.anchors.container);
}

/// Write output to file with atomic write pattern
fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directories if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Atomic write (temp + rename pattern)
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, text)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
