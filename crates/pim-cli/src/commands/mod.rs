//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod doctor;
pub mod export;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pim_core::config::Config;
use std::path::{Path, PathBuf};

/// pim-export - Export Apple Notes, Calendar and Reminders to text logs
#[derive(Debug, Parser)]
#[command(name = "pim-export")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PIM_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export Apple Notes
    Notes(export::NotesArgs),

    /// Export recent Calendar events
    Calendar(export::WindowArgs),

    /// Export recent Reminders
    Reminders(export::WindowArgs),

    /// Diagnose the scripting bridge and configuration
    Doctor(doctor::DoctorArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = config_path(cli.config.as_deref());

    match cli.command {
        Commands::Notes(args) => export::execute_notes(args, &load_config(&cli.config, &config_path)?),
        Commands::Calendar(args) => {
            export::execute_calendar(args, &load_config(&cli.config, &config_path)?)
        }
        Commands::Reminders(args) => {
            export::execute_reminders(args, &load_config(&cli.config, &config_path)?)
        }
        Commands::Doctor(args) => doctor::execute(args, &config_path),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

/// The config file in use: `--config` or the platform default
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path)
}

/// An explicit config file must exist; the default one is optional
fn load_config(explicit: &Option<PathBuf>, path: &Path) -> Result<Config> {
    let config = if explicit.is_some() {
        Config::load(path)
    } else {
        Config::load_or_default(path)
    };
    config.with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_notes_args() {
        let cli = Cli::try_parse_from([
            "pim-export",
            "notes",
            "Journal",
            "--exclude-account",
            "On My Mac",
            "--exclude-folder",
            "Archive",
            "--stdout",
        ])
        .unwrap();

        match cli.command {
            Commands::Notes(args) => {
                assert_eq!(args.folder.as_deref(), Some("Journal"));
                assert_eq!(args.exclude_accounts, vec!["On My Mac"]);
                assert_eq!(args.exclude_folders, vec!["Archive"]);
                assert!(args.output.stdout);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zero_days_rejected() {
        assert!(Cli::try_parse_from(["pim-export", "calendar", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["pim-export", "reminders", "--days", "7"]).is_ok());
    }

    #[test]
    fn test_config_path_prefers_explicit() {
        let path = config_path(Some(Path::new("/tmp/pim.toml")));
        assert_eq!(path, PathBuf::from("/tmp/pim.toml"));
        assert!(config_path(None).ends_with("config.toml"));
    }
}
