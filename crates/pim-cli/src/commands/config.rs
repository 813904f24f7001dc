//! Config command
//!
//! Manage pim-export configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use pim_core::config::Config;
use std::fs;
use std::path::Path;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(path, json),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommand::Init { force } => init_config(path, force),
        ConfigCommand::Reset { force } => reset_config(path, force),
    }
}

fn show_config(path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = if path.exists() {
        Config::load(path).context(format!("Failed to load {}", path.display()))?
    } else {
        eprintln!(
            "{} Configuration not found, showing defaults. Run '{}' to create.",
            "⚠".yellow(),
            "pim-export config init".cyan()
        );
        Config::default()
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", path.display().to_string().dimmed());
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if path.exists() && !force {
        eprintln!(
            "{} Configuration already exists at {}. Use --force to overwrite.",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    Config::default()
        .save(path)
        .context(format!("Failed to write {}", path.display()))?;
    println!("{} Created {}", "✓".green(), path.display());
    Ok(())
}

fn reset_config(path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    if path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(path, &backup_path).context("Failed to back up configuration")?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    Config::default()
        .save(path)
        .context(format!("Failed to write {}", path.display()))?;
    println!("{} Configuration reset to defaults.", "✓".green());
    Ok(())
}
