//! Doctor command
//!
//! Diagnose the scripting bridge, configuration and output directory.

use anyhow::Result;
use clap::Args;
use pim_bridge::Osascript;
use pim_core::config::Config;
use pim_core::emit::RecordKind;
use pim_storage::LogStore;
use std::path::Path;

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Show suggestions for every check
    #[arg(long)]
    pub suggestions: bool,
}

/// Check result
struct CheckResult {
    name: String,
    passed: bool,
    message: String,
    suggestion: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Execute the doctor command
pub fn execute(args: DoctorArgs, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    println!("\n{}", "1. System Environment".bold().underline());
    let mut results = check_system();

    println!("\n{}", "2. Configuration".bold().underline());
    let (config_results, config) = check_configuration(config_path);
    results.extend(config_results);

    println!("\n{}", "3. Scripting Bridge".bold().underline());
    results.push(check_bridge(&config));

    println!("\n{}", "4. Output".bold().underline());
    results.extend(check_output(&config));

    for result in &results {
        let status = if !result.passed {
            "✗".red()
        } else if result.is_warning() {
            "⚠".yellow()
        } else {
            "✓".green()
        };

        println!("   {} {}: {}", status, result.name, result.message);

        if args.suggestions {
            if let Some(suggestion) = &result.suggestion {
                println!("     {}", suggestion.dimmed());
            }
        }
    }

    let warnings: Vec<_> = results.iter().filter(|r| r.is_warning()).collect();
    let errors: Vec<_> = results.iter().filter(|r| !r.passed).collect();

    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.len().to_string().yellow(),
        errors.len().to_string().red()
    );

    if !errors.is_empty() {
        println!("\n{}", "✗ Errors:".red());
        for result in &errors {
            println!("  - {}: {}", result.name, result.message);
            if let Some(suggestion) = &result.suggestion {
                println!("    Fix: {}", suggestion);
            }
        }
    }

    if errors.is_empty() && warnings.is_empty() {
        println!("\n{} All checks passed!", "✓".green());
    }

    Ok(())
}

fn check_system() -> Vec<CheckResult> {
    let mut results = vec![CheckResult::ok("pim-export version", env!("CARGO_PKG_VERSION"))];

    if cfg!(target_os = "macos") {
        results.push(CheckResult::ok("Operating system", "macOS"));
    } else {
        results.push(CheckResult::warn(
            "Operating system",
            std::env::consts::OS,
            Some("Live exports need macOS; use --snapshot elsewhere"),
        ));
    }

    results
}

fn check_configuration(path: &Path) -> (Vec<CheckResult>, Config) {
    let name = "config.toml";
    if !path.exists() {
        return (
            vec![CheckResult::warn(
                name,
                &format!("not found at {}, using defaults", path.display()),
                Some("Run 'pim-export config init' to create"),
            )],
            Config::default(),
        );
    }

    match Config::load(path) {
        Ok(config) => (vec![CheckResult::ok(name, "valid")], config),
        Err(e) => (
            vec![CheckResult::fail(
                name,
                &format!("invalid: {}", e),
                Some("Fix the file or run 'pim-export config reset'"),
            )],
            Config::default(),
        ),
    }
}

fn check_bridge(config: &Config) -> CheckResult {
    let runner = Osascript::new(config.bridge.osascript.clone());
    if runner.is_available() {
        CheckResult::ok("osascript", runner.program())
    } else {
        CheckResult::fail(
            "osascript",
            &format!("'{}' cannot run JavaScript for Automation", runner.program()),
            Some("Set bridge.osascript to the osascript binary (usually /usr/bin/osascript)"),
        )
    }
}

fn check_output(config: &Config) -> Vec<CheckResult> {
    let dir = &config.output.directory;
    if !dir.exists() {
        return vec![CheckResult::warn(
            "Output directory",
            &format!("{} does not exist", dir.display()),
            Some("It will be created on the first export"),
        )];
    }

    let mut results = vec![CheckResult::ok("Output directory", &dir.display().to_string())];
    let store = match LogStore::new(dir) {
        Ok(store) => store,
        Err(e) => {
            results.push(CheckResult::fail("Export logs", &e.to_string(), None));
            return results;
        }
    };

    for kind in [RecordKind::Note, RecordKind::Event, RecordKind::Reminder] {
        let label = format!("Latest {} export", kind.app_name());
        match store.latest(kind) {
            Ok(Some(path)) => {
                let file = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                results.push(CheckResult::ok(&label, &file));
            }
            Ok(None) => results.push(CheckResult::ok(&label, "none yet")),
            Err(e) => results.push(CheckResult::fail(&label, &e.to_string(), None)),
        }
    }

    results
}
