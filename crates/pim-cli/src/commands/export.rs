//! Export commands
//!
//! Export Notes, Calendar events or Reminders to a timestamped log file.
//!
//! The log holds only the exported records and the count footer. Progress,
//! diagnostics and the elapsed-time report go to stderr and never into the
//! log file.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Args;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use pim_bridge::{Osascript, ScriptedStore};
use pim_core::config::Config;
use pim_core::emit::ExportSummary;
use pim_core::export::{CalendarExporter, Exporter, NotesExporter, RemindersExporter};
use pim_core::source::SnapshotStore;
use pim_core::traverse::NoteFilter;
use pim_core::window::MAX_LOOKBACK_DAYS;
use pim_core::TimeWindow;
use pim_storage::LogStore;

/// Where the export is read from and written to
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Read from a JSON snapshot instead of the live store
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Directory for the export log (default: output.directory from config)
    #[arg(long, short, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Write the export to stdout instead of a log file
    #[arg(long, conflicts_with = "out_dir")]
    pub stdout: bool,
}

/// Arguments for the notes command
#[derive(Debug, Args)]
pub struct NotesArgs {
    /// Only export the folder with exactly this name
    pub folder: Option<String>,

    /// Skip an account (repeatable, added to the configured list)
    #[arg(long = "exclude-account", value_name = "NAME")]
    pub exclude_accounts: Vec<String>,

    /// Skip a folder (repeatable, added to the configured list)
    #[arg(long = "exclude-folder", value_name = "NAME")]
    pub exclude_folders: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the calendar and reminders commands
#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Days before now to include (default: lookback_days from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_LOOKBACK_DAYS as i64))]
    pub days: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute the notes command
pub fn execute_notes(args: NotesArgs, config: &Config) -> Result<()> {
    let filter = notes_filter(&args, config);

    match &args.output.snapshot {
        Some(path) => {
            let store = load_snapshot(path)?;
            run(&NotesExporter::new(&store, filter), &args.output, config)
        }
        None => {
            let store = live_store(config);
            run(&NotesExporter::new(&store, filter), &args.output, config)
        }
    }
}

/// Execute the calendar command
pub fn execute_calendar(args: WindowArgs, config: &Config) -> Result<()> {
    let days = args.days.unwrap_or(config.calendar.lookback_days);
    let window = TimeWindow::trailing_days(Utc::now(), days)?;
    debug!("Calendar window: {} .. {}", window.start, window.end);

    match &args.output.snapshot {
        Some(path) => {
            let store = load_snapshot(path)?;
            run(&CalendarExporter::new(&store, window), &args.output, config)
        }
        None => {
            let store = live_store(config);
            run(&CalendarExporter::new(&store, window), &args.output, config)
        }
    }
}

/// Execute the reminders command
pub fn execute_reminders(args: WindowArgs, config: &Config) -> Result<()> {
    let days = args.days.unwrap_or(config.reminders.lookback_days);
    let window = TimeWindow::trailing_days(Utc::now(), days)?;
    debug!("Reminders window: {} .. {}", window.start, window.end);

    match &args.output.snapshot {
        Some(path) => {
            let store = load_snapshot(path)?;
            run(&RemindersExporter::new(&store, window), &args.output, config)
        }
        None => {
            let store = live_store(config);
            run(&RemindersExporter::new(&store, window), &args.output, config)
        }
    }
}

/// Configured filter plus command-line additions
fn notes_filter(args: &NotesArgs, config: &Config) -> NoteFilter {
    let mut filter = config.notes.filter();
    filter
        .excluded_accounts
        .extend(args.exclude_accounts.iter().cloned());
    filter
        .excluded_folders
        .extend(args.exclude_folders.iter().cloned());
    if let Some(folder) = &args.folder {
        filter.target_folder = Some(folder.clone());
    }
    filter
}

fn load_snapshot(path: &Path) -> Result<SnapshotStore> {
    SnapshotStore::load(path).context(format!("Failed to load snapshot {}", path.display()))
}

fn live_store(config: &Config) -> ScriptedStore<Osascript> {
    ScriptedStore::new(Osascript::new(config.bridge.osascript.clone()))
}

/// Run an exporter into stdout or a new log file
fn run(exporter: &dyn Exporter, output: &OutputArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let kind = exporter.kind();
    let started = Instant::now();
    eprintln!("Exporting {}...", kind.app_name().cyan());

    if output.stdout {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let summary = exporter
            .export(&mut lock)
            .context(format!("Failed to export {}", kind.app_name()))?;
        lock.flush().context("Failed to write to stdout")?;
        report(&summary, None, started);
        return Ok(());
    }

    let dir = output
        .out_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let store = LogStore::new(&dir)
        .context(format!("Failed to open output directory {}", dir.display()))?;

    let mut log = store.begin(kind, &Local::now())?;
    debug!("Export log: {:?}", log.final_path());
    let summary = exporter
        .export(&mut log)
        .context(format!("Failed to export {}", kind.app_name()))?;
    let path = log.commit()?;

    report(&summary, Some(path.as_path()), started);
    Ok(())
}

fn report(summary: &ExportSummary, path: Option<&Path>, started: Instant) {
    use colored::Colorize;

    let elapsed = started.elapsed();
    match path {
        Some(path) => eprintln!(
            "{} Exported {} {}(s) to {}",
            "✓".green(),
            summary.count.to_string().yellow(),
            summary.kind,
            path.display()
        ),
        None => eprintln!(
            "{} Exported {} {}(s)",
            "✓".green(),
            summary.count.to_string().yellow(),
            summary.kind
        ),
    }
    eprintln!(
        "  Elapsed: {:.2}s ({} ms)",
        elapsed.as_secs_f64(),
        elapsed.as_millis()
    );
}
