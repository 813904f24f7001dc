//! pim-export - Apple Notes, Calendar and Reminders exporter
//!
//! Exports macOS personal-information data to timestamped text logs.
//!
//! ## Quick Start
//!
//! ```bash
//! # Export every note (except "Recently Deleted")
//! pim-export notes
//!
//! # Export a single folder
//! pim-export notes "Journal"
//!
//! # Events and reminders from the last 3 days
//! pim-export calendar
//! pim-export reminders --days 7
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
