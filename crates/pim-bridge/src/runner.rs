//! Script execution

use pim_core::error::{PimError, Result};
use std::process::Command;
use tracing::{debug, trace};

/// The JXA program run for every bridge operation
pub const BRIDGE_SCRIPT: &str = include_str!("../scripts/bridge.js");

/// Runs one bridge operation and returns its stdout
pub trait ScriptRunner {
    fn run(&self, operation: &str, args: &[String]) -> Result<String>;
}

/// Runs [`BRIDGE_SCRIPT`] through `osascript -l JavaScript`
#[derive(Debug, Clone)]
pub struct Osascript {
    program: String,
}

impl Osascript {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check that the program can be spawned and evaluates a trivial script
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .args(["-l", "JavaScript", "-e", "1"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new("osascript")
    }
}

impl ScriptRunner for Osascript {
    fn run(&self, operation: &str, args: &[String]) -> Result<String> {
        debug!("osascript {} {:?}", operation, args);
        let output = Command::new(&self.program)
            .args(["-l", "JavaScript", "-e", BRIDGE_SCRIPT, operation])
            .args(args)
            .output()
            .map_err(|e| PimError::Bridge {
                operation: operation.to_string(),
                message: format!("failed to execute {}: {}", self.program, e),
            })?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            trace!("osascript {} returned {} bytes", operation, stdout.len());
            Ok(stdout)
        } else {
            Err(PimError::Bridge {
                operation: operation.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
