//! CLI command implementations for Lumen.

pub(crate) mod check;
pub(crate) mod eval;
pub(crate) mod turn;

mod output;

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use lumen::{PolicyConfig, Snapshot};

/// Output format for the `turn` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable action tokens.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `eval` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum EvalFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lumen::SnapshotError> for CliError {
    fn from(e: lumen::SnapshotError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load and parse a snapshot JSON file.
pub(crate) fn load_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::new(format!("Failed to parse {}: {e}", path.display())))
}

/// Load a policy config file, or fall back to the defaults.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<PolicyConfig, CliError> {
    let Some(path) = path else {
        return Ok(PolicyConfig::default());
    };
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::new(format!("Failed to parse {}: {e}", path.display())))
}
