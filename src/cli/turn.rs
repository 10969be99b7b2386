//! Turn command implementation.

use std::path::PathBuf;

use lumen::Session;

use super::{CliError, OutputFormat, load_config, load_snapshot};

/// Execute the turn command: run one decision turn over a snapshot file.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, parsed, or validated.
pub(crate) fn execute(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let snap = load_snapshot(&snapshot)?;
    let config = load_config(config.as_ref())?;

    let mut session = Session::new(config);
    let output = session.play_turn(&snap)?;

    match format {
        OutputFormat::Text => {
            for action in &output.actions {
                println!("{action}");
            }
            if output.skipped_pawns > 0 {
                eprintln!("# {} pawn(s) found no legal action", output.skipped_pawns);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
