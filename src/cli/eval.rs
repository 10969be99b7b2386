//! Eval command implementation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use lumen::Session;
use rayon::prelude::*;
use tracing::warn;

use super::output::{EvalStats, JsonEvalResult, format_eval_csv, format_eval_text};
use super::{CliError, EvalFormat, load_config, load_snapshot};

/// Execute the eval command: sweep a directory of snapshot files and
/// aggregate per-kind action statistics.
///
/// Snapshots are independent, so each gets a fresh session and the sweep
/// parallelizes across files.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or contains no
/// snapshot files.
pub(crate) fn execute(
    dir: PathBuf,
    config: Option<PathBuf>,
    threads: Option<usize>,
    format: EvalFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_ref())?;

    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", dir.display())))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(CliError::new(format!(
            "No snapshot files (*.json) in {}",
            dir.display()
        )));
    }

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let pb = if progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} snapshots",
                )
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each worker folds into its own stats block; blocks merge at the end.
    let stats = files
        .par_iter()
        .fold(EvalStats::default, |mut local, path| {
            match evaluate(path, &config) {
                Ok(output) => local.add_output(&output),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "snapshot evaluation failed");
                    local.add_failure();
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(EvalStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let duration = start.elapsed();

    match format {
        EvalFormat::Text => {
            print!("{}", format_eval_text(&stats));
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        EvalFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonEvalResult::from_stats(&stats))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        EvalFormat::Csv => {
            print!("{}", format_eval_csv(&stats));
        }
    }

    Ok(())
}

fn evaluate(path: &Path, config: &lumen::PolicyConfig) -> Result<lumen::TurnOutput, CliError> {
    let snapshot = load_snapshot(path)?;
    let mut session = Session::new(config.clone());
    Ok(session.play_turn(&snapshot)?)
}
