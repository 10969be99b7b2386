//! Output formatting utilities for CLI.

use lumen::{Action, TurnOutput};
use serde::Serialize;

/// Aggregated statistics over an evaluation sweep.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct EvalStats {
    /// Snapshot files evaluated successfully.
    pub(super) files: u64,
    /// Files that failed to parse or validate.
    pub(super) failures: u64,
    /// Total actions emitted.
    pub(super) actions: u64,
    /// Move actions.
    pub(super) moves: u64,
    /// City foundations.
    pub(super) city_builds: u64,
    /// Worker productions.
    pub(super) worker_builds: u64,
    /// Research actions.
    pub(super) researches: u64,
    /// Pawns that found no legal action.
    pub(super) skipped: u64,
}

impl EvalStats {
    /// Fold one turn's output into the stats.
    pub(super) fn add_output(&mut self, output: &TurnOutput) {
        self.files += 1;
        self.actions += output.actions.len() as u64;
        self.skipped += u64::from(output.skipped_pawns);
        for action in &output.actions {
            match action {
                Action::Move { .. } => self.moves += 1,
                Action::BuildCity { .. } => self.city_builds += 1,
                Action::BuildWorker { .. } => self.worker_builds += 1,
                Action::Research { .. } => self.researches += 1,
            }
        }
    }

    /// Record a file that could not be evaluated.
    pub(super) fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge another stats block into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.files += other.files;
        self.failures += other.failures;
        self.actions += other.actions;
        self.moves += other.moves;
        self.city_builds += other.city_builds;
        self.worker_builds += other.worker_builds;
        self.researches += other.researches;
        self.skipped += other.skipped;
    }

    /// Average actions per evaluated snapshot.
    pub(super) fn actions_per_turn(&self) -> f64 {
        if self.files == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.actions as f64 / self.files as f64;
        ratio
    }
}

/// JSON-serializable evaluation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonEvalResult {
    /// Snapshot files evaluated.
    files: u64,
    /// Files that failed.
    failures: u64,
    /// Total actions emitted.
    actions: u64,
    /// Average actions per snapshot.
    actions_per_turn: f64,
    /// Move actions.
    moves: u64,
    /// City foundations.
    city_builds: u64,
    /// Worker productions.
    worker_builds: u64,
    /// Research actions.
    researches: u64,
    /// Pawns without a legal action.
    skipped_pawns: u64,
}

impl JsonEvalResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &EvalStats) -> Self {
        Self {
            files: stats.files,
            failures: stats.failures,
            actions: stats.actions,
            actions_per_turn: stats.actions_per_turn(),
            moves: stats.moves,
            city_builds: stats.city_builds,
            worker_builds: stats.worker_builds,
            researches: stats.researches,
            skipped_pawns: stats.skipped,
        }
    }
}

/// Format evaluation stats as human-readable text.
pub(super) fn format_eval_text(stats: &EvalStats) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Eval Results ({} snapshots, {} failures)\n",
        stats.files, stats.failures
    ));
    out.push_str(&format!(
        "  Actions: {} ({:.1} per turn)\n",
        stats.actions,
        stats.actions_per_turn()
    ));
    out.push_str(&format!("  Moves: {}\n", stats.moves));
    out.push_str(&format!("  City builds: {}\n", stats.city_builds));
    out.push_str(&format!("  Worker builds: {}\n", stats.worker_builds));
    out.push_str(&format!("  Research: {}\n", stats.researches));
    out.push_str(&format!("  Skipped pawns: {}\n", stats.skipped));
    out
}

/// Format evaluation stats as CSV.
pub(super) fn format_eval_csv(stats: &EvalStats) -> String {
    let mut out = String::new();
    out.push_str("files,failures,actions,actions_per_turn,moves,city_builds,worker_builds,researches,skipped_pawns\n");
    out.push_str(&format!(
        "{},{},{},{:.3},{},{},{},{},{}\n",
        stats.files,
        stats.failures,
        stats.actions,
        stats.actions_per_turn(),
        stats.moves,
        stats.city_builds,
        stats.worker_builds,
        stats.researches,
        stats.skipped,
    ));
    out
}
