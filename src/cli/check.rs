//! Check command implementation.

use std::path::PathBuf;

use lumen::{Board, ResourceKind};

use super::{CliError, load_snapshot};

/// Execute the check command: validate a snapshot file and print a
/// structural summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// snapshot fails structural validation.
pub(crate) fn execute(snapshot: PathBuf) -> Result<(), CliError> {
    let snap = load_snapshot(&snapshot)?;
    let board = Board::from_snapshot(&snap)
        .map_err(|e| CliError::new(format!("Invalid snapshot: {e}")))?;

    println!("Snapshot OK: {}", snapshot.display());
    println!("  Step: {} (team {})", snap.step, board.me());
    println!("  Map: {}x{}", board.width(), board.height());
    println!(
        "  Resource tiles: {} ({} wood, {} coal, {} uranium)",
        board.resource_tiles().count(),
        count_kind(&board, ResourceKind::Wood),
        count_kind(&board, ResourceKind::Coal),
        count_kind(&board, ResourceKind::Uranium),
    );
    println!(
        "  City tiles: {} ({} own)",
        board.city_tiles().count(),
        board.own_city_tile_count()
    );
    println!(
        "  Pawns: {} own, {} enemy",
        board.own_pawns().count(),
        board.enemy_pawns().count()
    );
    let research = board.research(board.me());
    println!(
        "  Research: coal {}, uranium {}",
        research.coal, research.uranium
    );

    Ok(())
}

fn count_kind(board: &Board, kind: ResourceKind) -> usize {
    board
        .resource_tiles()
        .filter(|tile| tile.resource.is_some_and(|r| r.kind == kind))
        .count()
}
