//! Action tokens emitted back to the host, plus visualization overlays.

use std::fmt;

use serde::Serialize;

use crate::board::{Direction, PawnId, Position};

/// One action token for one acting unit or structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Action {
    /// Step a pawn one tile (or hold with `Center`).
    Move {
        /// Acting pawn.
        unit: PawnId,
        /// Committed direction.
        direction: Direction,
    },
    /// Found a city on the pawn's current tile.
    BuildCity {
        /// Acting pawn.
        unit: PawnId,
    },
    /// Produce a worker at a city tile.
    BuildWorker {
        /// The producing city tile.
        city_tile: Position,
    },
    /// Advance research at a city tile.
    Research {
        /// The researching city tile.
        city_tile: Position,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { unit, direction } => write!(f, "m {unit} {direction}"),
            Self::BuildCity { unit } => write!(f, "bcity {unit}"),
            Self::BuildWorker { city_tile } => write!(f, "bw {} {}", city_tile.x, city_tile.y),
            Self::Research { city_tile } => write!(f, "r {} {}", city_tile.x, city_tile.y),
        }
    }
}

/// A visualization overlay with no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Annotation {
    /// A line from a pawn to its committed destination.
    Line {
        /// Start of the line.
        from: Position,
        /// End of the line.
        to: Position,
    },
    /// A marker on a scouting target.
    Mark {
        /// Marked cell.
        pos: Position,
    },
}

/// Everything one turn of the policy produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnOutput {
    /// Action tokens, one per acting unit or structure.
    pub actions: Vec<Action>,
    /// Overlay annotations.
    pub annotations: Vec<Annotation>,
    /// Pawns that wanted to act but found no legal target or step.
    pub skipped_pawns: u32,
}
