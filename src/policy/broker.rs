//! Move broker: the per-turn collision-avoidance protocol.
//!
//! Every pawn, own and enemy, holds one reservation: the cell it will
//! occupy after this turn. Reservations are seeded with current positions
//! (a standing pawn blocks its cell), and a pawn's reservation is rewritten
//! at most once, when the broker commits its move. Pawns processed earlier
//! in the turn claim contested cells first; later pawns are deflected into
//! the exclusion retry or end the turn without moving. The whole table is
//! scoped to one turn.

use crate::board::{Board, Direction, Pawn, Position};

/// The per-turn reservation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveBroker {
    reservations: Vec<Position>,
}

impl MoveBroker {
    /// Build the table for this turn, seeding every pawn's reservation with
    /// its current position.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            reservations: board.pawns().iter().map(|pawn| pawn.pos).collect(),
        }
    }

    /// The cell `slot`'s pawn is currently bound for.
    #[must_use]
    pub fn reservation(&self, slot: usize) -> Position {
        self.reservations[slot]
    }

    /// Check whether `pawn` may step in `direction` without committing.
    ///
    /// `Center` is always legal. A cardinal step is legal when the
    /// destination is on the map, is not an enemy city tile, and is either
    /// unreserved or an own-team city tile (friendly structures permit
    /// stacking; open ground does not).
    #[must_use]
    pub fn can_move(&self, board: &Board, pawn: &Pawn, direction: Direction) -> bool {
        if direction == Direction::Center {
            return true;
        }
        let Some(dest) = board.translate_in_bounds(pawn.pos, direction) else {
            return false;
        };
        let Some(tile) = board.tile_at(dest) else {
            return false;
        };
        if tile.has_city() && !tile.has_own_city(pawn.team) {
            return false;
        }
        let reserved = self.reservations.iter().any(|&r| r == dest);
        !reserved || tile.has_own_city(pawn.team)
    }

    /// Validate a step and, if legal, commit it as `pawn`'s reservation.
    ///
    /// Returns `false` and leaves the table untouched when the step is
    /// illegal.
    pub fn try_move(&mut self, board: &Board, pawn: &Pawn, direction: Direction) -> bool {
        if !self.can_move(board, pawn, direction) {
            return false;
        }
        self.reservations[pawn.slot] = pawn.pos.translate(direction);
        true
    }
}
