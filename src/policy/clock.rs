//! The day/night cycle and the remaining-night forecast.

/// Day moves per cycle.
pub const DAY_MOVES: u32 = 30;

/// Night moves per cycle.
pub const NIGHT_MOVES: u32 = 10;

/// Total moves per day/night cycle.
pub const CYCLE_MOVES: u32 = DAY_MOVES + NIGHT_MOVES;

/// Total moves in a match.
pub const MATCH_MOVES: u32 = 360;

/// Check whether `turn` falls in the night segment of its cycle.
#[must_use]
pub const fn is_night(turn: u32) -> bool {
    turn % CYCLE_MOVES >= DAY_MOVES
}

/// Upkeep-charged night moves remaining from `turn` to match end.
///
/// During the day the current cycle's night is still fully ahead, so it
/// counts as a whole night; during the night only the untaken remainder of
/// the segment counts. Monotonically non-increasing in `turn`, dropping by
/// exactly [`NIGHT_MOVES`] over each elapsed cycle, and 0 from move
/// [`MATCH_MOVES`] on.
#[must_use]
pub const fn night_moves_left(turn: u32) -> u32 {
    if turn >= MATCH_MOVES {
        return 0;
    }
    let cycle = turn / CYCLE_MOVES;
    let phase = turn % CYCLE_MOVES;
    let cycles_left = MATCH_MOVES / CYCLE_MOVES - cycle;
    if phase < DAY_MOVES {
        cycles_left * NIGHT_MOVES
    } else {
        (CYCLE_MOVES - phase) + (cycles_left - 1) * NIGHT_MOVES
    }
}
