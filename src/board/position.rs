//! Grid coordinates and single-step directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A coordinate on the board.
///
/// Coordinates are signed so that off-board positions (one step past an
/// edge, or the corners of a catchment scan) can be represented and then
/// rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn distance_to(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The position one step in `direction` (no bounds check).
    #[must_use]
    pub const fn translate(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The single-step direction that moves closest to `target`.
    ///
    /// Cardinals are probed in the fixed order N, E, S, W and the first one
    /// that strictly reduces the Manhattan distance wins; if none does
    /// (already at the target, or tied) the result is [`Direction::Center`].
    #[must_use]
    pub fn direction_to(self, target: Self) -> Direction {
        let mut closest = self.distance_to(target);
        let mut best = Direction::Center;
        for direction in Direction::CARDINALS {
            let dist = self.translate(direction).distance_to(target);
            if dist < closest {
                closest = dist;
                best = direction;
            }
        }
        best
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single-step move direction, including the stay-put no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// One step up (y - 1).
    North,
    /// One step right (x + 1).
    East,
    /// One step down (y + 1).
    South,
    /// One step left (x - 1).
    West,
    /// Stay on the current tile.
    Center,
}

impl Direction {
    /// The four cardinal directions in probe order.
    pub const CARDINALS: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Coordinate offset of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::Center => (0, 0),
        }
    }

    /// The next cardinal clockwise; `Center` stays `Center`.
    ///
    /// Used as the sidestep when a scouting move's first-choice direction
    /// is blocked.
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
            Self::Center => Self::Center,
        }
    }

    /// Bit index for [`DirectionSet`] membership; `None` for `Center`.
    const fn bit(self) -> Option<u8> {
        match self {
            Self::North => Some(0),
            Self::East => Some(1),
            Self::South => Some(2),
            Self::West => Some(3),
            Self::Center => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::North => "n",
            Self::East => "e",
            Self::South => "s",
            Self::West => "w",
            Self::Center => "c",
        };
        f.write_str(token)
    }
}

/// A set of excluded cardinal directions.
///
/// `Center` is never excluded: the broker accepts it unconditionally, so the
/// retry loops only ever need to rule out cardinals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet {
    bits: u8,
}

impl DirectionSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Check whether `direction` is in the set. `Center` never is.
    #[must_use]
    pub fn contains(self, direction: Direction) -> bool {
        direction.bit().is_some_and(|b| self.bits & (1 << b) != 0)
    }

    /// Insert a cardinal, returning `true` if it was newly added.
    ///
    /// Inserting `Center` is a no-op that returns `false`.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let Some(b) = direction.bit() else {
            return false;
        };
        let mask = 1 << b;
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    /// Number of cardinals in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.bits.count_ones()
    }

    /// Check whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}
