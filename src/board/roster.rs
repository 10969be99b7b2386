//! Mobile pawns, city structures, and per-player research state.

use serde::{Deserialize, Serialize};

use crate::board::position::Position;
use crate::board::tile::ResourceKind;

/// Team index. Matches are always two-sided: team 0 and team 1.
pub type Team = u8;

/// Unique identifier of a mobile unit.
pub type PawnId = u32;

/// City identifier, unique within one team.
pub type CityId = u32;

/// Number of teams in a match.
pub const TEAM_COUNT: usize = 2;

/// Cargo capacity of a worker pawn.
pub const WORKER_CARGO_CAPACITY: u32 = 100;

/// Role of a mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PawnKind {
    /// Harvests, hauls, and founds cities.
    Worker,
    /// Hauls only; never acts in this policy.
    Cart,
}

/// A mobile unit, own or enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pawn {
    /// Unit identity.
    pub id: PawnId,
    /// Owning team.
    pub team: Team,
    /// Worker or cart.
    pub kind: PawnKind,
    /// Current position.
    pub pos: Position,
    /// Cargo space still free (0 = full).
    pub cargo_space_left: u32,
    /// Whether the unit may act this turn.
    pub can_act: bool,
    /// Index into the board's pawn roster; keys the broker's reservation.
    pub slot: usize,
}

impl Pawn {
    /// Check whether this pawn is a worker.
    #[must_use]
    pub fn is_worker(&self) -> bool {
        self.kind == PawnKind::Worker
    }

    /// Check whether cargo is completely full.
    #[must_use]
    pub const fn cargo_full(&self) -> bool {
        self.cargo_space_left == 0
    }

    /// Check whether cargo is completely empty.
    #[must_use]
    pub const fn cargo_empty(&self) -> bool {
        self.cargo_space_left == WORKER_CARGO_CAPACITY
    }
}

/// One member tile of a city, with its own action eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitySite {
    /// Position of the city tile.
    pub pos: Position,
    /// Whether this tile's structure may act this turn.
    pub can_act: bool,
}

/// A city structure: one fuel stockpile shared by its member tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// City identifier, unique within the owning team.
    pub id: CityId,
    /// Owning team.
    pub team: Team,
    /// Fuel stockpile. Never negative.
    pub fuel: u32,
    /// Fuel consumed per night move.
    pub light_upkeep: u32,
    /// Member tiles.
    pub tiles: Vec<CitySite>,
}

/// Per-player research flags.
///
/// Access is monotonic within a match: once a kind is researched it stays
/// researched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchState {
    /// Coal research milestone reached.
    #[serde(default)]
    pub coal: bool,
    /// Uranium research milestone reached.
    #[serde(default)]
    pub uranium: bool,
}

impl ResearchState {
    /// Check whether this player may harvest `kind`.
    #[must_use]
    pub const fn grants_access(self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Wood => true,
            ResourceKind::Coal => self.coal,
            ResourceKind::Uranium => self.uranium,
        }
    }
}
