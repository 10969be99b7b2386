//! Board layer: the read-only per-turn view over the grid.
//!
//! Everything in this module is rebuilt from the host snapshot at the start
//! of each turn and discarded at the end of it:
//! - Positions, directions, and the cardinal exclusion set
//! - Tiles with resource deposits and city occupancy
//! - The pawn roster and city registry, split into own and enemy subsets

mod position;
mod roster;
mod snapshot;
mod tile;

pub use position::{Direction, DirectionSet, Position};
pub use roster::{
    City, CityId, CitySite, Pawn, PawnId, PawnKind, ResearchState, TEAM_COUNT, Team,
    WORKER_CARGO_CAPACITY,
};
pub use snapshot::{
    Board, CityState, CityTileState, PlayerState, ResourceCell, Snapshot, UnitState,
};
pub use tile::{CityKey, Resource, ResourceKind, Tile};
