//! Policy layer: the per-turn decision engine.
//!
//! Built leaf-first on the board view:
//! - day/night clock and the remaining-night forecast
//! - fuel gates comparing banked and in-ground supply against upkeep
//! - distance-ranked target queries with the exclusion retry
//! - the move broker serializing simultaneous steps into a conflict-free
//!   set
//! - the turn orchestrator tying it together per pawn and per city tile

mod broker;
mod clock;
mod config;
mod fuel;
mod search;
mod turn;

pub use broker::MoveBroker;
pub use clock::{CYCLE_MOVES, DAY_MOVES, MATCH_MOVES, NIGHT_MOVES, is_night, night_moves_left};
pub use config::{PolicyConfig, ScoutMission};
pub use fuel::{
    CatchmentSupply, LocalFuel, catchment_supply, cities_have_enough_fuel, fuel_levels,
    nearest_needy_city, too_much_fuel,
};
pub use search::{
    SearchHit, closest_city, closest_empty_tile, closest_resource, distant_resource,
};
pub use turn::Session;
