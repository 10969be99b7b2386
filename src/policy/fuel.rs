//! Fuel forecasting: night demand versus banked and in-ground supply.
//!
//! These are the gates that decide whether a cargo-full worker founds a
//! city, keeps harvesting, or turns home. The catchment scans are a
//! locality stand-in for true per-city resource assignment: they compare
//! what is banked and still in the ground near the pawn against the
//! projected upkeep of the cities in the same square.

use crate::board::{Board, City, Pawn, Position};
use crate::policy::clock::night_moves_left;
use crate::policy::config::PolicyConfig;

/// Check whether `city` already banks enough fuel for every remaining
/// night move of the match.
///
/// Such a city is skipped as a delivery target and no longer argues for
/// expansion caution. Never true at zero fuel while upkeep remains.
#[must_use]
pub fn too_much_fuel(city: &City, turn: u32) -> bool {
    u64::from(city.fuel) > u64::from(city.light_upkeep) * u64::from(night_moves_left(turn))
}

/// Short-horizon delivery check: `false` when the nearest city still worth
/// delivering to is close by and cannot cover the configured horizon of
/// upkeep from its current stockpile.
///
/// Used to let partially loaded workers break off harvesting and deliver.
#[must_use]
pub fn cities_have_enough_fuel(
    board: &Board,
    pawn: &Pawn,
    turn: u32,
    config: &PolicyConfig,
) -> bool {
    if let Some((city, dist)) = nearest_needy_city(board, pawn, turn, config) {
        if dist < config.needy_city_radius
            && u64::from(city.light_upkeep) * u64::from(config.needy_city_horizon)
                > u64::from(city.fuel)
        {
            return false;
        }
    }
    true
}

/// The nearest own city still worth delivering to, with its tile distance.
///
/// Same selection score as the delivery query (distance plus the small
/// fuel term), but as a side-effect-free probe: no broker, no exclusions.
#[must_use]
pub fn nearest_needy_city<'a>(
    board: &'a Board,
    pawn: &Pawn,
    turn: u32,
    config: &PolicyConfig,
) -> Option<(&'a City, u32)> {
    let mut best: Option<(f64, &City, u32)> = None;
    for tile in board.own_city_tiles() {
        let Some(city) = tile.city.and_then(|key| board.own_city(key.id)) else {
            continue;
        };
        if too_much_fuel(city, turn) {
            continue;
        }
        let dist = pawn.pos.distance_to(tile.pos);
        let upkeep = f64::from(city.light_upkeep.max(1));
        let value =
            f64::from(dist) + f64::from(city.fuel) / (config.delivery_fuel_bias * upkeep);
        if best.is_none_or(|(v, _, _)| value < v) {
            best = Some((value, city, dist));
        }
    }
    best.map(|(_, city, dist)| (city, dist))
}

/// Banked fuel versus distance-weighted short-horizon upkeep around a pawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFuel {
    /// Fuel banked by own cities in the catchment.
    pub banked: u64,
    /// Upkeep over the local horizon, discounted by distance from the pawn.
    pub short_term_need: f64,
}

impl LocalFuel {
    /// Check whether the banked fuel covers the short-term need.
    #[must_use]
    pub fn covered(&self) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let banked = self.banked as f64;
        banked >= self.short_term_need
    }
}

/// Scan the catchment square around `pawn` for own-city fuel levels.
///
/// Multi-tile cities contribute once per member tile in range; the
/// distance discount is per tile, not per city.
#[must_use]
pub fn fuel_levels(board: &Board, pawn: &Pawn, config: &PolicyConfig) -> LocalFuel {
    let mut banked = 0u64;
    let mut short_term_need = 0.0f64;
    for_each_catchment_tile(board, pawn, config, |(pos, dist)| {
        let Some(tile) = board.tile_at(pos) else {
            return;
        };
        let Some(city) = tile
            .city
            .filter(|key| key.team == board.me())
            .and_then(|key| board.own_city(key.id))
        else {
            return;
        };
        banked += u64::from(city.fuel);
        short_term_need += f64::from(city.light_upkeep) * f64::from(config.local_upkeep_horizon)
            / f64::from(1 + dist);
    });
    LocalFuel {
        banked,
        short_term_need,
    }
}

/// Resource supply versus projected night upkeep in the catchment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchmentSupply {
    /// Resource amount in the ground this team may already harvest.
    pub accessible: u64,
    /// Resource amount in the ground regardless of research.
    pub total: u64,
    /// Night upkeep of the catchment's own cities to match end.
    pub projected_need: u64,
}

impl CatchmentSupply {
    /// Check whether supply covers `factor` times the projected need.
    #[must_use]
    pub fn covers(&self, factor: f64) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let supply = (self.accessible + self.total) as f64;
        #[allow(clippy::cast_precision_loss)]
        let need = self.projected_need as f64;
        supply >= factor * need
    }
}

/// Scan the catchment square around `pawn` for in-ground supply and the
/// projected upkeep of the own cities inside it.
#[must_use]
pub fn catchment_supply(
    board: &Board,
    pawn: &Pawn,
    turn: u32,
    config: &PolicyConfig,
) -> CatchmentSupply {
    let research = board.research(board.me());
    let nights = u64::from(night_moves_left(turn));
    let mut supply = CatchmentSupply {
        accessible: 0,
        total: 0,
        projected_need: 0,
    };
    for_each_catchment_tile(board, pawn, config, |(pos, _)| {
        let Some(tile) = board.tile_at(pos) else {
            return;
        };
        if let Some(resource) = tile.resource {
            supply.total += u64::from(resource.amount);
            if research.grants_access(resource.kind) {
                supply.accessible += u64::from(resource.amount);
            }
        }
        if let Some(city) = tile
            .city
            .filter(|key| key.team == board.me())
            .and_then(|key| board.own_city(key.id))
        {
            supply.projected_need += u64::from(city.light_upkeep) * nights;
        }
    });
    supply
}

/// Visit every in-square catchment cell with its distance from the pawn.
/// The radius is board width / the configured divisor.
fn for_each_catchment_tile<F>(board: &Board, pawn: &Pawn, config: &PolicyConfig, mut visit: F)
where
    F: FnMut((Position, u32)),
{
    let radius = board.width() / config.catchment_divisor.max(1);
    for y in (pawn.pos.y - radius)..=(pawn.pos.y + radius) {
        for x in (pawn.pos.x - radius)..=(pawn.pos.x + radius) {
            let pos = Position::new(x, y);
            if board.in_bounds(pos) {
                visit((pos, pawn.pos.distance_to(pos)));
            }
        }
    }
}
