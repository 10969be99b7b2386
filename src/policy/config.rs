//! Tunable policy thresholds.
//!
//! Every empirically-tuned constant of the policy lives here so that
//! variants differing only in caps or horizons are configuration, not
//! copied logic. The empty-tile weight multipliers in particular are tuned
//! values with no derivation; treat them as knobs, not truths.

use serde::{Deserialize, Serialize};

use crate::board::ResourceKind;

/// A scheduled long-range scouting mission for the designated lead pawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoutMission {
    /// Turn on which the mission triggers.
    pub at_turn: u32,
    /// Resource kind to head for. Coal and uranium missions only trigger
    /// once the kind is researched.
    pub kind: ResourceKind,
    /// The target must lie further than board width / `radius_divisor`.
    pub radius_divisor: i32,
    /// Only retarget if a mission for this kind is still pending.
    pub refresh_only: bool,
}

/// All tunable thresholds of the turn policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Stop founding cities at this many own city tiles.
    pub hard_city_limit: usize,
    /// Stop producing workers at this many workers, until uranium research
    /// waives the cap.
    pub hard_unit_limit: usize,
    /// Empty-tile weight multiplier when no own city tile is adjacent.
    pub far_city_multiplier: f64,
    /// Empty-tile weight multiplier when no resource tile is adjacent.
    pub far_resource_multiplier: f64,
    /// Divisor of the fuel term in the delivery-target score: a city tile
    /// scores distance + fuel / (bias × upkeep), mildly preferring poorer
    /// cities among near-equal distances.
    pub delivery_fuel_bias: f64,
    /// A delivery city closer than this is checked for urgent need.
    pub needy_city_radius: u32,
    /// Moves of upkeep the nearest city must cover before gathering beats
    /// delivering.
    pub needy_city_horizon: u32,
    /// Catchment radius is board width / this divisor.
    pub catchment_divisor: i32,
    /// Moves of upkeep used in the distance-weighted local fuel check.
    pub local_upkeep_horizon: u32,
    /// Catchment resource supply must cover this multiple of the projected
    /// night upkeep before expansion is allowed.
    pub supply_cover_factor: f64,
    /// Minimum own-pawn count before scouting missions trigger.
    pub scout_min_pawns: usize,
    /// Scheduled scouting missions, in trigger order.
    pub scout_missions: Vec<ScoutMission>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            hard_city_limit: 40,
            hard_unit_limit: 10,
            far_city_multiplier: 2.0,
            far_resource_multiplier: 1.2,
            delivery_fuel_bias: 100.0,
            needy_city_radius: 5,
            needy_city_horizon: 10,
            catchment_divisor: 4,
            local_upkeep_horizon: 5,
            supply_cover_factor: 2.0,
            scout_min_pawns: 2,
            scout_missions: vec![
                ScoutMission {
                    at_turn: 39,
                    kind: ResourceKind::Wood,
                    radius_divisor: 3,
                    refresh_only: false,
                },
                ScoutMission {
                    at_turn: 119,
                    kind: ResourceKind::Wood,
                    radius_divisor: 2,
                    refresh_only: true,
                },
                ScoutMission {
                    at_turn: 159,
                    kind: ResourceKind::Coal,
                    radius_divisor: 2,
                    refresh_only: false,
                },
            ],
        }
    }
}
