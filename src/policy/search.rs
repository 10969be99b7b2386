//! Reachability and scoring queries: distance-ranked target selection.
//!
//! All three nearest-X queries share the same shape: scan the relevant
//! tile partition in row-major order (first-encountered minimum wins),
//! skip candidates whose single-step direction is excluded, then probe the
//! winning direction against the move broker. A rejected probe excludes
//! that direction and rescans; the loop is bounded by the four-cardinal
//! alphabet, because a Center-direction candidate always passes.

use crate::board::{Board, Direction, DirectionSet, Pawn, Position, ResourceKind, Team, Tile};
use crate::policy::broker::MoveBroker;
use crate::policy::config::PolicyConfig;
use crate::policy::fuel::too_much_fuel;

/// An accepted query result: the chosen target tile and the broker-approved
/// single step toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// Position of the selected target tile.
    pub pos: Position,
    /// Validated single-step direction toward it.
    pub direction: Direction,
}

/// Nearest accessible resource tile, under the exclusion retry.
///
/// Coal and uranium tiles only qualify once the pawn's team has researched
/// them. Returns `None` when no accessible tile is reachable in any
/// non-excluded direction.
#[must_use]
pub fn closest_resource(board: &Board, pawn: &Pawn, broker: &MoveBroker) -> Option<SearchHit> {
    let research = board.research(pawn.team);
    retry_with_exclusions(board, pawn, broker, |excluded| {
        let mut best: Option<(u32, Position)> = None;
        for tile in board.resource_tiles() {
            let Some(resource) = tile.resource else {
                continue;
            };
            if !research.grants_access(resource.kind) {
                continue;
            }
            if excluded.contains(pawn.pos.direction_to(tile.pos)) {
                continue;
            }
            let dist = pawn.pos.distance_to(tile.pos);
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, tile.pos));
            }
        }
        best.map(|(_, pos)| pos)
    })
}

/// Nearest buildable empty tile by weighted distance, under the exclusion
/// retry.
///
/// Raw distance is multiplied by the far-city factor when no own city tile
/// touches the candidate (8-neighborhood) and by the far-resource factor
/// when no resource tile does, biasing expansion toward tiles near both.
#[must_use]
pub fn closest_empty_tile(
    board: &Board,
    pawn: &Pawn,
    config: &PolicyConfig,
    broker: &MoveBroker,
) -> Option<SearchHit> {
    retry_with_exclusions(board, pawn, broker, |excluded| {
        let mut best: Option<(f64, Position)> = None;
        for tile in board.tiles() {
            if tile.has_resource() || tile.has_city() {
                continue;
            }
            if excluded.contains(pawn.pos.direction_to(tile.pos)) {
                continue;
            }
            let mut weighted = f64::from(pawn.pos.distance_to(tile.pos));
            if !touches_own_city(board, tile.pos, pawn.team) {
                weighted *= config.far_city_multiplier;
            }
            if !touches_resource(board, tile.pos) {
                weighted *= config.far_resource_multiplier;
            }
            if best.is_none_or(|(w, _)| weighted < w) {
                best = Some((weighted, tile.pos));
            }
        }
        best.map(|(_, pos)| pos)
    })
}

/// Nearest own city tile still worth delivering to, under the exclusion
/// retry.
///
/// Cities already holding enough fuel for every remaining night are
/// excluded as targets. Among the rest, a tile scores distance plus a small
/// fuel term, so near-equal distances resolve toward the poorer city.
#[must_use]
pub fn closest_city(
    board: &Board,
    pawn: &Pawn,
    turn: u32,
    config: &PolicyConfig,
    broker: &MoveBroker,
) -> Option<SearchHit> {
    retry_with_exclusions(board, pawn, broker, |excluded| {
        let mut best: Option<(f64, Position)> = None;
        for tile in board.own_city_tiles() {
            let Some(city) = tile.city.and_then(|key| board.own_city(key.id)) else {
                continue;
            };
            if too_much_fuel(city, turn) {
                continue;
            }
            if excluded.contains(pawn.pos.direction_to(tile.pos)) {
                continue;
            }
            let upkeep = f64::from(city.light_upkeep.max(1));
            let value = f64::from(pawn.pos.distance_to(tile.pos))
                + f64::from(city.fuel) / (config.delivery_fuel_bias * upkeep);
            if best.is_none_or(|(v, _)| value < v) {
                best = Some((value, tile.pos));
            }
        }
        best.map(|(_, pos)| pos)
    })
}

/// Nearest resource tile of `kind` strictly further than `min_radius`.
///
/// This is the scouting-target lookup: no access gating (the schedule
/// gates coal on research) and no broker involvement, since the result is
/// a multi-turn destination rather than a single step.
#[must_use]
pub fn distant_resource(
    board: &Board,
    pawn: &Pawn,
    kind: ResourceKind,
    min_radius: u32,
) -> Option<Position> {
    let mut best: Option<(u32, Position)> = None;
    for tile in board.resource_tiles() {
        if tile.resource.is_none_or(|r| r.kind != kind) {
            continue;
        }
        let dist = pawn.pos.distance_to(tile.pos);
        if dist > min_radius && best.is_none_or(|(d, _)| dist < d) {
            best = Some((dist, tile.pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Check whether any of the eight neighbors of `pos` is an own city tile.
fn touches_own_city(board: &Board, pos: Position, team: Team) -> bool {
    adjacent8(pos).any(|n| board.tile_at(n).is_some_and(|t| t.has_own_city(team)))
}

/// Check whether any of the eight neighbors of `pos` carries a resource.
fn touches_resource(board: &Board, pos: Position) -> bool {
    adjacent8(pos).any(|n| board.tile_at(n).is_some_and(Tile::has_resource))
}

fn adjacent8(pos: Position) -> impl Iterator<Item = Position> {
    (-1..=1)
        .flat_map(move |dy| (-1..=1).map(move |dx| Position::new(pos.x + dx, pos.y + dy)))
        .filter(move |&n| n != pos)
}

fn retry_with_exclusions<F>(
    board: &Board,
    pawn: &Pawn,
    broker: &MoveBroker,
    mut scan: F,
) -> Option<SearchHit>
where
    F: FnMut(DirectionSet) -> Option<Position>,
{
    let mut excluded = DirectionSet::empty();
    loop {
        let pos = scan(excluded)?;
        let direction = pawn.pos.direction_to(pos);
        if broker.can_move(board, pawn, direction) {
            return Some(SearchHit { pos, direction });
        }
        // Every failed probe is a fresh cardinal (the scan already skips
        // excluded ones), so the loop ends within four rejections.
        if !excluded.insert(direction) {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        CityState, CityTileState, PawnKind, PlayerState, ResearchState, ResourceCell, Snapshot,
        UnitState,
    };

    fn snapshot(width: u32, height: u32) -> Snapshot {
        Snapshot {
            step: 0,
            me: 0,
            width,
            height,
            resources: Vec::new(),
            units: Vec::new(),
            players: vec![
                PlayerState {
                    team: 0,
                    research: ResearchState::default(),
                    cities: Vec::new(),
                },
                PlayerState {
                    team: 1,
                    research: ResearchState::default(),
                    cities: Vec::new(),
                },
            ],
        }
    }

    fn worker(id: u32, team: u8, x: i32, y: i32) -> UnitState {
        UnitState {
            id,
            team,
            kind: PawnKind::Worker,
            x,
            y,
            cargo_space_left: 100,
            can_act: true,
        }
    }

    fn deposit(x: i32, y: i32, kind: ResourceKind) -> ResourceCell {
        ResourceCell {
            x,
            y,
            kind,
            amount: 400,
        }
    }

    fn city_tile(id: u32, fuel: u32, x: i32, y: i32) -> CityState {
        CityState {
            id,
            fuel,
            light_upkeep: 23,
            tiles: vec![CityTileState { x, y, can_act: true }],
        }
    }

    fn own_pawn(board: &Board) -> Pawn {
        *board.own_pawns().next().unwrap()
    }

    #[test]
    fn test_resource_gating_skips_unresearched_coal() {
        let mut snap = snapshot(5, 5);
        snap.units.push(worker(1, 0, 0, 0));
        snap.resources.push(deposit(1, 1, ResourceKind::Coal));
        snap.resources.push(deposit(4, 4, ResourceKind::Wood));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);

        let hit = closest_resource(&board, &own_pawn(&board), &broker).unwrap();
        assert_eq!(hit.pos, Position::new(4, 4));

        // With coal researched the closer deposit wins.
        snap.players[0].research.coal = true;
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);
        let hit = closest_resource(&board, &own_pawn(&board), &broker).unwrap();
        assert_eq!(hit.pos, Position::new(1, 1));
    }

    #[test]
    fn test_resource_none_without_candidates() {
        let mut snap = snapshot(5, 5);
        snap.units.push(worker(1, 0, 0, 0));
        snap.resources.push(deposit(2, 2, ResourceKind::Uranium));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);

        assert!(closest_resource(&board, &own_pawn(&board), &broker).is_none());
    }

    #[test]
    fn test_standing_on_resource_yields_center() {
        let mut snap = snapshot(5, 5);
        snap.units.push(worker(1, 0, 2, 2));
        snap.resources.push(deposit(2, 2, ResourceKind::Wood));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);

        let hit = closest_resource(&board, &own_pawn(&board), &broker).unwrap();
        assert_eq!(hit.direction, Direction::Center);
        assert_eq!(hit.pos, Position::new(2, 2));
    }

    #[test]
    fn test_retry_finds_last_open_direction() {
        let mut snap = snapshot(5, 5);
        snap.units.push(worker(1, 0, 2, 2));
        // Enemy pawns stand on the adjacent deposits north, east, and
        // south; only the western target is approachable. The retry must
        // burn through three rejections before it lands on west.
        snap.resources.push(deposit(2, 1, ResourceKind::Wood));
        snap.resources.push(deposit(3, 2, ResourceKind::Wood));
        snap.resources.push(deposit(2, 3, ResourceKind::Wood));
        snap.resources.push(deposit(0, 2, ResourceKind::Wood));
        snap.units.push(worker(10, 1, 2, 1));
        snap.units.push(worker(11, 1, 3, 2));
        snap.units.push(worker(12, 1, 2, 3));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);

        let hit = closest_resource(&board, &own_pawn(&board), &broker).unwrap();
        assert_eq!(hit.direction, Direction::West);
        assert_eq!(hit.pos, Position::new(0, 2));
    }

    #[test]
    fn test_retry_gives_up_fully_boxed_in() {
        let mut snap = snapshot(5, 5);
        snap.units.push(worker(1, 0, 2, 2));
        // Deposits on all four neighbors, every one occupied by an enemy:
        // the retry must probe and exclude each cardinal, then stop.
        snap.resources.push(deposit(2, 1, ResourceKind::Wood));
        snap.resources.push(deposit(3, 2, ResourceKind::Wood));
        snap.resources.push(deposit(2, 3, ResourceKind::Wood));
        snap.resources.push(deposit(1, 2, ResourceKind::Wood));
        snap.units.push(worker(10, 1, 2, 1));
        snap.units.push(worker(11, 1, 3, 2));
        snap.units.push(worker(12, 1, 2, 3));
        snap.units.push(worker(13, 1, 1, 2));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);

        assert!(closest_resource(&board, &own_pawn(&board), &broker).is_none());
    }

    #[test]
    fn test_empty_tile_weighting() {
        let mut snap = snapshot(9, 1);
        snap.units.push(worker(1, 0, 0, 0));
        snap.resources.push(deposit(0, 0, ResourceKind::Wood));
        snap.players[0].cities.push(city_tile(1, 0, 4, 0));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);
        let config = PolicyConfig::default();

        // (1, 0) is isolated from the city but near the deposit
        // (weight 1 x 2.0 = 2.0); (3, 0) touches the city
        // (weight 3 x 1.2 = 3.6). The short hop wins under the defaults.
        let hit = closest_empty_tile(&board, &own_pawn(&board), &config, &broker).unwrap();
        assert_eq!(hit.pos, Position::new(1, 0));

        // A steep far-city penalty flips the choice toward the tile beside
        // the city.
        let heavy = PolicyConfig {
            far_city_multiplier: 16.0,
            ..PolicyConfig::default()
        };
        let hit = closest_empty_tile(&board, &own_pawn(&board), &heavy, &broker).unwrap();
        assert_eq!(hit.pos, Position::new(3, 0));
    }

    #[test]
    fn test_empty_tile_skips_occupied() {
        let mut snap = snapshot(3, 1);
        snap.units.push(worker(1, 0, 0, 0));
        snap.resources.push(deposit(1, 0, ResourceKind::Wood));
        snap.players[0].cities.push(city_tile(1, 0, 2, 0));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);
        let config = PolicyConfig::default();

        // Only (0, 0) is bare ground.
        let hit = closest_empty_tile(&board, &own_pawn(&board), &config, &broker).unwrap();
        assert_eq!(hit.pos, Position::new(0, 0));
        assert_eq!(hit.direction, Direction::Center);
    }

    #[test]
    fn test_city_query_skips_well_fueled() {
        let mut snap = snapshot(9, 1);
        snap.step = 340;
        snap.units.push(worker(1, 0, 0, 0));
        // Near city banked beyond its remaining-night demand; far city poor.
        snap.players[0].cities.push(city_tile(1, 50_000, 2, 0));
        snap.players[0].cities.push(city_tile(2, 0, 6, 0));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);
        let config = PolicyConfig::default();

        let hit = closest_city(&board, &own_pawn(&board), 340, &config, &broker).unwrap();
        assert_eq!(hit.pos, Position::new(6, 0));
    }

    #[test]
    fn test_city_query_fuel_tie_break() {
        let mut snap = snapshot(9, 9);
        snap.units.push(worker(1, 0, 4, 4));
        // Equidistant city tiles; the poorer city wins the tie.
        snap.players[0].cities.push(city_tile(1, 900, 4, 2));
        snap.players[0].cities.push(city_tile(2, 100, 4, 6));
        let board = Board::from_snapshot(&snap).unwrap();
        let broker = MoveBroker::new(&board);
        let config = PolicyConfig::default();

        let hit = closest_city(&board, &own_pawn(&board), 0, &config, &broker).unwrap();
        assert_eq!(hit.pos, Position::new(4, 6));
    }

    #[test]
    fn test_distant_resource_respects_radius() {
        let mut snap = snapshot(9, 1);
        snap.units.push(worker(1, 0, 0, 0));
        snap.resources.push(deposit(2, 0, ResourceKind::Wood));
        snap.resources.push(deposit(6, 0, ResourceKind::Wood));
        let board = Board::from_snapshot(&snap).unwrap();
        let pawn = own_pawn(&board);

        assert_eq!(
            distant_resource(&board, &pawn, ResourceKind::Wood, 3),
            Some(Position::new(6, 0))
        );
        assert_eq!(distant_resource(&board, &pawn, ResourceKind::Wood, 8), None);
        assert_eq!(distant_resource(&board, &pawn, ResourceKind::Coal, 0), None);
    }
}
