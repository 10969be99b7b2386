//! Host snapshot ingestion and the per-turn board view.
//!
//! The host delivers one [`Snapshot`] per turn; [`Board::from_snapshot`]
//! validates it and derives the read-only view the policy works against:
//! a total (x, y) → [`Tile`] function in row-major order, the tile
//! partitions (resource tiles, city tiles, own city tiles), and the pawn
//! roster split into own and enemy subsets. Everything here is rebuilt
//! fresh each turn and discarded afterwards.

// Coordinates and team indices are validated in-range before casting.
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation
)]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::position::{Direction, Position};
use crate::board::roster::{
    City, CityId, CitySite, Pawn, PawnId, PawnKind, ResearchState, TEAM_COUNT, Team,
};
use crate::board::tile::{CityKey, Resource, ResourceKind, Tile};
use crate::error::SnapshotError;

/// One resource deposit in the host snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCell {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Kind of deposit.
    pub kind: ResourceKind,
    /// Amount left in the ground.
    pub amount: u32,
}

/// One mobile unit in the host snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    /// Unit identity.
    pub id: PawnId,
    /// Owning team.
    pub team: Team,
    /// Worker or cart.
    pub kind: PawnKind,
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Cargo space still free.
    pub cargo_space_left: u32,
    /// Whether the unit may act this turn.
    pub can_act: bool,
}

/// One member tile of a city in the host snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityTileState {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Whether this tile's structure may act this turn.
    pub can_act: bool,
}

/// One city in a player's registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityState {
    /// City identifier, unique within the owning team.
    pub id: CityId,
    /// Fuel stockpile.
    pub fuel: u32,
    /// Fuel consumed per night move.
    pub light_upkeep: u32,
    /// Member tiles.
    pub tiles: Vec<CityTileState>,
}

/// One player's registry in the host snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Team this entry describes.
    pub team: Team,
    /// Research milestones reached so far.
    #[serde(default)]
    pub research: ResearchState,
    /// Cities owned by this team.
    #[serde(default)]
    pub cities: Vec<CityState>,
}

/// The full game state the host delivers each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Turn index, starting at 0.
    pub step: u32,
    /// The team this policy controls.
    pub me: Team,
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Resource deposits (sparse; unlisted cells are bare ground).
    #[serde(default)]
    pub resources: Vec<ResourceCell>,
    /// Mobile units of both teams, in host roster order.
    #[serde(default)]
    pub units: Vec<UnitState>,
    /// Player registries; one entry per team.
    pub players: Vec<PlayerState>,
}

/// The read-only per-turn view over the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    me: Team,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    resource_tiles: Vec<usize>,
    city_tiles: Vec<usize>,
    own_city_tiles: Vec<usize>,
    pawns: Vec<Pawn>,
    own_pawns: Vec<usize>,
    enemy_pawns: Vec<usize>,
    own_cities: Vec<City>,
    research: [ResearchState; TEAM_COUNT],
}

impl Board {
    /// Build and validate the board view for one turn.
    ///
    /// This is a pure function of the snapshot: identical input yields an
    /// identical board, including partition order (row-major for tiles,
    /// host roster order for pawns, ascending id for own cities).
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the snapshot is structurally
    /// inconsistent; see the variants for the individual checks.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let (width, height) = checked_dimensions(snapshot.width, snapshot.height)?;
        if usize::from(snapshot.me) >= TEAM_COUNT {
            return Err(SnapshotError::UnknownTeam { team: snapshot.me });
        }

        let mut board = Self {
            me: snapshot.me,
            width,
            height,
            tiles: tile_grid(width, height),
            resource_tiles: Vec::new(),
            city_tiles: Vec::new(),
            own_city_tiles: Vec::new(),
            pawns: Vec::new(),
            own_pawns: Vec::new(),
            enemy_pawns: Vec::new(),
            own_cities: Vec::new(),
            research: [ResearchState::default(); TEAM_COUNT],
        };

        board.place_resources(snapshot)?;
        board.place_players(snapshot)?;
        board.place_units(snapshot)?;

        // Partition indices are collected in one row-major pass so that
        // every nearest-X query enumerates candidates in a fixed order.
        for (idx, tile) in board.tiles.iter().enumerate() {
            if tile.has_resource() {
                board.resource_tiles.push(idx);
            }
            if let Some(city) = tile.city {
                board.city_tiles.push(idx);
                if city.team == board.me {
                    board.own_city_tiles.push(idx);
                }
            }
        }

        Ok(board)
    }

    fn place_resources(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        for cell in &snapshot.resources {
            let pos = Position::new(cell.x, cell.y);
            let idx = self
                .checked_index(pos)
                .ok_or_else(|| self.out_of_bounds("resource", pos))?;
            if !self.tiles[idx].is_empty() {
                return Err(SnapshotError::CellConflict { x: pos.x, y: pos.y });
            }
            self.tiles[idx].resource = Some(Resource {
                kind: cell.kind,
                amount: cell.amount,
            });
        }
        Ok(())
    }

    fn place_players(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        for player in &snapshot.players {
            if usize::from(player.team) >= TEAM_COUNT {
                return Err(SnapshotError::UnknownTeam { team: player.team });
            }
        }
        for team in 0..TEAM_COUNT as Team {
            let player = snapshot
                .players
                .iter()
                .find(|p| p.team == team)
                .ok_or(SnapshotError::MissingPlayer { team })?;
            self.research[usize::from(team)] = player.research;

            for city in &player.cities {
                for site in &city.tiles {
                    let pos = Position::new(site.x, site.y);
                    let idx = self
                        .checked_index(pos)
                        .ok_or_else(|| self.out_of_bounds("city tile", pos))?;
                    if !self.tiles[idx].is_empty() {
                        return Err(SnapshotError::CellConflict { x: pos.x, y: pos.y });
                    }
                    self.tiles[idx].city = Some(CityKey { team, id: city.id });
                }
                if team == self.me {
                    self.own_cities.push(City {
                        id: city.id,
                        team,
                        fuel: city.fuel,
                        light_upkeep: city.light_upkeep,
                        tiles: city
                            .tiles
                            .iter()
                            .map(|site| CitySite {
                                pos: Position::new(site.x, site.y),
                                can_act: site.can_act,
                            })
                            .collect(),
                    });
                }
            }
        }
        self.own_cities.sort_by_key(|city| city.id);
        Ok(())
    }

    fn place_units(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let mut seen = HashSet::new();
        for unit in &snapshot.units {
            if usize::from(unit.team) >= TEAM_COUNT {
                return Err(SnapshotError::UnknownTeam { team: unit.team });
            }
            let pos = Position::new(unit.x, unit.y);
            if !self.in_bounds(pos) {
                return Err(self.out_of_bounds("unit", pos));
            }
            if !seen.insert(unit.id) {
                return Err(SnapshotError::DuplicateUnit { id: unit.id });
            }
            let slot = self.pawns.len();
            self.pawns.push(Pawn {
                id: unit.id,
                team: unit.team,
                kind: unit.kind,
                pos,
                cargo_space_left: unit.cargo_space_left,
                can_act: unit.can_act,
                slot,
            });
            if unit.team == self.me {
                self.own_pawns.push(slot);
            } else {
                self.enemy_pawns.push(slot);
            }
        }
        Ok(())
    }

    fn out_of_bounds(&self, entity: &'static str, pos: Position) -> SnapshotError {
        SnapshotError::OutOfBounds {
            entity,
            x: pos.x,
            y: pos.y,
            width: self.width as u32,
            height: self.height as u32,
        }
    }

    /// The team this policy controls.
    #[must_use]
    pub const fn me(&self) -> Team {
        self.me
    }

    /// Map width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Map height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Check whether a position lies on the map.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    const fn checked_index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// The tile at `pos`, or `None` off the map.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.checked_index(pos).map(|idx| &self.tiles[idx])
    }

    /// One step from `pos` in `direction`, if it stays on the map.
    #[must_use]
    pub fn translate_in_bounds(&self, pos: Position, direction: Direction) -> Option<Position> {
        let dest = pos.translate(direction);
        self.in_bounds(dest).then_some(dest)
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles carrying a resource deposit, in row-major order.
    pub fn resource_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.resource_tiles.iter().map(|&idx| &self.tiles[idx])
    }

    /// Tiles occupied by any city, in row-major order.
    pub fn city_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.city_tiles.iter().map(|&idx| &self.tiles[idx])
    }

    /// Tiles occupied by an own-team city, in row-major order.
    pub fn own_city_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.own_city_tiles.iter().map(|&idx| &self.tiles[idx])
    }

    /// Number of own-team city tiles.
    #[must_use]
    pub fn own_city_tile_count(&self) -> usize {
        self.own_city_tiles.len()
    }

    /// The full pawn roster, own and enemy, in host order.
    #[must_use]
    pub fn pawns(&self) -> &[Pawn] {
        &self.pawns
    }

    /// Own pawns in host roster order. The first one is the designated
    /// scout.
    pub fn own_pawns(&self) -> impl Iterator<Item = &Pawn> {
        self.own_pawns.iter().map(|&slot| &self.pawns[slot])
    }

    /// Enemy pawns in host roster order.
    pub fn enemy_pawns(&self) -> impl Iterator<Item = &Pawn> {
        self.enemy_pawns.iter().map(|&slot| &self.pawns[slot])
    }

    /// Own cities in ascending id order.
    #[must_use]
    pub fn own_cities(&self) -> &[City] {
        &self.own_cities
    }

    /// Look up an own city by id.
    #[must_use]
    pub fn own_city(&self, id: CityId) -> Option<&City> {
        self.own_cities
            .binary_search_by_key(&id, |city| city.id)
            .ok()
            .map(|idx| &self.own_cities[idx])
    }

    /// Check whether this team owns any city.
    #[must_use]
    pub fn has_own_cities(&self) -> bool {
        !self.own_cities.is_empty()
    }

    /// Research milestones of a team.
    #[must_use]
    pub fn research(&self, team: Team) -> ResearchState {
        self.research
            .get(usize::from(team))
            .copied()
            .unwrap_or_default()
    }

    /// Check whether `pawn` could found a city where it stands: the tile
    /// must be bare ground and the cargo full.
    #[must_use]
    pub fn can_found_city(&self, pawn: &Pawn) -> bool {
        pawn.cargo_full() && self.tile_at(pawn.pos).is_some_and(Tile::is_empty)
    }
}

const fn checked_dimensions(width: u32, height: u32) -> Result<(i32, i32), SnapshotError> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(SnapshotError::BadDimensions { width, height });
    }
    Ok((width as i32, height as i32))
}

fn tile_grid(width: i32, height: i32) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            tiles.push(Tile::empty(Position::new(x, y)));
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot(width: u32, height: u32) -> Snapshot {
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

    fn worker(id: PawnId, team: Team, x: i32, y: i32) -> UnitState {
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

    #[test]
    fn test_build_partitions() {
        let mut snapshot = empty_snapshot(4, 3);
        snapshot.resources.push(ResourceCell {
            x: 1,
            y: 1,
            kind: ResourceKind::Wood,
            amount: 500,
        });
        snapshot.players[0].cities.push(CityState {
            id: 1,
            fuel: 40,
            light_upkeep: 23,
            tiles: vec![CityTileState {
                x: 0,
                y: 0,
                can_act: true,
            }],
        });
        snapshot.players[1].cities.push(CityState {
            id: 1,
            fuel: 10,
            light_upkeep: 23,
            tiles: vec![CityTileState {
                x: 3,
                y: 2,
                can_act: true,
            }],
        });
        snapshot.units.push(worker(7, 0, 2, 2));
        snapshot.units.push(worker(9, 1, 3, 1));

        let board = Board::from_snapshot(&snapshot).unwrap();

        assert_eq!(board.tiles().len(), 12);
        assert_eq!(board.resource_tiles().count(), 1);
        assert_eq!(board.city_tiles().count(), 2);
        assert_eq!(board.own_city_tile_count(), 1);
        assert_eq!(board.own_pawns().count(), 1);
        assert_eq!(board.enemy_pawns().count(), 1);
        assert_eq!(board.own_cities().len(), 1);
        assert_eq!(board.own_city(1).unwrap().fuel, 40);
        assert!(board.own_city(2).is_none());

        let tile = board.tile_at(Position::new(1, 1)).unwrap();
        assert_eq!(tile.resource.unwrap().kind, ResourceKind::Wood);
        let enemy_city = board.tile_at(Position::new(3, 2)).unwrap();
        assert_eq!(enemy_city.city.unwrap().team, 1);
    }

    #[test]
    fn test_build_is_pure() {
        let mut snapshot = empty_snapshot(5, 5);
        snapshot.resources.push(ResourceCell {
            x: 4,
            y: 4,
            kind: ResourceKind::Coal,
            amount: 350,
        });
        snapshot.units.push(worker(1, 0, 0, 0));
        snapshot.units.push(worker(2, 1, 4, 0));

        let first = Board::from_snapshot(&snapshot).unwrap();
        let second = Board::from_snapshot(&snapshot).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let snapshot = empty_snapshot(0, 8);
        assert_eq!(
            Board::from_snapshot(&snapshot),
            Err(SnapshotError::BadDimensions {
                width: 0,
                height: 8
            })
        );
    }

    #[test]
    fn test_unit_out_of_bounds_rejected() {
        let mut snapshot = empty_snapshot(4, 4);
        snapshot.units.push(worker(1, 0, 4, 0));
        assert!(matches!(
            Board::from_snapshot(&snapshot),
            Err(SnapshotError::OutOfBounds {
                entity: "unit",
                x: 4,
                y: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_resource_on_city_rejected() {
        let mut snapshot = empty_snapshot(4, 4);
        snapshot.resources.push(ResourceCell {
            x: 2,
            y: 2,
            kind: ResourceKind::Wood,
            amount: 100,
        });
        snapshot.players[0].cities.push(CityState {
            id: 1,
            fuel: 0,
            light_upkeep: 23,
            tiles: vec![CityTileState {
                x: 2,
                y: 2,
                can_act: true,
            }],
        });
        assert_eq!(
            Board::from_snapshot(&snapshot),
            Err(SnapshotError::CellConflict { x: 2, y: 2 })
        );
    }

    #[test]
    fn test_missing_player_rejected() {
        let mut snapshot = empty_snapshot(4, 4);
        snapshot.players.pop();
        assert_eq!(
            Board::from_snapshot(&snapshot),
            Err(SnapshotError::MissingPlayer { team: 1 })
        );
    }

    #[test]
    fn test_duplicate_unit_rejected() {
        let mut snapshot = empty_snapshot(4, 4);
        snapshot.units.push(worker(1, 0, 0, 0));
        snapshot.units.push(worker(1, 1, 1, 1));
        assert_eq!(
            Board::from_snapshot(&snapshot),
            Err(SnapshotError::DuplicateUnit { id: 1 })
        );
    }

    #[test]
    fn test_can_found_city() {
        let mut snapshot = empty_snapshot(4, 4);
        snapshot.resources.push(ResourceCell {
            x: 1,
            y: 0,
            kind: ResourceKind::Wood,
            amount: 100,
        });
        let mut full = worker(1, 0, 0, 0);
        full.cargo_space_left = 0;
        let mut on_resource = worker(2, 0, 1, 0);
        on_resource.cargo_space_left = 0;
        let empty_cargo = worker(3, 0, 2, 0);
        snapshot.units.push(full);
        snapshot.units.push(on_resource);
        snapshot.units.push(empty_cargo);

        let board = Board::from_snapshot(&snapshot).unwrap();
        let pawns: Vec<_> = board.own_pawns().collect();
        assert!(board.can_found_city(pawns[0]));
        assert!(!board.can_found_city(pawns[1]));
        assert!(!board.can_found_city(pawns[2]));
    }
}
