//! Per-cell derived views: resources and city occupancy.

use serde::{Deserialize, Serialize};

use crate::board::position::Position;
use crate::board::roster::{CityId, Team};

/// The three harvestable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Always harvestable.
    Wood,
    /// Harvestable after coal research.
    Coal,
    /// Harvestable after uranium research.
    Uranium,
}

/// A resource deposit on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Kind of resource.
    pub kind: ResourceKind,
    /// Amount left in the ground.
    pub amount: u32,
}

/// Reference from a tile to the city structure occupying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityKey {
    /// Owning team.
    pub team: Team,
    /// City identifier, unique per team.
    pub id: CityId,
}

/// One cell's read-only view for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Position of this tile.
    pub pos: Position,
    /// Resource deposit, if any.
    pub resource: Option<Resource>,
    /// City occupying this tile, if any.
    pub city: Option<CityKey>,
}

impl Tile {
    /// An empty tile at `pos`.
    #[must_use]
    pub const fn empty(pos: Position) -> Self {
        Self {
            pos,
            resource: None,
            city: None,
        }
    }

    /// Check whether a resource deposit is present.
    #[must_use]
    pub const fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// Check whether any city occupies this tile.
    #[must_use]
    pub const fn has_city(&self) -> bool {
        self.city.is_some()
    }

    /// Check whether a city of `team` occupies this tile.
    #[must_use]
    pub fn has_own_city(&self, team: Team) -> bool {
        self.city.is_some_and(|c| c.team == team)
    }

    /// Check whether the tile carries neither resource nor city.
    ///
    /// Empty tiles are the only legal city-founding sites.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.resource.is_none() && self.city.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tile() {
        let tile = Tile::empty(Position::new(2, 3));
        assert!(tile.is_empty());
        assert!(!tile.has_resource());
        assert!(!tile.has_city());
    }

    #[test]
    fn test_own_city_check() {
        let mut tile = Tile::empty(Position::new(0, 0));
        tile.city = Some(CityKey { team: 1, id: 4 });
        assert!(tile.has_city());
        assert!(tile.has_own_city(1));
        assert!(!tile.has_own_city(0));
        assert!(!tile.is_empty());
    }
}
