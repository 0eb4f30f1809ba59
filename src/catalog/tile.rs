//! Map tiles - the territory the campaign is fought over

use serde::{Deserialize, Serialize};

use crate::catalog::building::Building;
use crate::core::types::{TileId, UnitId};

/// Terrain kind, currently cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Plains,
    Forest,
    Mountain,
    PetriciteGrove,
}

impl TerrainType {
    pub fn label(&self) -> &'static str {
        match self {
            TerrainType::Plains => "Plains",
            TerrainType::Forest => "Forest",
            TerrainType::Mountain => "Mountain",
            TerrainType::PetriciteGrove => "Petricite Grove",
        }
    }
}

/// A single map tile
///
/// A tile holds at most one building and a garrison reference. It does not
/// own units; each unit tracks its own location by tile id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    pub terrain: TerrainType,
    pub owned: bool,
    pub building: Option<Building>,
    /// 0 = pacified; a newly conquered tile is always reset to 0
    pub threat: i64,
    pub garrison: Option<UnitId>,
}

impl Tile {
    /// A hostile, unowned tile
    pub fn hostile(id: TileId, name: impl Into<String>, terrain: TerrainType, threat: i64) -> Self {
        Self {
            id,
            name: name.into(),
            terrain,
            owned: false,
            building: None,
            threat,
            garrison: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostile_tile_starts_unowned() {
        let tile = Tile::hostile(TileId(2), "North Forest", TerrainType::Forest, 10);
        assert!(!tile.owned);
        assert_eq!(tile.threat, 10);
        assert!(tile.building.is_none());
        assert!(tile.garrison.is_none());
    }

    #[test]
    fn test_terrain_labels() {
        assert_eq!(TerrainType::PetriciteGrove.label(), "Petricite Grove");
        assert_eq!(TerrainType::Plains.label(), "Plains");
    }
}
