//! Buildings - per-tile structures that produce resources each turn

use serde::{Deserialize, Serialize};

use crate::ledger::ResourceVec;

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Farm,
    Lumbermill,
    Quarry,
    Barracks,
    TownCenter,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::Farm,
        BuildingType::Lumbermill,
        BuildingType::Quarry,
        BuildingType::Barracks,
        BuildingType::TownCenter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BuildingType::Farm => "Farm",
            BuildingType::Lumbermill => "Lumbermill",
            BuildingType::Quarry => "Quarry",
            BuildingType::Barracks => "Barracks",
            BuildingType::TownCenter => "Town Center",
        }
    }

    /// Whether units can be trained here
    pub fn trains_units(&self) -> bool {
        matches!(self, BuildingType::TownCenter | BuildingType::Barracks)
    }

    /// Parse a table key, case-insensitive
    pub fn parse(s: &str) -> Option<BuildingType> {
        match s.to_lowercase().as_str() {
            "farm" => Some(BuildingType::Farm),
            "lumbermill" => Some(BuildingType::Lumbermill),
            "quarry" => Some(BuildingType::Quarry),
            "barracks" => Some(BuildingType::Barracks),
            "town_center" | "towncenter" => Some(BuildingType::TownCenter),
            _ => None,
        }
    }
}

/// A constructed building on a tile
///
/// The production vector is copied from the stats table at construction so
/// a tile snapshot is self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_type: BuildingType,
    /// Always 1 for now; kept for the upgrade path
    pub level: u32,
    pub production: ResourceVec,
}

impl Building {
    pub fn new(building_type: BuildingType, production: ResourceVec) -> Self {
        Self {
            building_type,
            level: 1,
            production,
        }
    }
}
