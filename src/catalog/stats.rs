//! Static stat tables - construction costs, production, and unit training data
//!
//! The tables are immutable lookup data keyed by the building/unit
//! enumerations. They ship as builtin defaults mirrored in
//! `data/catalog.toml`, which can be reloaded to rebalance without touching
//! engine code. Unknown names in a table file are rejected at the parse
//! boundary.

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::building::BuildingType;
use crate::catalog::unit::UnitType;
use crate::ledger::{ResourceType, ResourceVec};

/// Construction cost and per-turn production of a building type
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingStats {
    pub cost: ResourceVec,
    pub production: ResourceVec,
}

/// Training cost and combat profile of a unit type
#[derive(Debug, Clone, PartialEq)]
pub struct UnitStats {
    pub cost: ResourceVec,
    pub training_turns: u32,
    pub power: i64,
    pub upkeep: i64,
}

/// Error type for stat table loading
#[derive(Debug, Clone, Error)]
pub enum StatsLoadError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown building type: {0}")]
    UnknownBuildingType(String),

    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Missing building entry: {0}")]
    MissingBuilding(&'static str),

    #[error("Missing unit entry: {0}")]
    MissingUnit(&'static str),
}

/// The complete stat catalog
#[derive(Debug, Clone)]
pub struct StatsCatalog {
    buildings: [BuildingStats; BuildingType::ALL.len()],
    units: [UnitStats; UnitType::ALL.len()],
}

impl StatsCatalog {
    /// The shipped balance, mirrored in `data/catalog.toml`
    pub fn with_defaults() -> Self {
        use ResourceType::*;

        let building = |cost: ResourceVec, production: ResourceVec| BuildingStats { cost, production };

        let buildings = [
            // Farm
            building(vec![(Wood, 50)], vec![(Food, 10)]),
            // Lumbermill
            building(vec![(Wood, 75)], vec![(Wood, 10)]),
            // Quarry
            building(vec![(Wood, 100)], vec![(Stone, 10)]),
            // Barracks
            building(vec![(Wood, 150), (Stone, 50)], vec![(Valor, 5)]),
            // Town Center
            building(vec![(Wood, 200), (Stone, 100)], vec![(Food, 5), (Wood, 2)]),
        ];

        let units = [
            UnitStats {
                cost: vec![(Food, 10), (Wood, 5)],
                training_turns: 2,
                power: 20,
                upkeep: 1,
            },
            UnitStats {
                cost: vec![(Food, 15), (Wood, 10)],
                training_turns: 3,
                power: 25,
                upkeep: 2,
            },
            UnitStats {
                cost: vec![(Food, 50), (Metal, 20), (Petricite, 10)],
                training_turns: 5,
                power: 60,
                upkeep: 5,
            },
        ];

        Self { buildings, units }
    }

    pub fn building(&self, building_type: BuildingType) -> &BuildingStats {
        &self.buildings[building_type as usize]
    }

    pub fn unit(&self, unit_type: UnitType) -> &UnitStats {
        &self.units[unit_type as usize]
    }

    /// Load the catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, StatsLoadError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| StatsLoadError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse the catalog from a TOML string
    ///
    /// Every building and unit type must be present exactly once.
    pub fn parse_toml(content: &str) -> Result<Self, StatsLoadError> {
        let toml_data: TomlCatalog =
            toml::from_str(content).map_err(|e| StatsLoadError::ParseError(e.to_string()))?;

        let mut buildings: [Option<BuildingStats>; BuildingType::ALL.len()] = Default::default();
        for entry in toml_data.buildings {
            let building_type = BuildingType::parse(&entry.building_type)
                .ok_or(StatsLoadError::UnknownBuildingType(entry.building_type))?;
            buildings[building_type as usize] = Some(BuildingStats {
                cost: parse_amounts(entry.cost)?,
                production: parse_amounts(entry.production)?,
            });
        }

        let mut units: [Option<UnitStats>; UnitType::ALL.len()] = Default::default();
        for entry in toml_data.units {
            let unit_type = UnitType::parse(&entry.unit_type)
                .ok_or(StatsLoadError::UnknownUnitType(entry.unit_type))?;
            units[unit_type as usize] = Some(UnitStats {
                cost: parse_amounts(entry.cost)?,
                training_turns: entry.training_turns,
                power: entry.power,
                upkeep: entry.upkeep,
            });
        }

        let buildings = collect_buildings(buildings)?;
        let units = collect_units(units)?;
        Ok(Self { buildings, units })
    }
}

fn collect_buildings(
    slots: [Option<BuildingStats>; BuildingType::ALL.len()],
) -> Result<[BuildingStats; BuildingType::ALL.len()], StatsLoadError> {
    let mut filled = Vec::with_capacity(slots.len());
    for (slot, building_type) in slots.into_iter().zip(BuildingType::ALL) {
        filled.push(slot.ok_or(StatsLoadError::MissingBuilding(building_type.label()))?);
    }
    // Length matches BuildingType::ALL by construction
    Ok(filled.try_into().unwrap_or_else(|_| unreachable!()))
}

fn collect_units(
    slots: [Option<UnitStats>; UnitType::ALL.len()],
) -> Result<[UnitStats; UnitType::ALL.len()], StatsLoadError> {
    let mut filled = Vec::with_capacity(slots.len());
    for (slot, unit_type) in slots.into_iter().zip(UnitType::ALL) {
        filled.push(slot.ok_or(StatsLoadError::MissingUnit(unit_type.label()))?);
    }
    Ok(filled.try_into().unwrap_or_else(|_| unreachable!()))
}

fn parse_amounts(entries: Vec<TomlResourceAmount>) -> Result<ResourceVec, StatsLoadError> {
    entries
        .into_iter()
        .map(|entry| {
            let resource = ResourceType::parse(&entry.resource)
                .ok_or(StatsLoadError::UnknownResourceType(entry.resource))?;
            Ok((resource, entry.amount))
        })
        .collect()
}

/// TOML representation of the catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    buildings: Vec<TomlBuilding>,
    units: Vec<TomlUnit>,
}

#[derive(Debug, Deserialize)]
struct TomlBuilding {
    #[serde(rename = "type")]
    building_type: String,
    #[serde(default)]
    cost: Vec<TomlResourceAmount>,
    #[serde(default)]
    production: Vec<TomlResourceAmount>,
}

#[derive(Debug, Deserialize)]
struct TomlUnit {
    #[serde(rename = "type")]
    unit_type: String,
    #[serde(default)]
    cost: Vec<TomlResourceAmount>,
    training_turns: u32,
    power: i64,
    upkeep: i64,
}

#[derive(Debug, Deserialize)]
struct TomlResourceAmount {
    resource: String,
    amount: i64,
}
