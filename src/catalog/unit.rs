//! Units - the trained soldiers of the realm

use serde::{Deserialize, Serialize};

use crate::core::types::{TileId, UnitId};

/// Type of unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Soldier,
    Ranger,
    Champion,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [UnitType::Soldier, UnitType::Ranger, UnitType::Champion];

    pub fn label(&self) -> &'static str {
        match self {
            UnitType::Soldier => "Soldier",
            UnitType::Ranger => "Ranger",
            UnitType::Champion => "Champion",
        }
    }

    /// Parse a table key, case-insensitive
    pub fn parse(s: &str) -> Option<UnitType> {
        match s.to_lowercase().as_str() {
            "soldier" => Some(UnitType::Soldier),
            "ranger" => Some(UnitType::Ranger),
            "champion" => Some(UnitType::Champion),
            _ => None,
        }
    }
}

/// What a unit is currently doing
///
/// State-dependent data lives on the variant, so a unit cannot carry a
/// training counter and a movement destination at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    Idle,
    Training { turns_left: u32 },
    Moving { destination: TileId },
}

/// A single unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub name: String,
    /// Fixed at creation; no leveling
    pub power: i64,
    /// Food consumed per turn
    pub upkeep: i64,
    pub location: TileId,
    pub state: UnitState,
}

impl Unit {
    pub fn is_idle(&self) -> bool {
        self.state == UnitState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_unit(state: UnitState) -> Unit {
        Unit {
            id: UnitId(1),
            unit_type: UnitType::Soldier,
            name: "Soldier 1".into(),
            power: 20,
            upkeep: 1,
            location: TileId(1),
            state,
        }
    }

    #[test]
    fn test_is_idle() {
        assert!(sample_unit(UnitState::Idle).is_idle());
        assert!(!sample_unit(UnitState::Training { turns_left: 2 }).is_idle());
        assert!(!sample_unit(UnitState::Moving { destination: TileId(2) }).is_idle());
    }

    #[test]
    fn test_parse_unit_type() {
        assert_eq!(UnitType::parse("soldier"), Some(UnitType::Soldier));
        assert_eq!(UnitType::parse("CHAMPION"), Some(UnitType::Champion));
        assert_eq!(UnitType::parse("wizard"), None);
    }
}
