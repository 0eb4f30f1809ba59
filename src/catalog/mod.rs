//! Entity catalog - tiles, buildings, units, and their static stat tables

pub mod building;
pub mod stats;
pub mod tile;
pub mod unit;

pub use building::{Building, BuildingType};
pub use stats::{BuildingStats, StatsCatalog, StatsLoadError, UnitStats};
pub use tile::{TerrainType, Tile};
pub use unit::{Unit, UnitState, UnitType};
