//! GameWorld - the single mutable world-state aggregate
//!
//! The engine owns all mutable state: ledger, tiles, units, pending raids,
//! turn counter, log, and the deterministic RNG. Collaborators observe it
//! only through [`Snapshot`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Building, BuildingType, StatsCatalog, TerrainType, Tile, Unit};
use crate::core::config::EngineConfig;
use crate::core::types::{TileId, Turn, UnitId};
use crate::engine::log::NotificationLog;
use crate::engine::scheduler::RaidQueue;
use crate::ledger::{Ledger, ResourceType};

/// The complete world state, owned exclusively by the engine
pub struct GameWorld {
    pub config: EngineConfig,
    pub stats: StatsCatalog,
    pub ledger: Ledger,
    pub tiles: Vec<Tile>,
    pub units: Vec<Unit>,
    pub raids: RaidQueue,
    pub turn: Turn,
    pub log: NotificationLog,
    /// Deterministic RNG; all random draws go through here
    pub rng: ChaCha8Rng,
    next_unit_id: u32,
}

impl GameWorld {
    /// Build the starting campaign: five tiles, the capital owned and seeded
    /// with a Town Center, and the opening treasury
    pub fn new(config: EngineConfig, stats: StatsCatalog, seed: u64) -> Self {
        let log = NotificationLog::new(config.notification_cap);
        let town_center = Building::new(
            BuildingType::TownCenter,
            stats.building(BuildingType::TownCenter).production.clone(),
        );

        let tiles = vec![
            Tile {
                id: TileId(1),
                name: "Capital City".into(),
                terrain: TerrainType::Plains,
                owned: true,
                building: Some(town_center),
                threat: 0,
                garrison: None,
            },
            Tile::hostile(TileId(2), "North Forest", TerrainType::Forest, 10),
            Tile::hostile(TileId(3), "Iron Peak", TerrainType::Mountain, 25),
            Tile::hostile(TileId(4), "Whispering Plains", TerrainType::Plains, 5),
            Tile::hostile(TileId(5), "Petricite Grove", TerrainType::PetriciteGrove, 40),
        ];

        let ledger = Ledger::with_amounts(&[
            (ResourceType::Shields, 200),
            (ResourceType::Food, 100),
            (ResourceType::Wood, 50),
        ]);

        tracing::info!(seed, tiles = tiles.len(), "campaign started");

        Self {
            config,
            stats,
            ledger,
            tiles,
            units: Vec::new(),
            raids: RaidQueue::new(),
            turn: 0,
            log,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_unit_id: 1,
        }
    }

    /// Default config and tables, explicit seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::default(), StatsCatalog::with_defaults(), seed)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id == id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn owned_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|tile| tile.owned)
    }

    pub fn units_at(&self, tile: TileId) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |unit| unit.location == tile)
    }

    pub fn army_size(&self) -> usize {
        self.units.len()
    }

    /// Generate a new unique UnitId
    pub fn next_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Append a line to the notification log
    pub fn notify(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            ledger: self.ledger.clone(),
            tiles: self.tiles.clone(),
            units: self.units.clone(),
            notifications: self.log.to_vec(),
        }
    }
}

/// An owned, serializable view of the world state
///
/// Consumed by views and persistence sinks; mutating it has no effect on
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: Turn,
    pub ledger: Ledger,
    pub tiles: Vec<Tile>,
    pub units: Vec<Unit>,
    pub notifications: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_campaign() {
        let world = GameWorld::with_seed(42);

        assert_eq!(world.turn, 0);
        assert_eq!(world.tiles.len(), 5);
        assert_eq!(world.army_size(), 0);
        assert!(world.raids.is_empty());

        let capital = world.tile(TileId(1)).unwrap();
        assert!(capital.owned);
        assert_eq!(capital.threat, 0);
        assert_eq!(
            capital.building.as_ref().unwrap().building_type,
            BuildingType::TownCenter
        );

        let grove = world.tile(TileId(5)).unwrap();
        assert!(!grove.owned);
        assert_eq!(grove.threat, 40);

        assert_eq!(world.ledger.get(ResourceType::Shields), 200);
        assert_eq!(world.ledger.get(ResourceType::Food), 100);
        assert_eq!(world.ledger.get(ResourceType::Wood), 50);
        assert_eq!(world.ledger.get(ResourceType::Valor), 0);
    }

    #[test]
    fn test_next_unit_id_monotonic() {
        let mut world = GameWorld::with_seed(42);
        let a = world.next_unit_id();
        let b = world.next_unit_id();
        assert_eq!(a, UnitId(1));
        assert_eq!(b, UnitId(2));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut world = GameWorld::with_seed(42);
        let snapshot = world.snapshot();

        world.ledger.credit(ResourceType::Wood, 100);
        world.notify("something happened");

        assert_eq!(snapshot.ledger.get(ResourceType::Wood), 50);
        assert!(snapshot.notifications.is_empty());
    }
}
