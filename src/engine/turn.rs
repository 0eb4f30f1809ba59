//! End-turn pipeline - the fixed-order resolution step
//!
//! Order is load-bearing: cost gate, production, upkeep, training, movement,
//! raid planning, raid resolution, turn increment. Production precedes the
//! unit phases so nothing trained this turn is paid for with resources it
//! produced itself.

use crate::catalog::UnitState;
use crate::core::error::{CommandError, Result};
use crate::engine::combat::{garrison_defense, resolve_raid_defense, RaidOutcome};
use crate::engine::scheduler::{plan_raid, ScheduledRaid};
use crate::engine::world::GameWorld;
use crate::ledger::ResourceType;

/// Advance the world by one turn, or reject without touching anything if
/// the shield cost cannot be paid
pub fn end_turn(world: &mut GameWorld) -> Result<()> {
    let cost = world.config.turn_shield_cost;
    let have = world.ledger.get(ResourceType::Shields);
    if have < cost {
        return Err(CommandError::NotEnoughShields { needed: cost, have });
    }

    // 1. Turn cost
    world.ledger.debit_all(&[(ResourceType::Shields, cost)]);
    world.notify(format!("Deducted {} Silver Shields for ending the turn.", cost));

    // 2. Production
    run_production(world);

    // 3. Upkeep
    run_upkeep(world);

    // 4. Training
    run_training(world);

    // 5. Movement
    run_movement(world);

    // 6. Raid planning
    plan_raid(world);

    // 7. Raids due on the incoming turn
    let new_turn = world.turn + 1;
    for raid in world.raids.drain_due(new_turn) {
        resolve_raid(world, &raid);
    }

    // 8. Turn increment
    world.turn = new_turn;
    world.notify(format!("Turn {} started.", new_turn));
    tracing::debug!(turn = new_turn, "turn resolved");
    Ok(())
}

/// Credit every owned tile's building output, one log line per resource
fn run_production(world: &mut GameWorld) {
    let mut credits = Vec::new();
    for tile in world.owned_tiles() {
        if let Some(building) = &tile.building {
            for &(resource, amount) in &building.production {
                credits.push((tile.name.clone(), building.building_type.label(), resource, amount));
            }
        }
    }

    for (tile_name, building_label, resource, amount) in credits {
        world.ledger.credit(resource, amount);
        world.notify(format!(
            "Gained {} {} from {}'s {}.",
            amount, resource, tile_name, building_label
        ));
    }
}

/// Deduct total unit upkeep from food; a negative balance is the
/// starvation signal
fn run_upkeep(world: &mut GameWorld) {
    let total: i64 = world.units.iter().map(|unit| unit.upkeep).sum();
    if total == 0 {
        return;
    }

    world.ledger.debit_all(&[(ResourceType::Food, total)]);
    world.notify(format!("Paid {} food for unit upkeep.", total));

    if world.ledger.get(ResourceType::Food) < 0 {
        tracing::warn!(food = world.ledger.get(ResourceType::Food), "food shortage");
        world.notify("WARNING: Food shortage! The army is starving.");
    }
}

/// Tick every training unit down one turn
fn run_training(world: &mut GameWorld) {
    let mut messages = Vec::new();
    for unit in &mut world.units {
        if let UnitState::Training { turns_left } = unit.state {
            let remaining = turns_left.saturating_sub(1);
            if remaining == 0 {
                unit.state = UnitState::Idle;
                messages.push(format!("{} has finished training and is now idle!", unit.name));
            } else {
                unit.state = UnitState::Training { turns_left: remaining };
                messages.push(format!("{} is training ({} turns left).", unit.name, remaining));
            }
        }
    }
    for message in messages {
        world.notify(message);
    }
}

/// Deliver every marching unit to its destination
fn run_movement(world: &mut GameWorld) {
    let mut arrivals = Vec::new();
    for unit in &mut world.units {
        if let UnitState::Moving { destination } = unit.state {
            unit.location = destination;
            unit.state = UnitState::Idle;
            arrivals.push((unit.name.clone(), destination));
        }
    }
    for (name, destination) in arrivals {
        let tile_name = world
            .tile(destination)
            .map(|tile| tile.name.clone())
            .unwrap_or_default();
        world.notify(format!("{} arrived at {}.", name, tile_name));
    }
}

/// Resolve one due raid against its target's garrison
fn resolve_raid(world: &mut GameWorld, raid: &ScheduledRaid) {
    let Some(tile) = world.tile(raid.target) else {
        return;
    };
    let tile_name = tile.name.clone();

    // The tile changed hands since the raid was planned: nothing to plunder
    if !tile.owned {
        world.notify(format!("An enemy warband found {} abandoned and dispersed.", tile_name));
        return;
    }

    let defense = garrison_defense(world, raid.target);
    world.notify(format!(
        "{} is under attack! Defense: {} vs Threat: {}.",
        tile_name, defense, raid.threat
    ));

    match resolve_raid_defense(defense, raid.threat) {
        RaidOutcome::Held => {
            let valor = world.config.defense_valor;
            world.ledger.credit(ResourceType::Valor, valor);
            world.notify(format!(
                "The garrison held {}! Gained {} Valor.",
                tile_name, valor
            ));
        }
        RaidOutcome::Overrun => {
            if let Some(tile) = world.tile_mut(raid.target) {
                tile.owned = false;
                tile.building = None;
                tile.garrison = None;
            }
            world.units.retain(|unit| unit.location != raid.target);
            world.notify(format!(
                "{} was overrun! The garrison and its works are lost.",
                tile_name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuildingType, Unit, UnitType};
    use crate::core::types::{TileId, UnitId};
    use crate::engine::command::{construct_building, train_unit};

    fn conquer(world: &mut GameWorld, tile: TileId) {
        let tile = world.tile_mut(tile).unwrap();
        tile.owned = true;
        tile.threat = 0;
    }

    fn spawn_idle(world: &mut GameWorld, location: TileId, power: i64) -> UnitId {
        let id = world.next_unit_id();
        world.units.push(Unit {
            id,
            unit_type: UnitType::Soldier,
            name: format!("Soldier {}", id.0),
            power,
            upkeep: 1,
            location,
            state: UnitState::Idle,
        });
        id
    }

    #[test]
    fn test_turn_gate_leaves_world_untouched() {
        let mut world = GameWorld::with_seed(42);
        world.ledger.set(ResourceType::Shields, 9);
        let before = world.snapshot();

        let err = end_turn(&mut world).unwrap_err();
        assert_eq!(err, CommandError::NotEnoughShields { needed: 10, have: 9 });

        let after = world.snapshot();
        assert_eq!(after.turn, before.turn);
        assert_eq!(after.ledger, before.ledger);
        assert_eq!(after.tiles, before.tiles);
        assert_eq!(after.units, before.units);
    }

    #[test]
    fn test_turn_debits_shields_and_increments() {
        let mut world = GameWorld::with_seed(42);

        end_turn(&mut world).unwrap();

        assert_eq!(world.turn, 1);
        assert_eq!(world.ledger.get(ResourceType::Shields), 190);
        assert_eq!(world.log.latest(), Some("Turn 1 started."));
    }

    #[test]
    fn test_production_credits_owned_buildings() {
        let mut world = GameWorld::with_seed(42);

        // Capital's Town Center produces 5 food + 2 wood
        end_turn(&mut world).unwrap();
        assert_eq!(world.ledger.get(ResourceType::Food), 105);
        assert_eq!(world.ledger.get(ResourceType::Wood), 52);

        // A farm on a second tile joins the output
        conquer(&mut world, TileId(4));
        world.ledger.set(ResourceType::Wood, 50);
        construct_building(&mut world, TileId(4), BuildingType::Farm).unwrap();
        end_turn(&mut world).unwrap();
        assert_eq!(world.ledger.get(ResourceType::Food), 120);
    }

    #[test]
    fn test_unowned_buildings_do_not_produce() {
        let mut world = GameWorld::with_seed(42);
        // Hostile tiles carry no buildings, so only the capital produces
        end_turn(&mut world).unwrap();
        assert_eq!(world.ledger.get(ResourceType::Stone), 0);
    }

    #[test]
    fn test_upkeep_deducts_food() {
        let mut world = GameWorld::with_seed(42);
        spawn_idle(&mut world, TileId(1), 20);
        spawn_idle(&mut world, TileId(1), 20);

        end_turn(&mut world).unwrap();

        // +5 town center food, -2 upkeep
        assert_eq!(world.ledger.get(ResourceType::Food), 103);
    }

    #[test]
    fn test_starvation_warning_on_negative_food() {
        let mut world = GameWorld::with_seed(42);
        world.ledger.set(ResourceType::Food, 0);
        spawn_idle(&mut world, TileId(1), 20);
        world.units[0].upkeep = 10;

        end_turn(&mut world).unwrap();

        assert!(world.ledger.get(ResourceType::Food) < 0);
        assert!(world.log.iter().any(|line| line.contains("starving")));
    }

    #[test]
    fn test_training_takes_exactly_n_turns() {
        let mut world = GameWorld::with_seed(42);
        train_unit(&mut world, TileId(1), UnitType::Soldier).unwrap();
        let id = world.units[0].id;

        end_turn(&mut world).unwrap();
        assert_eq!(
            world.unit(id).unwrap().state,
            UnitState::Training { turns_left: 1 }
        );

        end_turn(&mut world).unwrap();
        assert!(world.unit(id).unwrap().is_idle());
    }

    #[test]
    fn test_movement_arrives_next_turn() {
        let mut world = GameWorld::with_seed(42);
        conquer(&mut world, TileId(4));
        let id = spawn_idle(&mut world, TileId(1), 20);
        world.unit_mut(id).unwrap().state = UnitState::Moving { destination: TileId(4) };

        end_turn(&mut world).unwrap();

        let unit = world.unit(id).unwrap();
        assert_eq!(unit.location, TileId(4));
        assert!(unit.is_idle());
        assert!(world.log.iter().any(|line| line.contains("arrived at Whispering Plains")));
    }

    #[test]
    fn test_raid_planned_on_cadence_turn() {
        let mut world = GameWorld::with_seed(42);
        world.ledger.set(ResourceType::Shields, 2000);
        world.turn = 4;

        end_turn(&mut world).unwrap();

        assert_eq!(world.raids.len(), 1);
        let raid = world.raids.pending()[0];
        assert_eq!(raid.attack_turn, 9);
        assert_eq!(raid.threat, 15 + 4 * 2);
        // The only owned tile is the capital
        assert_eq!(raid.target, TileId(1));
    }

    #[test]
    fn test_no_raid_without_owned_tiles() {
        let mut world = GameWorld::with_seed(42);
        world.tile_mut(TileId(1)).unwrap().owned = false;
        world.turn = 4;

        end_turn(&mut world).unwrap();
        assert!(world.raids.is_empty());
    }

    #[test]
    fn test_raid_overruns_weak_garrison() {
        let mut world = GameWorld::with_seed(42);
        conquer(&mut world, TileId(4));
        world.ledger.set(ResourceType::Wood, 50);
        construct_building(&mut world, TileId(4), BuildingType::Farm).unwrap();
        let id = spawn_idle(&mut world, TileId(4), 10);
        world.tile_mut(TileId(4)).unwrap().garrison = Some(id);

        world.turn = 8;
        world.raids.push(ScheduledRaid { target: TileId(4), attack_turn: 9, threat: 15 });

        end_turn(&mut world).unwrap();

        let tile = world.tile(TileId(4)).unwrap();
        assert!(!tile.owned);
        assert!(tile.building.is_none());
        assert!(tile.garrison.is_none());
        assert!(world.unit(id).is_none());
        assert!(world.raids.is_empty());
    }

    #[test]
    fn test_raid_held_by_strong_garrison() {
        let mut world = GameWorld::with_seed(42);
        conquer(&mut world, TileId(4));
        spawn_idle(&mut world, TileId(4), 20);
        spawn_idle(&mut world, TileId(4), 20);

        world.turn = 8;
        world.raids.push(ScheduledRaid { target: TileId(4), attack_turn: 9, threat: 15 });

        end_turn(&mut world).unwrap();

        assert!(world.tile(TileId(4)).unwrap().owned);
        assert_eq!(world.army_size(), 2);
        assert_eq!(world.ledger.get(ResourceType::Valor), 5);
    }

    #[test]
    fn test_raid_on_lost_tile_is_skipped() {
        let mut world = GameWorld::with_seed(42);
        // Tile 4 was never conquered; a stale raid should fizzle
        world.turn = 8;
        world.raids.push(ScheduledRaid { target: TileId(4), attack_turn: 9, threat: 15 });
        let valor_before = world.ledger.get(ResourceType::Valor);

        end_turn(&mut world).unwrap();

        assert!(world.raids.is_empty());
        assert_eq!(world.ledger.get(ResourceType::Valor), valor_before);
        assert!(!world.tile(TileId(4)).unwrap().owned);
    }

    #[test]
    fn test_raid_not_resolved_before_trigger_turn() {
        let mut world = GameWorld::with_seed(42);
        world.raids.push(ScheduledRaid { target: TileId(1), attack_turn: 9, threat: 15 });

        end_turn(&mut world).unwrap();

        assert_eq!(world.raids.len(), 1);
        assert!(world.tile(TileId(1)).unwrap().owned);
    }
}
