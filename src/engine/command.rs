//! Player commands - validation gates and immediate state transitions
//!
//! Every command is an atomic, synchronous transition: it either passes all
//! of its preconditions and mutates the world, or it rejects with a single
//! notification line and touches nothing.

use crate::catalog::{Building, BuildingType, Unit, UnitState, UnitType};
use crate::core::error::{CommandError, Result};
use crate::core::types::{MatchOutcome, TileId, UnitId};
use crate::engine::combat::{resolve_assault, AssaultOutcome};
use crate::engine::turn::end_turn;
use crate::engine::world::GameWorld;
use crate::ledger::ResourceType;

/// A discrete player command fed to the engine by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SimulateMatch { outcome: MatchOutcome },
    EndTurn,
    Build { tile: TileId, building: BuildingType },
    Train { tile: TileId, unit: UnitType },
    Attack { unit: UnitId, target: TileId },
    Move { unit: UnitId, target: TileId },
}

impl GameWorld {
    /// Execute one command. Returns `true` if it was accepted; a rejected
    /// command only appends its reason to the notification log.
    pub fn execute(&mut self, command: Command) -> bool {
        let result = match command {
            Command::SimulateMatch { outcome } => {
                simulate_match(self, outcome);
                Ok(())
            }
            Command::EndTurn => end_turn(self),
            Command::Build { tile, building } => construct_building(self, tile, building),
            Command::Train { tile, unit } => train_unit(self, tile, unit),
            Command::Attack { unit, target } => attack_tile(self, unit, target),
            Command::Move { unit, target } => move_unit(self, unit, target),
        };

        match result {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(?command, %reason, "command rejected");
                self.notify(reason.to_string());
                false
            }
        }
    }
}

/// Credit the shield reward for an external match result, clamped at the cap
pub fn simulate_match(world: &mut GameWorld, outcome: MatchOutcome) {
    let reward = match outcome {
        MatchOutcome::Win => world.config.match_win_shields,
        MatchOutcome::Loss => world.config.match_loss_shields,
    };

    let gained = world
        .ledger
        .credit_clamped(ResourceType::Shields, reward, world.config.shield_cap);
    world.notify(format!(
        "Simulated match: {}. Gained {} Silver Shields.",
        outcome.label(),
        gained
    ));
}

/// Construct a building on an owned, empty, non-capital tile
pub fn construct_building(
    world: &mut GameWorld,
    tile_id: TileId,
    building_type: BuildingType,
) -> Result<()> {
    let tile = world.tile(tile_id).ok_or(CommandError::UnknownTile(tile_id))?;
    if !tile.owned {
        return Err(CommandError::UnownedTile { tile: tile.name.clone() });
    }
    if tile.building.is_some() {
        return Err(CommandError::TileOccupied { tile: tile.name.clone() });
    }
    if tile_id == world.config.capital_tile {
        return Err(CommandError::CapitalReserved);
    }

    let stats = world.stats.building(building_type);
    let cost = stats.cost.clone();
    let production = stats.production.clone();
    world.ledger.check_afford(&cost)?;

    world.ledger.debit_all(&cost);
    let name = {
        let tile = world
            .tile_mut(tile_id)
            .ok_or(CommandError::UnknownTile(tile_id))?;
        tile.building = Some(Building::new(building_type, production));
        tile.name.clone()
    };
    world.notify(format!("Built {} on {}.", building_type.label(), name));
    Ok(())
}

/// Start training a unit at a tile with a Town Center or Barracks
///
/// Food doubles as army capacity: the army-size gate compares against the
/// current food balance, and the food component of the training cost is
/// excluded from the affordability loop even though it is still debited.
pub fn train_unit(world: &mut GameWorld, tile_id: TileId, unit_type: UnitType) -> Result<()> {
    let tile = world.tile(tile_id).ok_or(CommandError::UnknownTile(tile_id))?;
    if !tile.owned {
        return Err(CommandError::UnownedTile { tile: tile.name.clone() });
    }
    let trains = tile
        .building
        .as_ref()
        .is_some_and(|building| building.building_type.trains_units());
    if !trains {
        return Err(CommandError::NoTrainingGround { tile: tile.name.clone() });
    }
    let tile_name = tile.name.clone();

    let capacity = world.ledger.get(ResourceType::Food);
    if world.army_size() as i64 >= capacity {
        return Err(CommandError::ArmyCapReached { cap: capacity });
    }

    let stats = world.stats.unit(unit_type).clone();
    let guarded_cost: Vec<_> = stats
        .cost
        .iter()
        .copied()
        .filter(|(resource, _)| *resource != ResourceType::Food)
        .collect();
    world.ledger.check_afford(&guarded_cost)?;

    world.ledger.debit_all(&stats.cost);
    let id = world.next_unit_id();
    let name = format!("{} {}", unit_type.label(), world.army_size() + 1);
    world.units.push(Unit {
        id,
        unit_type,
        name: name.clone(),
        power: stats.power,
        upkeep: stats.upkeep,
        location: tile_id,
        state: UnitState::Training {
            turns_left: stats.training_turns,
        },
    });
    world.notify(format!(
        "Started training {} at {}. Ready in {} turns.",
        name, tile_name, stats.training_turns
    ));
    Ok(())
}

/// Send an idle unit against a hostile tile and resolve the assault at once
pub fn attack_tile(world: &mut GameWorld, unit_id: UnitId, target: TileId) -> Result<()> {
    let unit = world.unit(unit_id).ok_or(CommandError::UnknownUnit(unit_id))?;
    if !unit.is_idle() {
        return Err(CommandError::UnitNotIdle { unit: unit.name.clone() });
    }
    let unit_name = unit.name.clone();
    let power = unit.power;

    let tile = world.tile(target).ok_or(CommandError::UnknownTile(target))?;
    if tile.owned || tile.threat == 0 {
        return Err(CommandError::InvalidAttackTarget { tile: tile.name.clone() });
    }
    let tile_name = tile.name.clone();
    let threat = tile.threat;

    world.notify(format!(
        "{} (Power: {}) attacks {} (Threat: {}).",
        unit_name, power, tile_name, threat
    ));

    let swing = world.config.combat_swing;
    match resolve_assault(power, threat, swing, &mut world.rng) {
        AssaultOutcome::Conquered => {
            let valor = world.config.conquest_valor;
            world.ledger.credit(ResourceType::Valor, valor);
            if let Some(tile) = world.tile_mut(target) {
                tile.owned = true;
                tile.threat = 0;
                tile.building = None;
                tile.garrison = Some(unit_id);
            }
            if let Some(unit) = world.unit_mut(unit_id) {
                unit.location = target;
                unit.state = UnitState::Idle;
            }
            world.notify(format!("VICTORY! {} conquered {}.", unit_name, tile_name));
            world.notify(format!("Gained {} Valor.", valor));
        }
        AssaultOutcome::Repelled => {
            world.units.retain(|unit| unit.id != unit_id);
            world.notify(format!(
                "DEFEAT! {} was lost assaulting {}.",
                unit_name, tile_name
            ));
        }
    }
    Ok(())
}

/// Order an idle unit to march to another owned tile; it arrives at the next
/// end-turn
pub fn move_unit(world: &mut GameWorld, unit_id: UnitId, target: TileId) -> Result<()> {
    let unit = world.unit(unit_id).ok_or(CommandError::UnknownUnit(unit_id))?;
    if !unit.is_idle() {
        return Err(CommandError::UnitNotIdle { unit: unit.name.clone() });
    }
    let location = unit.location;
    let unit_name = unit.name.clone();

    let tile = world.tile(target).ok_or(CommandError::UnknownTile(target))?;
    if !tile.owned || target == location {
        return Err(CommandError::InvalidMoveTarget { tile: tile.name.clone() });
    }
    let tile_name = tile.name.clone();

    if let Some(unit) = world.unit_mut(unit_id) {
        unit.state = UnitState::Moving { destination: target };
    }
    world.notify(format!("{} is marching to {}.", unit_name, tile_name));
    Ok(())
}
