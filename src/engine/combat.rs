//! Combat resolution - assaults on hostile tiles and garrison defense
//!
//! Both modes are pure comparisons over combat power. The optional swing on
//! assaults is the only random element, drawn from the world RNG so seeded
//! runs replay identically.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::TileId;
use crate::engine::world::GameWorld;

/// Outcome of one unit assaulting a hostile tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssaultOutcome {
    Conquered,
    Repelled,
}

/// Outcome of a raid resolving against a garrison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidOutcome {
    Held,
    Overrun,
}

/// Resolve an assault: the attacker wins on `power >= threat`, with an
/// optional uniform swing in `[-m, +m]` added to the margin
pub fn resolve_assault(
    power: i64,
    threat: i64,
    swing: Option<i64>,
    rng: &mut ChaCha8Rng,
) -> AssaultOutcome {
    let roll = match swing {
        Some(magnitude) if magnitude > 0 => rng.gen_range(-magnitude..=magnitude),
        _ => 0,
    };

    if power + roll >= threat {
        AssaultOutcome::Conquered
    } else {
        AssaultOutcome::Repelled
    }
}

/// Aggregate defense of a tile: the summed power of every unit located there
pub fn garrison_defense(world: &GameWorld, tile: TileId) -> i64 {
    world
        .units
        .iter()
        .filter(|unit| unit.location == tile)
        .map(|unit| unit.power)
        .sum()
}

/// Resolve a raid against a garrison's total defense
pub fn resolve_raid_defense(defense: i64, threat: i64) -> RaidOutcome {
    if defense >= threat {
        RaidOutcome::Held
    } else {
        RaidOutcome::Overrun
    }
}
