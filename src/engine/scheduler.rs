//! Raid scheduler - the time-ordered queue of future enemy attacks

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::types::{TileId, Turn};
use crate::engine::world::GameWorld;

/// A planned enemy raid against an owned tile
///
/// Created by the scheduler during end-turn, consumed exactly once when the
/// campaign reaches its trigger turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledRaid {
    pub target: TileId,
    pub attack_turn: Turn,
    pub threat: i64,
}

/// Pending raids, drained as their trigger turns come due
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaidQueue {
    raids: Vec<ScheduledRaid>,
}

impl RaidQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, raid: ScheduledRaid) {
        self.raids.push(raid);
    }

    /// Remove and return every raid due at or before `turn`
    pub fn drain_due(&mut self, turn: Turn) -> Vec<ScheduledRaid> {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .raids
            .iter()
            .copied()
            .partition(|raid| raid.attack_turn <= turn);
        self.raids = pending;
        due
    }

    pub fn pending(&self) -> &[ScheduledRaid] {
        &self.raids
    }

    pub fn len(&self) -> usize {
        self.raids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raids.is_empty()
    }
}

/// Whether the cadence plans a raid on this turn
pub fn raid_planned_this_turn(turn: Turn, config: &EngineConfig) -> bool {
    (turn + config.raid_offset) % config.raid_cadence == 0
}

/// Enqueue half of the raid system: at most one raid per qualifying turn,
/// against a uniformly chosen owned tile. Threat scales with the current
/// turn so pressure never decreases.
pub fn plan_raid(world: &mut GameWorld) {
    if !raid_planned_this_turn(world.turn, &world.config) {
        return;
    }

    let owned: Vec<TileId> = world.owned_tiles().map(|tile| tile.id).collect();
    if owned.is_empty() {
        return;
    }

    let target = owned[world.rng.gen_range(0..owned.len())];
    let raid = ScheduledRaid {
        target,
        attack_turn: world.turn + world.config.raid_lead_turns,
        threat: world.config.raid_base_threat
            + world.config.raid_threat_per_turn * world.turn as i64,
    };
    world.raids.push(raid);

    let name = world
        .tile(target)
        .map(|tile| tile.name.clone())
        .unwrap_or_default();
    tracing::debug!(?target, attack_turn = raid.attack_turn, threat = raid.threat, "raid planned");
    world.notify(format!(
        "Scouts report an enemy warband massing near {}! Expected in {} turns.",
        name, world.config.raid_lead_turns
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_splits_queue() {
        let mut queue = RaidQueue::new();
        queue.push(ScheduledRaid { target: TileId(1), attack_turn: 9, threat: 15 });
        queue.push(ScheduledRaid { target: TileId(2), attack_turn: 19, threat: 35 });

        let due = queue.drain_due(9);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].target, TileId(1));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending()[0].target, TileId(2));

        // Draining again at the same turn yields nothing
        assert!(queue.drain_due(9).is_empty());
    }

    #[test]
    fn test_raid_cadence() {
        let config = EngineConfig::default();

        // (turn + 6) % 10 == 0 -> turns 4, 14, 24...
        assert!(raid_planned_this_turn(4, &config));
        assert!(raid_planned_this_turn(14, &config));
        assert!(!raid_planned_this_turn(0, &config));
        assert!(!raid_planned_this_turn(5, &config));
        assert!(!raid_planned_this_turn(10, &config));
    }
}
