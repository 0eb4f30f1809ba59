//! Engine configuration with documented constants
//!
//! All tuning numbers of the resolution engine are collected here with
//! explanations of their purpose and how they interact with each other.

use crate::core::types::TileId;

/// Configuration for the turn-resolution engine
///
/// Defaults reproduce the shipped campaign balance. Changing them affects
/// pacing, raid pressure, and how quickly the player can snowball.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // === TURN ECONOMY ===
    /// Silver Shields deducted by every end-turn
    ///
    /// Turns cannot be ended below this balance, which is what makes
    /// shields the meta-currency gating all progress.
    pub turn_shield_cost: i64,

    /// Hard ceiling on Silver Shields
    ///
    /// External match rewards are clamped here so stockpiling matches
    /// cannot outrun the campaign.
    pub shield_cap: i64,

    /// Shields credited for a won external match
    pub match_win_shields: i64,

    /// Shields credited for a lost external match
    pub match_loss_shields: i64,

    // === COMBAT REWARDS ===
    /// Valor gained for conquering a hostile tile
    pub conquest_valor: i64,

    /// Valor gained when a garrison repels a raid
    pub defense_valor: i64,

    /// Optional uniform swing applied to assault margins
    ///
    /// `Some(m)` adds a roll in `[-m, +m]` to attacker power before the
    /// threat comparison. `None` keeps combat fully deterministic, which
    /// is the shipped balance.
    pub combat_swing: Option<i64>,

    // === RAID PRESSURE ===
    /// Turn cadence of raid scheduling
    ///
    /// One raid is enqueued whenever `(turn + raid_offset) % raid_cadence`
    /// is zero, so at default values raids are planned on turns 4, 14, 24...
    pub raid_cadence: u64,

    /// Phase offset of the raid cadence
    pub raid_offset: u64,

    /// Turns between a raid being planned and it striking
    ///
    /// This is the player's warning window for garrisoning the target.
    pub raid_lead_turns: u64,

    /// Threat level of a raid planned at turn 0
    pub raid_base_threat: i64,

    /// Additional threat per elapsed turn at planning time
    ///
    /// Keeps raid pressure monotonically non-decreasing as the campaign
    /// progresses.
    pub raid_threat_per_turn: i64,

    // === PRESENTATION ===
    /// Notification lines retained for the view (most recent first out)
    pub notification_cap: usize,

    /// The capital tile, closed to new construction
    pub capital_tile: TileId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_shield_cost: 10,
            shield_cap: 2000,
            match_win_shields: 300,
            match_loss_shields: 150,

            conquest_valor: 10,
            defense_valor: 5,
            combat_swing: None,

            raid_cadence: 10,
            raid_offset: 6,
            raid_lead_turns: 5,
            raid_base_threat: 15,
            raid_threat_per_turn: 2,

            notification_cap: 5,
            capital_tile: TileId(1),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.turn_shield_cost <= 0 {
            return Err("turn_shield_cost must be positive".into());
        }

        if self.shield_cap < self.turn_shield_cost {
            return Err(format!(
                "shield_cap ({}) must cover at least one turn ({})",
                self.shield_cap, self.turn_shield_cost
            ));
        }

        if self.raid_cadence == 0 {
            return Err("raid_cadence must be positive".into());
        }

        // A lead at or beyond the cadence stacks unresolved raids
        if self.raid_lead_turns == 0 || self.raid_lead_turns >= self.raid_cadence {
            return Err(format!(
                "raid_lead_turns ({}) must be in 1..raid_cadence ({})",
                self.raid_lead_turns, self.raid_cadence
            ));
        }

        if let Some(swing) = self.combat_swing {
            if swing <= 0 {
                return Err("combat_swing must be positive when set".into());
            }
        }

        if self.notification_cap == 0 {
            return Err("notification_cap must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_cadence_rejected() {
        let config = EngineConfig {
            raid_cadence: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lead_beyond_cadence_rejected() {
        let config = EngineConfig {
            raid_lead_turns: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_swing_rejected() {
        let config = EngineConfig {
            combat_swing: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
