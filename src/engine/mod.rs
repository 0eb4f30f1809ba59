//! The turn-resolution engine - world aggregate, commands, combat, raids

pub mod combat;
pub mod command;
pub mod log;
pub mod scheduler;
pub mod turn;
pub mod world;

pub use combat::{garrison_defense, resolve_assault, resolve_raid_defense, AssaultOutcome, RaidOutcome};
pub use command::Command;
pub use log::NotificationLog;
pub use scheduler::{plan_raid, raid_planned_this_turn, RaidQueue, ScheduledRaid};
pub use turn::end_turn;
pub use world::{GameWorld, Snapshot};
