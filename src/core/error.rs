use thiserror::Error;

use crate::core::types::{TileId, UnitId};
use crate::ledger::ResourceType;

/// A rejected command.
///
/// Every variant is recoverable: the command is a no-op and the `Display`
/// text becomes the single user-facing notification line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No such tile: {0}.")]
    UnknownTile(TileId),

    #[error("{tile} is not under your control.")]
    UnownedTile { tile: String },

    #[error("{tile} already has a building.")]
    TileOccupied { tile: String },

    #[error("The capital cannot take new construction.")]
    CapitalReserved,

    #[error("Not enough {resource}. Needed: {needed}, Have: {have}.")]
    CannotAfford {
        resource: ResourceType,
        needed: i64,
        have: i64,
    },

    #[error("No Town Center or Barracks at {tile} to train troops.")]
    NoTrainingGround { tile: String },

    #[error("The army is at capacity ({cap}). Grow your food supply first.")]
    ArmyCapReached { cap: i64 },

    #[error("No such unit: {0}.")]
    UnknownUnit(UnitId),

    #[error("{unit} is busy and cannot act.")]
    UnitNotIdle { unit: String },

    #[error("Cannot attack {tile}.")]
    InvalidAttackTarget { tile: String },

    #[error("Cannot move to {tile}.")]
    InvalidMoveTarget { tile: String },

    #[error("Not enough Silver Shields to end the turn! Needed: {needed}, Have: {have}.")]
    NotEnoughShields { needed: i64, have: i64 },
}

pub type Result<T> = std::result::Result<T, CommandError>;
