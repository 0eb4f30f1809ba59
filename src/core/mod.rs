//! Core types, errors, and engine configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{CommandError, Result};
pub use types::{MatchOutcome, TileId, Turn, UnitId};
