//! Error types for the game session.

use cartograph_save::SaveError;
use cartograph_types::{PlayerId, UnitId};
use cartograph_world::WorldError;

use crate::config::ConfigError;

/// Errors surfaced by [`Game`](crate::Game) operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A hierarchy or discovery rule was violated.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A region document could not be written or read.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// No unit with this identifier is registered.
    #[error("unit not found: {0}")]
    UnknownUnit(UnitId),

    /// No player with this identifier is registered.
    #[error("player not found: {0}")]
    UnknownPlayer(PlayerId),

    /// The tracing subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}
