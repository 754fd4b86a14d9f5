//! Game session, configuration and logging for Cartograph.
//!
//! This crate ties the region hierarchy, the discovery rules and the save
//! codec into a single [`Game`] session.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration: game options and logging.
//! - [`error`] -- [`GameError`], the session-level error.
//! - [`game`] -- [`Game`], owning regions, players, units, the current
//!   turn and the discovery history.
//! - [`logging`] -- Tracing subscriber setup.

pub mod config;
pub mod error;
pub mod game;
pub mod logging;

pub use config::{ConfigError, GameConfig, GameOptions, LoggingConfig};
pub use error::GameError;
pub use game::Game;
