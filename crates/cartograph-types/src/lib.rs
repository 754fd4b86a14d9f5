//! Shared type definitions for Cartograph.
//!
//! Every crate in the workspace speaks in these types: identifiers for
//! regions, players and units, the region classification with its derived
//! localization keys, and the records exchanged with the host game.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for game object identifiers
//! - [`enums`] -- [`RegionType`] and history event types
//! - [`label`] -- Localizable labels and the [`Localizer`] seam
//! - [`structs`] -- Turns, players, units and discovery events

pub mod enums;
pub mod ids;
pub mod label;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{HistoryEventType, RegionType, RegionTypeKeys, UnknownRegionType};
pub use ids::{PlayerId, RegionId, UnitId};
pub use label::{Label, Localizer, MessageCatalog};
pub use structs::{DiscoveryEvent, Player, Turn, Unit};
