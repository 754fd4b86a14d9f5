//! Region hierarchy and discovery logic for Cartograph.
//!
//! This crate models named map regions as an identifier-linked tree held in
//! a single arena, together with the rules for discovering them.
//!
//! # Modules
//!
//! - [`error`] -- Error types for hierarchy and discovery operations.
//! - [`region`] -- [`Region`], a single node: classification, name, flags
//!   and discovery record.
//! - [`region_map`] -- [`RegionMap`], the arena owning every region, with
//!   linking, ancestor walks, labels and integrity validation.
//! - [`discovery`] -- The discovery state machine and the collaborator
//!   traits it consults ([`DiscoveryActor`], [`ExplorationPolicy`]).

pub mod discovery;
pub mod error;
pub mod region;
pub mod region_map;

// Re-export primary types at crate root.
pub use discovery::{DiscoveryActor, DiscoveryState, ExplorationPolicy, Explorer};
pub use error::WorldError;
pub use region::{PACIFIC_NAME_KEY, Region};
pub use region_map::{Lineage, RegionMap};
