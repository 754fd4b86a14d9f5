//! Error types for the `cartograph-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use cartograph_types::{PlayerId, RegionId, UnitId};

/// Errors that can occur during region-hierarchy operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A region was not found in the region map.
    #[error("region not found: {0}")]
    RegionNotFound(RegionId),

    /// A duplicate region was inserted where uniqueness is required.
    #[error("duplicate region id: {0}")]
    DuplicateRegion(RegionId),

    /// Linking the two regions would make a region its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected {
        /// The would-be parent.
        parent: RegionId,
        /// The would-be child.
        child: RegionId,
    },

    /// A region refers to another region that is not in the map.
    #[error("region {from} refers to missing region {to}")]
    DanglingReference {
        /// The referring region.
        from: RegionId,
        /// The missing region.
        to: RegionId,
    },

    /// A parent and child disagree about their relationship.
    #[error("regions {parent} and {child} disagree about their parent/child link")]
    InconsistentLink {
        /// The parent side of the link.
        parent: RegionId,
        /// The child side of the link.
        child: RegionId,
    },

    /// A unit was presented as acting for a player that does not own it.
    #[error("unit {unit} is not owned by player {player}")]
    UnitNotOwned {
        /// The unit.
        unit: UnitId,
        /// The claimed owner.
        player: PlayerId,
    },
}
