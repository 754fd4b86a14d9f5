//! Record types shared between the region model and its hosts.
//!
//! [`Player`] and [`Unit`] are the minimal views of the external game
//! objects that discovery needs. [`DiscoveryEvent`] is the history record
//! a discovery produces.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::HistoryEventType;
use crate::ids::{PlayerId, RegionId, UnitId};
use crate::label::{Label, Localizer};

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// A game turn, identified by its number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Turn(pub u32);

impl Turn {
    /// Create a turn from its number.
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The turn number.
    pub const fn number(self) -> u32 {
        self.0
    }

    /// The following turn. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Player / Unit
// ---------------------------------------------------------------------------

/// A player faction as seen by region logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player identifier.
    pub id: PlayerId,
    /// Nation name label, e.g. `Key("model.nation.dutch.name")`.
    pub nation: Label,
}

impl Player {
    /// Create a player with a fresh identifier.
    pub fn new(nation: Label) -> Self {
        Self {
            id: PlayerId::new(),
            nation,
        }
    }
}

/// A unit as seen by region logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit identifier.
    pub id: UnitId,
    /// The owning player.
    pub owner: PlayerId,
}

impl Unit {
    /// Create a unit with a fresh identifier owned by `owner`.
    pub fn new(owner: PlayerId) -> Self {
        Self {
            id: UnitId::new(),
            owner,
        }
    }
}

// ---------------------------------------------------------------------------
// DiscoveryEvent
// ---------------------------------------------------------------------------

/// The history record of a region discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryEvent {
    /// The turn of discovery.
    pub turn: Turn,
    /// Always [`HistoryEventType::DiscoverRegion`].
    pub event_type: HistoryEventType,
    /// The discovering player.
    pub player: PlayerId,
    /// The discovered region.
    pub region: RegionId,
    /// The discovering player's nation label (`%nation%`).
    pub nation: Label,
    /// The name proposed for the region (`%region%`).
    pub region_name: String,
    /// Score awarded for the discovery.
    pub score: u32,
}

impl DiscoveryEvent {
    /// Render the event through its message template, substituting
    /// `%nation%` and `%region%`.
    pub fn describe(&self, localizer: &dyn Localizer) -> String {
        let key = self.event_type.message_key();
        localizer
            .lookup(key)
            .unwrap_or(key)
            .replace("%nation%", &self.nation.render(localizer))
            .replace("%region%", &self.region_name)
    }
}
