//! Enumeration types for Cartograph.
//!
//! [`RegionType`] is the closed classification of map regions. Each variant
//! owns a fixed set of localization keys, produced by a single exhaustive
//! table in [`RegionType::keys`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Region Types
// ---------------------------------------------------------------------------

/// The geographic classification of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionType {
    /// Open ocean.
    Ocean,
    /// Coastal waters.
    Coast,
    /// An inland lake.
    Lake,
    /// A river system.
    River,
    /// Generic land mass.
    Land,
    /// A mountain range.
    Mountain,
    /// A desert.
    Desert,
}

/// The localization keys derived from a [`RegionType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionTypeKeys {
    /// Lowercase stem, e.g. `ocean`.
    pub stem: &'static str,
    /// Key of the name index used when generating names, e.g. `index.ocean`.
    pub name_index: &'static str,
    /// Label key for a region of this type that has not been named yet.
    pub unknown: &'static str,
    /// Localized name key of the type itself.
    pub name: &'static str,
}

impl RegionType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Ocean,
        Self::Coast,
        Self::Lake,
        Self::River,
        Self::Land,
        Self::Mountain,
        Self::Desert,
    ];

    /// All derived keys for this type.
    pub const fn keys(self) -> RegionTypeKeys {
        match self {
            Self::Ocean => RegionTypeKeys {
                stem: "ocean",
                name_index: "index.ocean",
                unknown: "model.region.ocean.unknown",
                name: "model.region.ocean.name",
            },
            Self::Coast => RegionTypeKeys {
                stem: "coast",
                name_index: "index.coast",
                unknown: "model.region.coast.unknown",
                name: "model.region.coast.name",
            },
            Self::Lake => RegionTypeKeys {
                stem: "lake",
                name_index: "index.lake",
                unknown: "model.region.lake.unknown",
                name: "model.region.lake.name",
            },
            Self::River => RegionTypeKeys {
                stem: "river",
                name_index: "index.river",
                unknown: "model.region.river.unknown",
                name: "model.region.river.name",
            },
            Self::Land => RegionTypeKeys {
                stem: "land",
                name_index: "index.land",
                unknown: "model.region.land.unknown",
                name: "model.region.land.name",
            },
            Self::Mountain => RegionTypeKeys {
                stem: "mountain",
                name_index: "index.mountain",
                unknown: "model.region.mountain.unknown",
                name: "model.region.mountain.name",
            },
            Self::Desert => RegionTypeKeys {
                stem: "desert",
                name_index: "index.desert",
                unknown: "model.region.desert.unknown",
                name: "model.region.desert.name",
            },
        }
    }

    /// Lowercase stem key.
    pub const fn key(self) -> &'static str {
        self.keys().stem
    }

    /// Name index key.
    pub const fn name_index_key(self) -> &'static str {
        self.keys().name_index
    }

    /// Message key for an unnamed region of this type.
    pub const fn unknown_key(self) -> &'static str {
        self.keys().unknown
    }

    /// Localized name key.
    pub const fn name_key(self) -> &'static str {
        self.keys().name
    }

    /// The stable upper-case form written to save documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ocean => "OCEAN",
            Self::Coast => "COAST",
            Self::Lake => "LAKE",
            Self::River => "RIVER",
            Self::Land => "LAND",
            Self::Mountain => "MOUNTAIN",
            Self::Desert => "DESERT",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`RegionType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region type: {0}")]
pub struct UnknownRegionType(pub String);

impl FromStr for RegionType {
    type Err = UnknownRegionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownRegionType(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// History Event Types
// ---------------------------------------------------------------------------

/// The category of a history record produced by region logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEventType {
    /// A player discovered a region.
    DiscoverRegion,
}

impl HistoryEventType {
    /// Message key of the template describing this event.
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::DiscoverRegion => "model.history.DISCOVER_REGION",
        }
    }
}
