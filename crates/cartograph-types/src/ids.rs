//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every game object tracked by the registry has a strongly-typed ID so a
//! region can never be looked up with a player's identifier. Identifiers are
//! assigned by the owning registry; the `new()` constructors exist for setup
//! code and tests. The textual form (used in save documents) is the
//! hyphenated UUID.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a region (node in the region hierarchy).
    RegionId
}

define_id! {
    /// Unique identifier for a player faction.
    PlayerId
}

define_id! {
    /// Unique identifier for a unit. Kept on discovered regions after the
    /// unit itself is gone.
    UnitId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_values() {
        let a = RegionId::new();
        let b = RegionId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_parses_its_display_form() {
        let id = RegionId::new();
        let parsed: Result<RegionId, _> = id.to_string().parse();
        assert_eq!(parsed.ok(), Some(id));
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!("not-a-region".parse::<PlayerId>().is_err());
    }

    #[test]
    fn id_serializes_as_plain_uuid() {
        let id = UnitId::new();
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json, Some(format!("\"{id}\"")));
    }
}
