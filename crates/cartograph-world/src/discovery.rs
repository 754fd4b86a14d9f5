//! Discovery state machine.
//!
//! A region is in one of four [`DiscoveryState`]s. The only transition this
//! module drives is [`RegionMap::discover`], which moves a region to
//! `Discovered`, clears `discoverable` on its direct children and reports
//! a [`DiscoveryEvent`] for the host's history log.
//!
//! The cascade is deliberately one level deep: grandchildren keep their
//! own `discoverable` flag and need their own discovery.

use cartograph_types::{
    DiscoveryEvent, HistoryEventType, Label, Player, PlayerId, RegionId, Turn, Unit, UnitId,
};

use crate::error::WorldError;
use crate::region::Region;
use crate::region_map::RegionMap;

/// Where a region stands with respect to discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryState {
    /// Unknown and not a valid discovery target.
    HiddenNotDiscoverable,
    /// Unknown and waiting to be discovered.
    HiddenDiscoverable,
    /// Known from game start.
    Prediscovered,
    /// Discovered by a player during play.
    Discovered,
}

impl Region {
    /// The current discovery state, derived from the region's flags and
    /// discovery record.
    pub const fn discovery_state(&self) -> DiscoveryState {
        if self.discovered_in().is_some() || self.discovered_by().is_some() {
            DiscoveryState::Discovered
        } else if self.is_prediscovered() {
            DiscoveryState::Prediscovered
        } else if self.is_discoverable() {
            DiscoveryState::HiddenDiscoverable
        } else {
            DiscoveryState::HiddenNotDiscoverable
        }
    }
}

/// Whether discoveries earn score. Backed by the game options.
pub trait ExplorationPolicy {
    /// Return `true` if discovering a region awards its score value.
    fn exploration_points(&self) -> bool;
}

impl ExplorationPolicy for bool {
    fn exploration_points(&self) -> bool {
        *self
    }
}

/// The unit performing a discovery, seen through its owner.
pub trait DiscoveryActor {
    /// The discovering unit.
    fn unit_id(&self) -> UnitId;
    /// The player owning the unit.
    fn owner(&self) -> PlayerId;
    /// The owner's nation label.
    fn nation(&self) -> Label;
}

/// A unit paired with the player that owns it.
#[derive(Debug, Clone, Copy)]
pub struct Explorer<'a> {
    unit: &'a Unit,
    player: &'a Player,
}

impl<'a> Explorer<'a> {
    /// Pair a unit with its owner.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnitNotOwned`] if `player` does not own `unit`.
    pub fn new(unit: &'a Unit, player: &'a Player) -> Result<Self, WorldError> {
        if unit.owner != player.id {
            return Err(WorldError::UnitNotOwned {
                unit: unit.id,
                player: player.id,
            });
        }
        Ok(Self { unit, player })
    }
}

impl DiscoveryActor for Explorer<'_> {
    fn unit_id(&self) -> UnitId {
        self.unit.id
    }

    fn owner(&self) -> PlayerId {
        self.player.id
    }

    fn nation(&self) -> Label {
        self.player.nation.clone()
    }
}

impl RegionMap {
    /// Discover a region.
    ///
    /// The Pacific (or any region inside it) keeps its canonical name;
    /// other regions take `proposed_name`. The region records the turn,
    /// player and unit of discovery and stops being discoverable, as do its
    /// direct children. The score is the region's score value if it was
    /// discoverable on entry and `policy` awards exploration points, else 0.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RegionNotFound`] if `id` is not in the map.
    pub fn discover(
        &mut self,
        id: RegionId,
        actor: &dyn DiscoveryActor,
        turn: Turn,
        proposed_name: &str,
        policy: &dyn ExplorationPolicy,
    ) -> Result<DiscoveryEvent, WorldError> {
        let pacific = self.is_pacific(id);
        let region = self.get_mut(id).ok_or(WorldError::RegionNotFound(id))?;

        let was_discoverable = region.is_discoverable();
        if !pacific {
            region.set_name(Some(proposed_name.to_owned()));
        }
        let player = actor.owner();
        region.set_discovered_by(Some(player));
        region.set_discovered_in(Some(turn));
        region.set_discoverer(Some(actor.unit_id()));
        region.set_discoverable(false);

        let score = if was_discoverable && policy.exploration_points() {
            region.score_value()
        } else {
            0
        };
        let children = region.children().to_vec();

        for child in children {
            if let Some(c) = self.get_mut(child) {
                c.set_discoverable(false);
            }
        }

        tracing::debug!(
            region = %id,
            %player,
            turn = turn.number(),
            score,
            pacific,
            "Region discovered"
        );

        Ok(DiscoveryEvent {
            turn,
            event_type: HistoryEventType::DiscoverRegion,
            player,
            region: id,
            nation: actor.nation(),
            region_name: proposed_name.to_owned(),
            score,
        })
    }
}
