//! The game session: regions, players, units, the turn counter and the
//! discovery history.
//!
//! [`Game`] is the owner that region logic reaches its collaborators
//! through. It resolves a unit to its owning player, redirects a discovery
//! to the nearest discoverable region, records the resulting history event
//! and round-trips the region map through save documents.

use std::collections::BTreeMap;

use cartograph_save::{PlayerLookup, read_regions, write_regions};
use cartograph_types::{DiscoveryEvent, Player, PlayerId, RegionId, Turn, Unit, UnitId};
use cartograph_world::{Explorer, RegionMap};
use tracing::{debug, info, warn};

use crate::config::{GameConfig, GameOptions};
use crate::error::GameError;

/// A running game session.
#[derive(Debug, Clone, Default)]
pub struct Game {
    options: GameOptions,
    turn: Turn,
    regions: RegionMap,
    players: BTreeMap<PlayerId, Player>,
    units: BTreeMap<UnitId, Unit>,
    history: Vec<DiscoveryEvent>,
}

impl Game {
    /// Create an empty game at turn 0 with the given options.
    pub fn new(options: GameOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create an empty game from a loaded configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.options.clone())
    }

    /// The game options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The current turn.
    pub const fn turn(&self) -> Turn {
        self.turn
    }

    /// Move to the next turn and return it.
    pub fn advance_turn(&mut self) -> Turn {
        self.turn = self.turn.next();
        debug!(turn = self.turn.number(), "Turn advanced");
        self.turn
    }

    /// The region map.
    pub const fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Mutable access to the region map.
    pub const fn regions_mut(&mut self) -> &mut RegionMap {
        &mut self.regions
    }

    /// Register a player and return its identifier.
    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.insert(id, player);
        id
    }

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Register a unit and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownPlayer`] if the unit's owner is not
    /// registered.
    pub fn add_unit(&mut self, unit: Unit) -> Result<UnitId, GameError> {
        if !self.players.contains_key(&unit.owner) {
            return Err(GameError::UnknownPlayer(unit.owner));
        }
        let id = unit.id;
        self.units.insert(id, unit);
        Ok(id)
    }

    /// Look up a unit.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Every discovery recorded so far, oldest first.
    pub fn history(&self) -> &[DiscoveryEvent] {
        &self.history
    }

    /// Total exploration score earned by a player.
    pub fn score(&self, player: PlayerId) -> u32 {
        self.history
            .iter()
            .filter(|event| event.player == player)
            .fold(0_u32, |total, event| total.saturating_add(event.score))
    }

    /// Have `unit` discover the region it entered.
    ///
    /// The discovery lands on the nearest discoverable region among
    /// `region` and its ancestors. Returns `None` when there is none, so
    /// entering already-known territory is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownUnit`] or [`GameError::UnknownPlayer`]
    /// if the unit or its owner is not registered, or
    /// [`GameError::World`] if the discovery itself fails.
    pub fn discover_region(
        &mut self,
        unit: UnitId,
        region: RegionId,
        name: &str,
    ) -> Result<Option<DiscoveryEvent>, GameError> {
        let unit = self.units.get(&unit).ok_or(GameError::UnknownUnit(unit))?;
        let player = self
            .players
            .get(&unit.owner)
            .ok_or(GameError::UnknownPlayer(unit.owner))?;
        let explorer = Explorer::new(unit, player)?;

        let Some(target) = self.regions.discoverable_region(region) else {
            debug!(region = %region, "Nothing left to discover");
            return Ok(None);
        };

        let event = self
            .regions
            .discover(target, &explorer, self.turn, name, &self.options)?;
        info!(
            region = %event.region,
            player = %event.player,
            turn = event.turn.number(),
            score = event.score,
            "Region discovered"
        );
        self.history.push(event.clone());
        Ok(Some(event))
    }

    /// Serialize the region map to a `regions` document.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Save`] if writing fails.
    pub fn save_regions(&self) -> Result<String, GameError> {
        Ok(write_regions(&self.regions)?)
    }

    /// Replace the region map with the contents of a `regions` document.
    ///
    /// Integrity problems in the loaded hierarchy are logged, not fatal.
    /// The current map is left untouched if the document cannot be read.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Save`] if the document is malformed.
    pub fn load_regions(&mut self, xml: &str) -> Result<(), GameError> {
        let regions = read_regions(xml, &*self)?;
        if let Err(e) = regions.validate() {
            warn!(error = %e, "Loaded region hierarchy is inconsistent");
        }
        info!(count = regions.len(), "Regions loaded");
        self.regions = regions;
        Ok(())
    }
}

impl PlayerLookup for Game {
    fn has_player(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }
}
