//! The region node.
//!
//! A [`Region`] holds its own classification, naming and discovery flags,
//! plus identifier references to its parent and children. It never owns
//! other regions: links are resolved through the
//! [`RegionMap`](crate::region_map::RegionMap) that stores every region.

use core::fmt;

use cartograph_types::{PlayerId, RegionId, RegionType, Turn, UnitId};
use serde::{Deserialize, Serialize};

/// The reserved name key of the Pacific Ocean.
pub const PACIFIC_NAME_KEY: &str = "model.region.pacific";

/// A named region on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    id: RegionId,
    region_type: RegionType,
    /// Player-assigned name, usually set on discovery.
    name: Option<String>,
    /// Canonical localization key, independent of `name`.
    name_key: String,
    parent: Option<RegionId>,
    children: Vec<RegionId>,
    /// Ocean regions and non-leaf regions should not be claimable.
    claimable: bool,
    /// In general only leaf regions are discoverable. The Pacific is the
    /// exception unless players start there.
    discoverable: bool,
    /// Known from game start (e.g. the Atlantic).
    prediscovered: bool,
    discovered_in: Option<Turn>,
    discovered_by: Option<PlayerId>,
    /// Kept as an identifier since the unit may later be lost.
    discoverer: Option<UnitId>,
    /// Zero unless the region is discoverable.
    score_value: u32,
}

impl Region {
    /// Create an unnamed, undiscovered region with all flags cleared.
    pub fn new(id: RegionId, region_type: RegionType, name_key: impl Into<String>) -> Self {
        Self {
            id,
            region_type,
            name: None,
            name_key: name_key.into(),
            parent: None,
            children: Vec::new(),
            claimable: false,
            discoverable: false,
            prediscovered: false,
            discovered_in: None,
            discovered_by: None,
            discoverer: None,
            score_value: 0,
        }
    }

    /// The region identifier.
    pub const fn id(&self) -> RegionId {
        self.id
    }

    /// The region classification.
    pub const fn region_type(&self) -> RegionType {
        self.region_type
    }

    /// The player-assigned name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set or clear the player-assigned name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// The canonical localization key.
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    /// Whether this region's own key is the reserved Pacific key. Use
    /// [`RegionMap::is_pacific`](crate::region_map::RegionMap::is_pacific)
    /// to include ancestors.
    pub fn has_pacific_key(&self) -> bool {
        self.name_key == PACIFIC_NAME_KEY
    }

    // -------------------------------------------------------------------
    // Hierarchy
    // -------------------------------------------------------------------

    /// The enclosing region.
    pub const fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    /// Set the enclosing region. No cycle check is done here.
    pub const fn set_parent(&mut self, parent: Option<RegionId>) {
        self.parent = parent;
    }

    /// Child regions in insertion order.
    pub fn children(&self) -> &[RegionId] {
        &self.children
    }

    /// Replace the child list.
    pub fn set_children(&mut self, children: Vec<RegionId>) {
        self.children = children;
    }

    /// Append a child.
    pub fn add_child(&mut self, child: RegionId) {
        self.children.push(child);
    }

    /// Remove a child, returning whether it was present.
    pub fn remove_child(&mut self, child: RegionId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != child);
        self.children.len() != before
    }

    /// Whether the region has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    // -------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------

    /// Whether a player may claim this region.
    pub const fn is_claimable(&self) -> bool {
        self.claimable
    }

    /// Set the claimable flag.
    pub const fn set_claimable(&mut self, claimable: bool) {
        self.claimable = claimable;
    }

    /// Whether the region can currently be discovered.
    pub const fn is_discoverable(&self) -> bool {
        self.discoverable
    }

    /// Set the discoverable flag. A discoverable region is never
    /// prediscovered, so `true` also clears `prediscovered`.
    pub const fn set_discoverable(&mut self, discoverable: bool) {
        self.discoverable = discoverable;
        if discoverable {
            self.prediscovered = false;
        }
    }

    /// Whether the region is known from game start.
    pub const fn is_prediscovered(&self) -> bool {
        self.prediscovered
    }

    /// Set the prediscovered flag.
    pub const fn set_prediscovered(&mut self, prediscovered: bool) {
        self.prediscovered = prediscovered;
    }

    // -------------------------------------------------------------------
    // Discovery record
    // -------------------------------------------------------------------

    /// The turn of discovery.
    pub const fn discovered_in(&self) -> Option<Turn> {
        self.discovered_in
    }

    /// Set the turn of discovery.
    pub const fn set_discovered_in(&mut self, turn: Option<Turn>) {
        self.discovered_in = turn;
    }

    /// The discovering player.
    pub const fn discovered_by(&self) -> Option<PlayerId> {
        self.discovered_by
    }

    /// Set the discovering player.
    pub const fn set_discovered_by(&mut self, player: Option<PlayerId>) {
        self.discovered_by = player;
    }

    /// The discovering unit.
    pub const fn discoverer(&self) -> Option<UnitId> {
        self.discoverer
    }

    /// Set the discovering unit.
    pub const fn set_discoverer(&mut self, unit: Option<UnitId>) {
        self.discoverer = unit;
    }

    /// Score for discovering this region.
    pub const fn score_value(&self) -> u32 {
        self.score_value
    }

    /// Set the discovery score.
    pub const fn set_score_value(&mut self, score_value: u32) {
        self.score_value = score_value;
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.id,
            self.name.as_deref().unwrap_or("(null)"),
            self.name_key,
            self.region_type
        )
    }
}
