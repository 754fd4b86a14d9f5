//! Region arena: every region, keyed by identifier.
//!
//! The [`RegionMap`] owns all [`Region`] nodes. Parent and child links are
//! identifiers into this map, so hierarchy queries that climb the tree
//! (Pacific membership, nearest discoverable region) live here rather than
//! on the node.
//!
//! Ancestor walks are iterative and remember every visited region, so a
//! cycle introduced by [`Region::set_parent`] ends the walk instead of
//! looping forever. [`RegionMap::attach`] refuses to create such cycles in
//! the first place; [`RegionMap::validate`] reports any that slipped in.

use std::collections::{BTreeMap, BTreeSet};

use cartograph_types::{Label, RegionId};

use crate::error::WorldError;
use crate::region::Region;

/// The set of all regions in a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegionMap {
    /// All regions indexed by their identifier.
    regions: BTreeMap<RegionId, Region>,
    /// Identifiers referenced before their region was inserted.
    pending: BTreeSet<RegionId>,
}

impl RegionMap {
    /// Create an empty region map.
    pub const fn new() -> Self {
        Self {
            regions: BTreeMap::new(),
            pending: BTreeSet::new(),
        }
    }

    // -------------------------------------------------------------------
    // Storage
    // -------------------------------------------------------------------

    /// Add a region to the map, resolving any forward reference to it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateRegion`] if the ID is already present.
    pub fn insert(&mut self, region: Region) -> Result<(), WorldError> {
        let id = region.id();
        if self.regions.contains_key(&id) {
            return Err(WorldError::DuplicateRegion(id));
        }
        self.pending.remove(&id);
        self.regions.insert(id, region);
        Ok(())
    }

    /// Add a region, replacing any region with the same ID. Returns the
    /// replaced region.
    pub fn replace(&mut self, region: Region) -> Option<Region> {
        let id = region.id();
        self.pending.remove(&id);
        self.regions.insert(id, region)
    }

    /// Remove a region. Links held by other regions are left untouched.
    pub fn remove(&mut self, id: RegionId) -> Option<Region> {
        self.regions.remove(&id)
    }

    /// Get an immutable reference to a region.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    /// Get a mutable reference to a region.
    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    /// Whether a region with this ID is present.
    pub fn contains(&self, id: RegionId) -> bool {
        self.regions.contains_key(&id)
    }

    /// Return the number of regions in the map.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the map holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over all regions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Regions without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Region> {
        self.regions.values().filter(|r| r.parent().is_none())
    }

    /// Record a reference to `id`. If no such region exists yet it is
    /// remembered as a forward reference until inserted.
    pub fn reference(&mut self, id: RegionId) {
        if !self.regions.contains_key(&id) {
            self.pending.insert(id);
        }
    }

    /// Identifiers that were referenced but never inserted.
    pub fn unresolved(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.pending.iter().copied()
    }

    // -------------------------------------------------------------------
    // Hierarchy
    // -------------------------------------------------------------------

    /// Make `child` a sub-region of `parent`, appending it to the parent's
    /// children. A child already attached elsewhere is moved.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RegionNotFound`] if either region is missing,
    /// or [`WorldError::CycleDetected`] if `child` is `parent` or one of its
    /// ancestors.
    pub fn attach(&mut self, parent: RegionId, child: RegionId) -> Result<(), WorldError> {
        if !self.contains(parent) {
            return Err(WorldError::RegionNotFound(parent));
        }
        let old_parent = self
            .get(child)
            .ok_or(WorldError::RegionNotFound(child))?
            .parent();
        if self.lineage(parent).any(|r| r.id() == child) {
            return Err(WorldError::CycleDetected { parent, child });
        }

        if let Some(old) = old_parent.and_then(|id| self.get_mut(id)) {
            old.remove_child(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.set_parent(Some(parent));
        }
        if let Some(p) = self.get_mut(parent) {
            p.add_child(child);
        }
        tracing::trace!(%parent, %child, "Attached region");
        Ok(())
    }

    /// Replace the child list of a region.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RegionNotFound`] if the region is missing.
    pub fn set_children(&mut self, id: RegionId, children: Vec<RegionId>) -> Result<(), WorldError> {
        self.get_mut(id)
            .ok_or(WorldError::RegionNotFound(id))?
            .set_children(children);
        Ok(())
    }

    /// Child IDs of a region; empty for leaves and unknown regions.
    pub fn children(&self, id: RegionId) -> &[RegionId] {
        self.get(id).map(Region::children).unwrap_or(&[])
    }

    /// Walk from `id` up to its root: the region itself first, then each
    /// ancestor. Stops at a missing parent or a region already visited.
    pub fn lineage(&self, id: RegionId) -> Lineage<'_> {
        Lineage {
            map: self,
            next: Some(id),
            seen: BTreeSet::new(),
        }
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: RegionId) -> impl Iterator<Item = &Region> {
        self.lineage(id).skip(1)
    }

    /// The region itself if discoverable, otherwise the nearest
    /// discoverable ancestor. Used to discover an enclosing region such as
    /// the Pacific when one of its sub-regions is reached.
    pub fn discoverable_region(&self, id: RegionId) -> Option<RegionId> {
        self.lineage(id)
            .find(|r| r.is_discoverable())
            .map(Region::id)
    }

    /// Whether the region or any ancestor carries the reserved Pacific key.
    pub fn is_pacific(&self, id: RegionId) -> bool {
        self.lineage(id).any(Region::has_pacific_key)
    }

    /// Display label for a region: the canonical key when prediscovered or
    /// part of the Pacific, the type's "unknown" key while unnamed, and the
    /// assigned name otherwise.
    pub fn label(&self, id: RegionId) -> Option<Label> {
        let region = self.get(id)?;
        let label = if region.is_prediscovered() || self.is_pacific(id) {
            Label::key(region.name_key())
        } else {
            match region.name() {
                Some(name) => Label::name(name),
                None => Label::key(region.region_type().unknown_key()),
            }
        };
        Some(label)
    }

    // -------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------

    /// Check that every link points at a present region, that parents and
    /// children agree, and that no region is its own ancestor.
    ///
    /// # Errors
    ///
    /// Returns the first [`WorldError::DanglingReference`],
    /// [`WorldError::InconsistentLink`] or [`WorldError::CycleDetected`]
    /// found, in identifier order.
    pub fn validate(&self) -> Result<(), WorldError> {
        for region in self.regions.values() {
            let id = region.id();
            if let Some(parent_id) = region.parent() {
                let parent = self.get(parent_id).ok_or(WorldError::DanglingReference {
                    from: id,
                    to: parent_id,
                })?;
                if !parent.children().contains(&id) {
                    return Err(WorldError::InconsistentLink {
                        parent: parent_id,
                        child: id,
                    });
                }
            }
            for &child_id in region.children() {
                let child = self.get(child_id).ok_or(WorldError::DanglingReference {
                    from: id,
                    to: child_id,
                })?;
                if child.parent() != Some(id) {
                    return Err(WorldError::InconsistentLink {
                        parent: id,
                        child: child_id,
                    });
                }
            }
            self.check_acyclic(id)?;
        }
        Ok(())
    }

    fn check_acyclic(&self, id: RegionId) -> Result<(), WorldError> {
        let mut seen = BTreeSet::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if !seen.insert(cur) {
                return Err(WorldError::CycleDetected {
                    parent: cur,
                    child: id,
                });
            }
            current = self.get(cur).and_then(Region::parent);
        }
        Ok(())
    }
}

/// Iterator over a region and its ancestors. See [`RegionMap::lineage`].
#[derive(Debug)]
pub struct Lineage<'a> {
    map: &'a RegionMap,
    next: Option<RegionId>,
    seen: BTreeSet<RegionId>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.seen.insert(id) {
            tracing::warn!(region = %id, "Region hierarchy cycle detected during ancestor walk");
            return None;
        }
        let region = self.map.get(id)?;
        self.next = region.parent();
        Some(region)
    }
}
