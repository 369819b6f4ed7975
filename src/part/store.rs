use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::SessionError;
use crate::math::Vector2;

use super::{DuctPart, GroupId, PartId, PartTemplate};

/// Arena that owns every part of a layout.
///
/// Parts are addressed by generational [`PartId`]s, so an id held by a
/// dimension never resolves to a different part after its own part has been
/// removed. Iteration follows insertion order, which fixes the tie-break
/// order for snapping and the stacking order for picking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartStore {
    parts: SlotMap<PartId, DuctPart>,
    groups: SlotMap<GroupId, usize>,
    order: Vec<PartId>,
}

impl PartStore {
    /// Creates a new, empty part store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a part in a group of its own and returns its ID.
    pub fn add(&mut self, template: PartTemplate) -> PartId {
        let group = self.groups.insert(0);
        self.insert_into(template, group)
    }

    /// Inserts a part into an existing group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group has no members left.
    pub fn add_to_group(
        &mut self,
        template: PartTemplate,
        group: GroupId,
    ) -> Result<PartId, SessionError> {
        if !self.groups.contains_key(group) {
            return Err(SessionError::PartNotFound(format!("group {group:?}")));
        }
        Ok(self.insert_into(template, group))
    }

    fn insert_into(&mut self, template: PartTemplate, group: GroupId) -> PartId {
        let id = self
            .parts
            .insert_with_key(|id| template.into_part(id, group));
        if let Some(members) = self.groups.get_mut(group) {
            *members += 1;
        }
        self.order.push(id);
        id
    }

    /// Removes a part, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not in the store.
    pub fn remove(&mut self, id: PartId) -> Result<DuctPart, SessionError> {
        let part = self
            .parts
            .remove(id)
            .ok_or_else(|| SessionError::PartNotFound(format!("{id:?}")))?;
        self.order.retain(|&other| other != id);
        self.release_group(part.group_id);
        Ok(part)
    }

    fn release_group(&mut self, group: GroupId) {
        let empty = match self.groups.get_mut(group) {
            Some(members) => {
                *members = members.saturating_sub(1);
                *members == 0
            }
            None => false,
        };
        if empty {
            self.groups.remove(group);
        }
    }

    /// Moves a part into a group of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not in the store.
    pub fn detach(&mut self, id: PartId) -> Result<GroupId, SessionError> {
        let old = self.part(id)?.group_id;
        let group = self.groups.insert(1);
        self.part_mut(id)?.group_id = group;
        self.release_group(old);
        Ok(group)
    }

    /// Returns a reference to the part, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not in the store.
    pub fn part(&self, id: PartId) -> Result<&DuctPart, SessionError> {
        self.parts
            .get(id)
            .ok_or_else(|| SessionError::PartNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the part, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is not in the store.
    pub fn part_mut(&mut self, id: PartId) -> Result<&mut DuctPart, SessionError> {
        self.parts
            .get_mut(id)
            .ok_or_else(|| SessionError::PartNotFound(format!("{id:?}")))
    }

    /// Returns the part if it still exists.
    #[must_use]
    pub fn get(&self, id: PartId) -> Option<&DuctPart> {
        self.parts.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(id)
    }

    /// Iterates over parts in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DuctPart> + Clone + '_ {
        self.order.iter().filter_map(|&id| self.parts.get(id))
    }

    /// Returns the IDs of every part in `group`, in insertion order.
    #[must_use]
    pub fn group_members(&self, group: GroupId) -> Vec<PartId> {
        self.iter()
            .filter(|p| p.group_id == group)
            .map(|p| p.id)
            .collect()
    }

    /// Translates every part of `group` by `delta`.
    pub fn translate_group(&mut self, group: GroupId, delta: &Vector2) {
        for part in self.parts.values_mut().filter(|p| p.group_id == group) {
            part.translate(delta);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Removes every part and group.
    pub fn clear(&mut self) {
        self.parts.clear();
        self.groups.clear();
        self.order.clear();
    }
}
