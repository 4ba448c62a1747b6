//! # Component Grouping
//!
//! Organizes a transaction's serialized fields into ordered groups keyed by
//! role ordinal.
//!
//! Group identity is the ordinal, not insertion order. Order *within* a group
//! is exactly construction order and determines the group root, so nothing
//! here ever sorts, deduplicates or reorders components, with one exception:
//! [`ComponentGroups::add_typed`] orders heterogeneous items by their explicit
//! type discriminant (stable, so equal tags keep their relative order).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::DisclosureError;
use super::value_objects::{Component, ComponentGroupKind};

/// All components sharing one structural role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroup {
    /// Role ordinal.
    pub group_index: u32,
    /// Components in construction order.
    pub components: Vec<Component>,
}

/// A component tagged with the type discriminant assigned at serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedComponent {
    /// Stable type tag.
    pub discriminant: u32,
    /// Serialized bytes.
    pub bytes: Component,
}

/// The non-empty groups of one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentGroups {
    groups: BTreeMap<u32, ComponentGroup>,
}

impl ComponentGroups {
    /// Empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known role. See [`Self::add_ordinal`].
    pub fn add<I>(&mut self, kind: ComponentGroupKind, values: I) -> Result<(), DisclosureError>
    where
        I: IntoIterator<Item = Option<Component>>,
    {
        self.add_ordinal(kind.ordinal(), values)
    }

    /// Add a group by raw ordinal.
    ///
    /// `None` entries are dropped; the group is created only if something
    /// remains. Adding the same ordinal twice is a configuration error.
    pub fn add_ordinal<I>(&mut self, group_index: u32, values: I) -> Result<(), DisclosureError>
    where
        I: IntoIterator<Item = Option<Component>>,
    {
        if self.groups.contains_key(&group_index) {
            return Err(DisclosureError::Configuration(format!(
                "group {} added twice",
                group_index
            )));
        }
        let components: Vec<Component> = values.into_iter().flatten().collect();
        if !components.is_empty() {
            self.groups.insert(
                group_index,
                ComponentGroup {
                    group_index,
                    components,
                },
            );
        }
        Ok(())
    }

    /// Add a polymorphic group, ordered by type discriminant.
    pub fn add_typed<I>(&mut self, kind: ComponentGroupKind, values: I) -> Result<(), DisclosureError>
    where
        I: IntoIterator<Item = Option<TypedComponent>>,
    {
        let mut typed: Vec<TypedComponent> = values.into_iter().flatten().collect();
        typed.sort_by_key(|item| item.discriminant);
        self.add(kind, typed.into_iter().map(|item| Some(item.bytes)))
    }

    /// Group by role.
    pub fn get(&self, kind: ComponentGroupKind) -> Option<&ComponentGroup> {
        self.groups.get(&kind.ordinal())
    }

    /// Group by raw ordinal.
    pub fn get_ordinal(&self, group_index: u32) -> Option<&ComponentGroup> {
        self.groups.get(&group_index)
    }

    /// Components of a role, empty if absent.
    pub fn components(&self, kind: ComponentGroupKind) -> &[Component] {
        self.get(kind)
            .map(|group| group.components.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn components_mut(&mut self, kind: ComponentGroupKind) -> Option<&mut Vec<Component>> {
        self.groups
            .get_mut(&kind.ordinal())
            .map(|group| &mut group.components)
    }

    /// Groups in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentGroup> {
        self.groups.values()
    }

    /// Highest ordinal present.
    pub fn max_index(&self) -> Option<u32> {
        self.groups.keys().next_back().copied()
    }

    /// Number of non-empty groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// No groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
