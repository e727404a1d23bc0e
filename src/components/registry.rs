// Component registry - sole owner of accumulated analysis state
#![allow(dead_code)]

use super::{Component, ComponentKind, DeclaredSchema, Location, OwnerKey, UsageRecord};
use std::collections::HashMap;
use std::path::PathBuf;

/// Partial update merged into a component entry.
///
/// Merges follow a read-modify-write sequence on the owning entry: usage
/// records append in order, the boolean flags are sticky (once true they
/// never reset), and a schema replaces any previous one.
#[derive(Debug, Default)]
pub struct ComponentUpdate {
    pub used_properties: Vec<UsageRecord>,
    pub suppress_unused_check: bool,
    pub ignore_validation: bool,
    pub declared_schema: Option<DeclaredSchema>,
}

impl ComponentUpdate {
    pub fn usage(record: UsageRecord) -> Self {
        Self {
            used_properties: vec![record],
            ..Self::default()
        }
    }

    pub fn suppress() -> Self {
        Self {
            suppress_unused_check: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.used_properties.is_empty()
            && !self.suppress_unused_check
            && !self.ignore_validation
            && self.declared_schema.is_none()
    }
}

/// Registry of components discovered in one source unit.
///
/// One registry exists per analyzed file; entries are never shared across
/// units, and all mutation happens through `register` and `merge`.
#[derive(Debug)]
pub struct ComponentRegistry {
    /// Source file this registry belongs to
    file: PathBuf,

    /// Entries by ownership key
    entries: HashMap<OwnerKey, Component>,

    /// Insertion order, for deterministic extraction
    order: Vec<OwnerKey>,

    /// Map from component name to key (for propTypes attachment)
    name_index: HashMap<String, OwnerKey>,
}

impl ComponentRegistry {
    pub fn new(file: PathBuf) -> Self {
        Self {
            file,
            entries: HashMap::new(),
            order: Vec::new(),
            name_index: HashMap::new(),
        }
    }

    /// Register a classified component construct
    pub fn register(
        &mut self,
        node_id: usize,
        name: Option<String>,
        kind: ComponentKind,
        location: Location,
    ) -> OwnerKey {
        let key = OwnerKey::Component(node_id);
        if self.entries.contains_key(&key) {
            return key;
        }

        if let Some(ref name) = name {
            self.name_index.entry(name.clone()).or_insert(key);
        }

        self.entries
            .insert(key, Component::new(key, name, kind, location));
        self.order.push(key);
        key
    }

    /// Merge a partial update into the entry for `key`, creating a stub
    /// entry when none exists yet (the ungrouped fallback).
    pub fn merge(&mut self, key: OwnerKey, update: ComponentUpdate) {
        let entry = self.entries.entry(key).or_insert_with(|| {
            self.order.push(key);
            Component::new(
                key,
                None,
                ComponentKind::Ungrouped,
                Location::synthetic(self.file.clone()),
            )
        });

        entry.used_properties.extend(update.used_properties);
        entry.suppress_unused_check |= update.suppress_unused_check;
        entry.ignore_validation |= update.ignore_validation;
        if update.declared_schema.is_some() {
            entry.declared_schema = update.declared_schema;
        }
    }

    /// Get a component by key
    pub fn get(&self, key: &OwnerKey) -> Option<&Component> {
        self.entries.get(key)
    }

    /// Whether a node is a registered component construct
    pub fn is_component_node(&self, node_id: usize) -> bool {
        self.entries.contains_key(&OwnerKey::Component(node_id))
    }

    /// Find a registered component by name
    pub fn find_by_name(&self, name: &str) -> Option<OwnerKey> {
        self.name_index.get(name).copied()
    }

    /// Iterate entries in insertion order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    /// Number of entries (including ungrouped stubs)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the registry into an insertion-ordered component list
    pub fn into_components(mut self) -> Vec<Component> {
        self.order
            .iter()
            .filter_map(|key| self.entries.remove(key))
            .collect()
    }
}
