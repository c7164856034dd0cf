//! The shared name -> type table filled during resolution.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Value;
use tracing::debug;

use super::types::ResolvedType;

/// One registered name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEntry {
    Type(ResolvedType),
    /// Raw `enum` values in document order.
    Enum(Vec<Value>),
}

impl RegistryEntry {
    /// Enums containing a number (or a numeric string) or any non-string
    /// value render as a literal union instead of a name/value enum.
    pub fn is_literal_union(&self) -> bool {
        match self {
            Self::Enum(values) => values.iter().any(is_numeric_or_non_string),
            Self::Type(_) => false,
        }
    }
}

fn is_numeric_or_non_string(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => true,
    }
}

/// Name -> type table, kept in first-registration order.
///
/// Passed by `&mut` through nested resolve calls; a child's registrations
/// are visible to its parent and to siblings resolved after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Register a resolved type. A later registration under the same name
    /// replaces the value but keeps its first position.
    pub fn insert(&mut self, name: impl Into<String>, ty: ResolvedType) {
        let name = name.into();
        debug!(name = %name, "Registered type.");
        self.entries.insert(name, RegistryEntry::Type(ty));
    }

    /// Register raw enum values under `name`.
    pub fn register_enum(&mut self, name: impl Into<String>, values: Vec<Value>) {
        let name = name.into();
        debug!(name = %name, count = values.len(), "Registered enum.");
        self.entries.insert(name, RegistryEntry::Enum(values));
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RegistryEntry)> {
        self.entries.iter()
    }

    /// Keys in lexicographic order, as used for emission.
    pub fn sorted_keys(&self) -> Vec<&String> {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    /// Append every entry of `other` whose name is not registered yet.
    /// Existing names keep their first definition.
    pub fn merge(&mut self, other: Self) {
        for (name, entry) in other.entries {
            match self.entries.entry(name) {
                Entry::Occupied(existing) => {
                    if existing.get() != &entry {
                        debug!(name = %existing.key(), "Kept first definition on registry merge.");
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
    }

    /// Names referenced by `types` or by registered types that have no entry.
    pub fn dangling_references<'a>(
        &self,
        types: impl IntoIterator<Item = &'a ResolvedType>,
    ) -> Vec<String> {
        let mut referenced = BTreeSet::new();
        for entry in self.entries.values() {
            if let RegistryEntry::Type(ty) = entry {
                referenced.extend(ty.referenced_names());
            }
        }
        for ty in types {
            referenced.extend(ty.referenced_names());
        }

        referenced
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect()
    }
}
