//! Item registry: named items with dense handles

use crate::error::XccError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense handle for a registered item.
pub type ItemId = usize;

/// Whether an item must be covered exactly once or may stay uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Must be covered by exactly one selected option.
    Primary,
    /// May be covered; all covering options must agree on its color.
    Secondary,
}

/// A registered item. Kind and color domain are fixed at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    /// For secondary items: number of valid colors (1..=domain).
    /// Zero means colors are only compared for equality, never range-checked.
    pub color_domain: u32,
}

impl Item {
    pub fn is_primary(&self) -> bool {
        self.kind == ItemKind::Primary
    }

    pub fn is_secondary(&self) -> bool {
        self.kind == ItemKind::Secondary
    }
}

/// Maps item names to dense handles and stores their metadata.
///
/// Items are append-only. Primary and secondary items may be declared in any
/// order; the cover matrix separates them when it is built.
#[derive(Debug, Default, Clone)]
pub struct ItemRegistry {
    items: Vec<Item>,
    by_name: HashMap<String, ItemId>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a primary item. Fails if the name is taken.
    pub fn declare_primary(&mut self, name: &str) -> Result<ItemId, XccError> {
        self.declare(name, ItemKind::Primary, 0)
    }

    /// Register a secondary item with an optional color domain size.
    pub fn declare_secondary(&mut self, name: &str, color_domain: u32) -> Result<ItemId, XccError> {
        self.declare(name, ItemKind::Secondary, color_domain)
    }

    fn declare(&mut self, name: &str, kind: ItemKind, color_domain: u32) -> Result<ItemId, XccError> {
        if self.by_name.contains_key(name) {
            return Err(XccError::DuplicateItem(name.to_string()));
        }
        let id = self.items.len();
        self.items.push(Item {
            name: name.to_string(),
            kind,
            color_domain,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a handle by name.
    pub fn lookup(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ItemId) -> &Item {
        &self.items[id]
    }

    /// Fallible lookup by handle, for handles of unknown provenance.
    pub fn try_get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Drop every item registered after the registry had `len` entries.
    /// Used to undo implicit registration done on behalf of an option that
    /// was then rejected.
    pub(crate) fn truncate(&mut self, len: usize) {
        for item in self.items.drain(len..) {
            self.by_name.remove(&item.name);
        }
    }

    pub fn name(&self, id: ItemId) -> &str {
        &self.items[id].name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn primary_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_primary()).count()
    }

    pub fn secondary_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_secondary()).count()
    }

    /// Iterate items in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().enumerate()
    }

    /// Handles of all primary items, in registration order.
    pub fn primary_ids(&self) -> Vec<ItemId> {
        self.iter()
            .filter(|(_, item)| item.is_primary())
            .map(|(id, _)| id)
            .collect()
    }

    /// Handles of all secondary items, in registration order.
    pub fn secondary_ids(&self) -> Vec<ItemId> {
        self.iter()
            .filter(|(_, item)| item.is_secondary())
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut registry = ItemRegistry::new();
        let a = registry.declare_primary("a").unwrap();
        let s = registry.declare_secondary("s", 3).unwrap();

        assert_eq!(registry.lookup("a"), Some(a));
        assert_eq!(registry.lookup("s"), Some(s));
        assert_eq!(registry.lookup("missing"), None);
        assert_eq!(registry.get(a).kind, ItemKind::Primary);
        assert_eq!(registry.get(s).kind, ItemKind::Secondary);
        assert_eq!(registry.get(s).color_domain, 3);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ItemRegistry::new();
        registry.declare_primary("a").unwrap();

        let err = registry.declare_primary("a").unwrap_err();
        assert_eq!(err, XccError::DuplicateItem("a".to_string()));

        // Kind does not matter for duplicate detection.
        let err = registry.declare_secondary("a", 0).unwrap_err();
        assert_eq!(err, XccError::DuplicateItem("a".to_string()));
    }

    #[test]
    fn test_try_get_and_truncate() {
        let mut registry = ItemRegistry::new();
        registry.declare_primary("a").unwrap();
        registry.declare_primary("b").unwrap();

        assert!(registry.try_get(1).is_some());
        assert!(registry.try_get(2).is_none());

        registry.truncate(1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("b"), None);
        assert_eq!(registry.declare_primary("b").unwrap(), 1);
    }

    #[test]
    fn test_counts_and_orders() {
        let mut registry = ItemRegistry::new();
        registry.declare_primary("a").unwrap();
        registry.declare_secondary("s", 0).unwrap();
        registry.declare_primary("b").unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.primary_count(), 2);
        assert_eq!(registry.secondary_count(), 1);
        assert_eq!(registry.primary_ids(), vec![0, 2]);
        assert_eq!(registry.secondary_ids(), vec![1]);
    }
}
