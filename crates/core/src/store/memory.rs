//! In-memory store.

use std::collections::BTreeMap;

use super::{Store, StoreError};

/// A [`Store`] backed by a `BTreeMap`.
///
/// Used by tests and as the staging area of file-backed stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a store from existing entries.
    #[must_use]
    pub const fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self
            .entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.remove("a").unwrap();
    }

    #[test]
    fn test_scan_prefix() {
        let mut store = MemoryStore::new();
        store.set("cart", "[]").unwrap();
        store.set("product_2", "3").unwrap();
        store.set("product_1", "1").unwrap();
        store.set("theme", "dark").unwrap();

        let scanned = store.scan_prefix("product_").unwrap();
        assert_eq!(
            scanned,
            vec![
                ("product_1".to_string(), "1".to_string()),
                ("product_2".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut store = MemoryStore::new();
        store.set("cart", "[]").unwrap();
        store.set("theme", "dark").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
