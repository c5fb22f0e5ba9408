//! `localStorage` backend.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use bozor_core::{Store, StoreError};

/// A [`Store`] over the origin's `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the current window's local storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` outside a window or when storage is
    /// disabled (private mode, sandboxed iframe).
    pub fn from_window() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(describe(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }

    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl Store for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.storage
            .clear()
            .map_err(|e| StoreError::Unavailable(describe(&e)))
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        let unavailable = |e: JsValue| StoreError::Unavailable(describe(&e));
        let len = self.storage.length().map_err(unavailable)?;

        let mut entries = Vec::new();
        for index in 0..len {
            let Some(key) = self.storage.key(index).map_err(unavailable)? else {
                continue;
            };
            if !key.starts_with(prefix) {
                continue;
            }
            if let Some(value) = self.storage.get_item(&key).map_err(unavailable)? {
                entries.push((key, value));
            }
        }
        entries.sort();
        Ok(entries)
    }
}

/// Best-effort message for a thrown JS value.
fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(all(test, target_arch = "wasm32"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fresh() -> LocalStorage {
        let mut store = LocalStorage::from_window().unwrap();
        store.clear().unwrap();
        store
    }

    #[wasm_bindgen_test]
    fn test_set_get_remove() {
        let mut store = fresh();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();
    }

    #[wasm_bindgen_test]
    fn test_scan_prefix_filters_and_sorts() {
        let mut store = fresh();
        store.set("product_2", "4").unwrap();
        store.set("cart", "[]").unwrap();
        store.set("product_10", "1").unwrap();
        store.set("theme", "dark").unwrap();

        let counters = store.scan_prefix("product_").unwrap();
        assert_eq!(
            counters,
            vec![
                ("product_10".to_string(), "1".to_string()),
                ("product_2".to_string(), "4".to_string()),
            ]
        );
    }

    #[wasm_bindgen_test]
    fn test_clear_wipes_foreign_keys() {
        let mut store = fresh();
        store.set("theme", "dark").unwrap();
        store.set("product_1", "1").unwrap();

        store.clear().unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        assert!(store.scan_prefix("").unwrap().is_empty());
    }
}
