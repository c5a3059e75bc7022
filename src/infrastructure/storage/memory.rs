//! In-memory storage implementation

use dashmap::DashMap;

use super::traits::{KeyValueStore, StoreResult};

/// In-memory key-value store for development and testing
#[derive(Default)]
pub struct InMemoryStore {
    entries: DashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("customers").unwrap(), None);

        store.set("customers", "[]").unwrap();
        store.set("contracts", "[1]").unwrap();
        assert_eq!(store.get("customers").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.keys().unwrap(), vec!["contracts", "customers"]);

        store.remove("customers").unwrap();
        assert_eq!(store.get("customers").unwrap(), None);
    }
}
