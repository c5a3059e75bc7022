//! JSON collections on top of a key-value store

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::{KeyValueStore, Store, StoreResult};

/// A `Vec<T>` stored as one JSON array under a fixed key.
pub struct JsonCollection<T> {
    kv: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T> {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            kv,
            key,
            _marker: PhantomData,
        }
    }
}

impl<T> Store<T> for JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> StoreResult<Vec<T>> {
        match self.kv.get(self.key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(items)?;
        self.kv.set(self.key, &raw)
    }
}
