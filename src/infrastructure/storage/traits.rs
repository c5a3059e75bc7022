//! Storage trait definitions

use crate::shared::errors::InfraError;

pub type StoreResult<T> = Result<T, InfraError>;

/// Opaque string key-value store holding every persisted collection.
///
/// Each key holds one serialized collection. Implementations must make a
/// `set` visible to subsequent `get`s on the same instance.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
    /// Keys currently present, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// A typed collection persisted as a whole.
pub trait Store<T>: Send + Sync {
    /// Load the collection; a missing key is an empty collection.
    fn load(&self) -> StoreResult<Vec<T>>;
    fn save(&self, items: &[T]) -> StoreResult<()>;
}
