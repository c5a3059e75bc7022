//! Infrastructure layer - storage backends and repository implementations

pub mod repositories;
pub mod storage;

pub use repositories::{StoreRepository, StoreRepositoryProvider};
pub use storage::{FileStore, InMemoryStore, JsonCollection, KeyValueStore, Store, StoreResult};
