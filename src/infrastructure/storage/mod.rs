//! Storage traits and implementations

mod collection;
mod file;
mod memory;
mod traits;

pub use collection::JsonCollection;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{KeyValueStore, Store, StoreResult};
