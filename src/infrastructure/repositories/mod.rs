//! Repository implementations

mod repository_provider;
mod store_repository;

pub use repository_provider::StoreRepositoryProvider;
pub use store_repository::StoreRepository;
