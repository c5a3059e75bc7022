//! Repository traits for the domain layer
//!
//! Contains:
//! - `Record`: identity and collection name of a persisted aggregate
//! - `Repository`: CRUD shared by every aggregate repository
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::contract::ContractRepository;
use super::customer::{CustomerRepository, LimitRepository};
use super::rate::RateRepository;
use super::settlement::{
    InboundSettlementRepository, OutboundSettlementRepository, StorageSettlementRepository,
};
use super::stock::{InboundMovementRepository, OutboundMovementRepository, StockRepository};
use super::warehouse::{AreaRepository, SlotRepository, ZoneRepository};
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// A persisted aggregate: one element of a keyed collection.
pub trait Record: Clone + Send + Sync + 'static {
    /// Key of the collection in the key-value store.
    const COLLECTION: &'static str;
    /// Entity name used in not-found errors and logs.
    const ENTITY: &'static str;

    fn key(&self) -> &str;
    fn set_key(&mut self, key: String);
}

/// CRUD over one collection. Records keep insertion order.
pub trait Repository<T: Record>: Send + Sync {
    fn find_all(&self) -> DomainResult<Vec<T>>;
    fn find_by_key(&self, key: &str) -> DomainResult<Option<T>>;
    /// Append a record, assigning a fresh key when it has none.
    fn insert(&self, record: T) -> DomainResult<T>;
    /// Replace the record with the same key.
    fn update(&self, record: T) -> DomainResult<()>;
    fn delete(&self, key: &str) -> DomainResult<()>;
    /// Edit the whole collection in one locked read-modify-write.
    ///
    /// `edit` returns how many records it changed; the collection is saved
    /// only when that count is non-zero.
    fn modify_all(&self, edit: &mut dyn FnMut(&mut Vec<T>) -> usize) -> DomainResult<usize>;
}

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
///     let rate = repos.rates().find_by_rate_no("R001")?;
///     let records = repos.storage_settlements().find_all()?;
///     Ok(())
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn rates(&self) -> &dyn RateRepository;
    fn contracts(&self) -> &dyn ContractRepository;
    fn storage_settlements(&self) -> &dyn StorageSettlementRepository;
    fn inbound_settlements(&self) -> &dyn InboundSettlementRepository;
    fn outbound_settlements(&self) -> &dyn OutboundSettlementRepository;
    fn limits(&self) -> &dyn LimitRepository;
    fn areas(&self) -> &dyn AreaRepository;
    fn zones(&self) -> &dyn ZoneRepository;
    fn slots(&self) -> &dyn SlotRepository;
    fn stock(&self) -> &dyn StockRepository;
    fn inbound_movements(&self) -> &dyn InboundMovementRepository;
    fn outbound_movements(&self) -> &dyn OutboundMovementRepository;
}
