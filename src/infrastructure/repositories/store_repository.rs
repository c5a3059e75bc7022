//! Repository implementations over JSON collections

use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::contract::{Contract, ContractRepository};
use crate::domain::customer::{Customer, CustomerRepository, LimitRepository, RedemptionLimit};
use crate::domain::rate::{RateRepository, RateSchedule};
use crate::domain::repositories::{Record, Repository};
use crate::domain::settlement::{
    InboundSettlement, InboundSettlementRepository, OutboundSettlement,
    OutboundSettlementRepository, StorageSettlement, StorageSettlementRepository,
};
use crate::domain::stock::{
    InboundMovement, InboundMovementRepository, OutboundMovement, OutboundMovementRepository,
    StockItem, StockRepository,
};
use crate::domain::warehouse::{Area, AreaRepository, Slot, SlotRepository, Zone, ZoneRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::storage::{JsonCollection, KeyValueStore, Store};

/// Generic repository persisting `T` under `T::COLLECTION`.
///
/// Every mutation is load → modify → save under one lock, so concurrent
/// callers on the same repository cannot lose each other's writes.
pub struct StoreRepository<T> {
    collection: JsonCollection<T>,
    lock: Mutex<()>,
}

impl<T: Record> StoreRepository<T> {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: JsonCollection::new(kv, T::COLLECTION),
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn not_found(key: &str) -> DomainError {
        DomainError::not_found(T::ENTITY, "key", key)
    }
}

impl<T> Repository<T> for StoreRepository<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    fn find_all(&self) -> DomainResult<Vec<T>> {
        Ok(self.collection.load()?)
    }

    fn find_by_key(&self, key: &str) -> DomainResult<Option<T>> {
        Ok(self.collection.load()?.into_iter().find(|r| r.key() == key))
    }

    fn insert(&self, mut record: T) -> DomainResult<T> {
        let _guard = self.guard();
        let mut items = self.collection.load()?;

        if record.key().is_empty() {
            record.set_key(Uuid::new_v4().to_string());
        } else if items.iter().any(|r| r.key() == record.key()) {
            return Err(DomainError::Conflict(format!(
                "{} with key {}",
                T::ENTITY,
                record.key()
            )));
        }

        items.push(record.clone());
        self.collection.save(&items)?;
        debug!(collection = T::COLLECTION, key = record.key(), "Record inserted");
        Ok(record)
    }

    fn update(&self, record: T) -> DomainResult<()> {
        let _guard = self.guard();
        let mut items = self.collection.load()?;
        let slot = items
            .iter_mut()
            .find(|r| r.key() == record.key())
            .ok_or_else(|| Self::not_found(record.key()))?;
        *slot = record;
        self.collection.save(&items)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> DomainResult<()> {
        let _guard = self.guard();
        let mut items = self.collection.load()?;
        let before = items.len();
        items.retain(|r| r.key() != key);
        if items.len() == before {
            return Err(Self::not_found(key));
        }
        self.collection.save(&items)?;
        debug!(collection = T::COLLECTION, key, "Record deleted");
        Ok(())
    }

    fn modify_all(&self, edit: &mut dyn FnMut(&mut Vec<T>) -> usize) -> DomainResult<usize> {
        let _guard = self.guard();
        let mut items = self.collection.load()?;
        let changed = edit(&mut items);
        if changed > 0 {
            self.collection.save(&items)?;
            debug!(collection = T::COLLECTION, changed, "Collection rewritten");
        }
        Ok(changed)
    }
}

impl CustomerRepository for StoreRepository<Customer> {}
impl RateRepository for StoreRepository<RateSchedule> {}
impl ContractRepository for StoreRepository<Contract> {}
impl StorageSettlementRepository for StoreRepository<StorageSettlement> {}
impl InboundSettlementRepository for StoreRepository<InboundSettlement> {}
impl OutboundSettlementRepository for StoreRepository<OutboundSettlement> {}
impl LimitRepository for StoreRepository<RedemptionLimit> {}
impl AreaRepository for StoreRepository<Area> {}
impl ZoneRepository for StoreRepository<Zone> {}
impl SlotRepository for StoreRepository<Slot> {}
impl StockRepository for StoreRepository<StockItem> {}
impl InboundMovementRepository for StoreRepository<InboundMovement> {}
impl OutboundMovementRepository for StoreRepository<OutboundMovement> {}
