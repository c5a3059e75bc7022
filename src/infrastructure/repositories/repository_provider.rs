//! Key-value store implementation of RepositoryProvider

use std::sync::Arc;

use crate::domain::contract::{Contract, ContractRepository};
use crate::domain::customer::{Customer, CustomerRepository, LimitRepository, RedemptionLimit};
use crate::domain::rate::{RateRepository, RateSchedule};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::settlement::{
    InboundSettlement, InboundSettlementRepository, OutboundSettlement,
    OutboundSettlementRepository, StorageSettlement, StorageSettlementRepository,
};
use crate::domain::stock::{
    InboundMovement, InboundMovementRepository, OutboundMovement, OutboundMovementRepository,
    StockItem, StockRepository,
};
use crate::domain::warehouse::{Area, AreaRepository, Slot, SlotRepository, Zone, ZoneRepository};
use crate::infrastructure::storage::KeyValueStore;

use super::store_repository::StoreRepository;

/// Unified repository provider backed by one key-value store.
///
/// ```ignore
/// let repos = StoreRepositoryProvider::new(Arc::new(InMemoryStore::new()));
/// let rate = repos.rates().find_by_rate_no("R001")?;
/// ```
pub struct StoreRepositoryProvider {
    customers: StoreRepository<Customer>,
    rates: StoreRepository<RateSchedule>,
    contracts: StoreRepository<Contract>,
    storage_settlements: StoreRepository<StorageSettlement>,
    inbound_settlements: StoreRepository<InboundSettlement>,
    outbound_settlements: StoreRepository<OutboundSettlement>,
    limits: StoreRepository<RedemptionLimit>,
    areas: StoreRepository<Area>,
    zones: StoreRepository<Zone>,
    slots: StoreRepository<Slot>,
    stock: StoreRepository<StockItem>,
    inbound_movements: StoreRepository<InboundMovement>,
    outbound_movements: StoreRepository<OutboundMovement>,
}

impl StoreRepositoryProvider {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            customers: StoreRepository::new(kv.clone()),
            rates: StoreRepository::new(kv.clone()),
            contracts: StoreRepository::new(kv.clone()),
            storage_settlements: StoreRepository::new(kv.clone()),
            inbound_settlements: StoreRepository::new(kv.clone()),
            outbound_settlements: StoreRepository::new(kv.clone()),
            limits: StoreRepository::new(kv.clone()),
            areas: StoreRepository::new(kv.clone()),
            zones: StoreRepository::new(kv.clone()),
            slots: StoreRepository::new(kv.clone()),
            stock: StoreRepository::new(kv.clone()),
            inbound_movements: StoreRepository::new(kv.clone()),
            outbound_movements: StoreRepository::new(kv),
        }
    }
}

impl RepositoryProvider for StoreRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn rates(&self) -> &dyn RateRepository {
        &self.rates
    }

    fn contracts(&self) -> &dyn ContractRepository {
        &self.contracts
    }

    fn storage_settlements(&self) -> &dyn StorageSettlementRepository {
        &self.storage_settlements
    }

    fn inbound_settlements(&self) -> &dyn InboundSettlementRepository {
        &self.inbound_settlements
    }

    fn outbound_settlements(&self) -> &dyn OutboundSettlementRepository {
        &self.outbound_settlements
    }

    fn limits(&self) -> &dyn LimitRepository {
        &self.limits
    }

    fn areas(&self) -> &dyn AreaRepository {
        &self.areas
    }

    fn zones(&self) -> &dyn ZoneRepository {
        &self.zones
    }

    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn stock(&self) -> &dyn StockRepository {
        &self.stock
    }

    fn inbound_movements(&self) -> &dyn InboundMovementRepository {
        &self.inbound_movements
    }

    fn outbound_movements(&self) -> &dyn OutboundMovementRepository {
        &self.outbound_movements
    }
}
