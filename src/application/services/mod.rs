//! Application services

mod contract;
mod customer;
mod inbound_settlement;
mod limit;
mod movement;
mod outbound_settlement;
mod rate;
mod stock;
mod storage_settlement;
mod warehouse;

pub use contract::ContractService;
pub use customer::CustomerService;
pub use inbound_settlement::InboundSettlementService;
pub use limit::LimitService;
pub use movement::MovementService;
pub use outbound_settlement::OutboundSettlementService;
pub use rate::RateService;
pub use stock::StockService;
pub use storage_settlement::StorageSettlementService;
pub use warehouse::WarehouseService;

#[cfg(test)]
pub(crate) fn test_repos() -> std::sync::Arc<dyn crate::domain::RepositoryProvider> {
    use crate::infrastructure::{InMemoryStore, StoreRepositoryProvider};
    std::sync::Arc::new(StoreRepositoryProvider::new(std::sync::Arc::new(
        InMemoryStore::new(),
    )))
}

#[cfg(test)]
pub(crate) fn sample_zone(area: &str, name: &str, index: u32) -> crate::domain::Zone {
    use rust_decimal_macros::dec;
    crate::domain::Zone {
        length: dec!(100),
        width: dec!(40),
        height: dec!(10),
        ..crate::domain::Zone::new(area, name, index)
    }
}

/// Baowan / Hall 10 / A01 and A02.
#[cfg(test)]
pub(crate) fn seed_topology(warehouse: &WarehouseService) {
    use crate::domain::{Area, Slot};
    warehouse
        .create_area(Area::new("Baowan", "A001", "1 Harbor Rd"))
        .unwrap();
    warehouse
        .create_zone(sample_zone("Baowan", "Hall 10", 1))
        .unwrap();
    for name in ["A01", "A02"] {
        warehouse
            .create_slot(Slot::new("Baowan", "Hall 10", name, name))
            .unwrap();
    }
}
