pub mod contract;
pub mod customer;
pub mod fees;
pub mod rate;
pub mod repositories;
pub mod settlement;
pub mod stock;
pub mod warehouse;

// Re-export commonly used types
pub use contract::{Contract, ContractRepository, ContractTerms, ContractType};
pub use customer::{Contact, Customer, CustomerRepository, LimitRepository, RedemptionLimit};
pub use fees::{
    compute_day_counts, compute_day_counts_str, compute_fee, resolve_unit_price, DayCounts,
    YearMonth,
};
pub use rate::{RateRepository, RateSchedule, Tier};
pub use repositories::{DomainResult, Record, Repository, RepositoryProvider};
pub use settlement::{
    ChargeKind, FlatCharge, InboundFilter, InboundSettlement, InboundSettlementRepository,
    MeteredCharge, OutboundFilter, OutboundSettlement, OutboundSettlementRepository, Payment,
    PaymentMethod, StorageSettlement, StorageSettlementFilter, StorageSettlementRepository,
};

pub use stock::{
    CargoSpec, InboundMovement, InboundMovementRepository, MovementFilter, OutboundMovement,
    OutboundMovementRepository, StockFilter, StockItem, StockRepository,
};
pub use warehouse::{Area, AreaRepository, Location, Slot, SlotRepository, Zone, ZoneRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
