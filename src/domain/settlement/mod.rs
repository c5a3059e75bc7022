//! Settlement aggregates
//!
//! The three billing ledgers of the warehouse: storage fees (tiered, per
//! day and weight), inbound handling and outbound handling.

pub mod inbound;
pub mod outbound;
pub mod payment;
pub mod repository;
pub mod storage;

pub use inbound::{InboundFilter, InboundSettlement};
pub use outbound::{ChargeKind, FlatCharge, MeteredCharge, OutboundFilter, OutboundSettlement};
pub use payment::{Payment, PaymentMethod};
pub use repository::{
    InboundSettlementRepository, OutboundSettlementRepository, StorageSettlementRepository,
};
pub use storage::{StorageSettlement, StorageSettlementFilter};
