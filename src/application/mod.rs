//! Application layer - use cases over the domain repositories

pub mod services;

pub use services::{
    ContractService, CustomerService, InboundSettlementService, OutboundSettlementService,
    RateService, StorageSettlementService,
};
