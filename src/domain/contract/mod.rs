//! Contract aggregate
//!
//! Customer contracts: which storage rate applies, the invoice tax rate and
//! the flat inbound/outbound/container unit prices.

pub mod model;
pub mod repository;

pub use model::{Contract, ContractTerms, ContractType};
pub use repository::ContractRepository;
