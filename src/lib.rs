//! # Depot Billing
//!
//! Back-office console for a paper and bulk-goods warehouse: customers,
//! warehouse layout, stock and goods movements, tiered storage rates,
//! contracts and the storage, inbound and outbound settlement ledgers.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Aggregates, repository traits and the tiered fee calculator
//! - **application**: Services per aggregate and ledger
//! - **infrastructure**: Key-value stores (memory, JSON files) and repositories
//! - **console**: Runtime wiring a configured store to the services
//! - **shared**: Errors, text filters and validation helpers

pub mod application;
pub mod config;
pub mod console;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use console::{init_tracing, Console};
