//! Storage rate aggregate
//!
//! Tiered storage rate schedules ("rate rules"), referenced by contracts.

pub mod model;
pub mod repository;

pub use model::{RateSchedule, Tier};
pub use repository::RateRepository;
