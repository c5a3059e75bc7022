//! Warehouse topology aggregate
//!
//! Areas (warehouses) contain zones, zones contain slots. Goods movements
//! and stock items name their location by these names.

pub mod model;
pub mod repository;

pub use model::{Area, Location, Slot, Zone};
pub use repository::{AreaRepository, SlotRepository, ZoneRepository};
