//! Stock aggregate
//!
//! Rolls currently in the warehouse, and the inbound and outbound goods
//! movements that put them there and take them out. A roll is identified
//! by its roll number together with its bill of lading.

pub mod model;
pub mod movement;
pub mod repository;

pub use model::{CargoSpec, StockFilter, StockItem};
pub use movement::{InboundMovement, MovementFilter, OutboundMovement};
pub use repository::{InboundMovementRepository, OutboundMovementRepository, StockRepository};
