//! Customer aggregate
//!
//! The customer registry. The same customer may act as cargo owner, as
//! pickup party, or both. Redemption limits bind an owner and a picker.

pub mod limit;
pub mod model;
pub mod repository;

pub use limit::RedemptionLimit;
pub use model::{Contact, Customer, MAX_CONTACTS};
pub use repository::{CustomerRepository, LimitRepository};
