pub mod errors;
pub mod filter;

pub use errors::*;
pub use filter::*;
