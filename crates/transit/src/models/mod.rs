//! Transit data models, types, and traits.

pub mod station;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use station::Station;
pub use traits::TransitStation;
pub use types::{Connection, Minutes, Result, TransitError};
