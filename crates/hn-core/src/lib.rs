//! hn-core: stable foundation for heatnet.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable identifiers for network entities)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HnError, HnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
