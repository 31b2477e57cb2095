//! Entity graph for district heating networks.
//!
//! A network is a set of assets (pipes, production clusters, boundaries,
//! generic lumped assets) joined at nodes. Every entity owns a contiguous
//! slice of the global unknown vector (discharge, pressure, internal
//! energy per connection point) and knows how to express its local
//! physics as linear(ized) [`EquationRow`]s; the solver crate assembles
//! those rows into one system per iteration.

pub mod assets;
pub mod defaults;
pub mod equation;
pub mod error;
pub mod network;
pub mod node;

pub use assets::{AssetKind, AssetVariant, BaseBoundary, FallType, ProductionAsset, SolverPipe};
pub use equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, NUM_CORE_QUANTITIES, PRESSURE};
pub use error::{NetworkError, NetworkResult};
pub use network::Network;
pub use node::Node;
