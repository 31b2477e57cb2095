//! Temporal simulation loop for heatnet.
//!
//! Drives a [`hn_network::Network`] through a sequence of timesteps:
//! controller-supplied setpoints are pushed into the assets, the solver
//! converges the network state (warm-started from the previous step),
//! and per-asset outputs are recorded.

pub mod error;
pub mod record;
pub mod setpoints;
pub mod sim;

pub use error::{SimError, SimResult};
pub use record::{AssetRecord, StepRecord};
pub use setpoints::{Setpoints, apply_setpoints};
pub use sim::{SimOptions, run_simulation};
