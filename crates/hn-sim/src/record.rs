//! Per-timestep output capture.

use hn_core::AssetId;
use hn_network::{AssetKind, Network};

/// Solved state of one asset at one timestep.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub id: AssetId,
    pub kind: AssetKind,
    /// Mass flow rate [kg/s] per connection point.
    pub mass_flow_rate: Vec<f64>,
    /// Pressure [Pa] per connection point.
    pub pressure: Vec<f64>,
    /// Temperature [K] per connection point.
    pub temperature: Vec<f64>,
    /// Net heat exchanged with the surroundings [W]; pipes only.
    pub heat_supplied: Option<f64>,
}

/// All asset outputs of one solved timestep.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Simulation time [s].
    pub time: f64,
    /// Solver iterations the step needed.
    pub iterations: usize,
    pub assets: Vec<AssetRecord>,
}

impl StepRecord {
    pub(crate) fn capture(network: &Network, time: f64, iterations: usize) -> Self {
        let assets = network
            .assets()
            .map(|asset| {
                let points = asset.core().connection_points();
                AssetRecord {
                    id: asset.id(),
                    kind: asset.kind(),
                    mass_flow_rate: (0..points).map(|p| asset.mass_flow_rate(p)).collect(),
                    pressure: (0..points).map(|p| asset.pressure(p)).collect(),
                    temperature: (0..points).map(|p| asset.temperature(p)).collect(),
                    heat_supplied: asset.heat_supplied(),
                }
            })
            .collect();
        Self {
            time,
            iterations,
            assets,
        }
    }

    /// The record for one asset, if it exists in this step.
    pub fn asset(&self, id: AssetId) -> Option<&AssetRecord> {
        self.assets.iter().find(|record| record.id == id)
    }
}
