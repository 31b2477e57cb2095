//! Junctions between asset connection points.

use crate::defaults::{DEFAULT_TEMPERATURE, FLOW_EPS};
use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, NUM_CORE_QUANTITIES};
use crate::error::NetworkResult;
use crate::network::Network;
use hn_core::{AssetId, NodeId};
use hn_fluids::water;

/// A junction where asset connection points meet.
///
/// Nodes own three unknowns: an external discharge (zero unless the
/// network exchanges mass with the outside), the junction pressure, and
/// the junction internal energy.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub number_of_unknowns: usize,
    pub matrix_index: usize,
    pub prev_sol: Vec<f64>,
    connected: Vec<(AssetId, usize)>,
    /// Fallback temperature [K] when no attached point carries flow.
    pub default_temperature: f64,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            number_of_unknowns: NUM_CORE_QUANTITIES,
            matrix_index: 0,
            prev_sol: vec![0.0; NUM_CORE_QUANTITIES],
            connected: Vec::new(),
            default_temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub(crate) fn connect_asset(&mut self, asset: AssetId, point: usize) {
        self.connected.push((asset, point));
    }

    /// True when at least one asset connection point is attached.
    pub fn is_connected(&self) -> bool {
        !self.connected.is_empty()
    }

    /// Attached (asset, connection point) pairs in attachment order.
    pub fn connected_points(&self) -> &[(AssetId, usize)] {
        &self.connected
    }

    /// Global position of one of this node's unknowns.
    pub fn unknown_index(&self, offset: usize) -> usize {
        self.matrix_index + offset
    }

    /// Mass balance: discharges into the attached assets sum to the
    /// node's external discharge.
    fn continuity_row(&self, net: &Network) -> NetworkResult<EquationRow> {
        let mut indices = Vec::with_capacity(self.connected.len() + 1);
        for &(asset, point) in &self.connected {
            indices.push(net.asset(asset)?.core().unknown_index(point, DISCHARGE));
        }
        indices.push(self.unknown_index(DISCHARGE));
        let mut coefficients = vec![1.0; self.connected.len()];
        coefficients.push(-1.0);
        Ok(EquationRow::new(indices, coefficients, 0.0))
    }

    /// Thermal balance, linearized upwind around the previous iterate:
    /// points flowing into the node carry their own internal energy,
    /// points flowing out carry the node's.
    fn thermal_row(&self, net: &Network) -> NetworkResult<EquationRow> {
        let mut indices = Vec::new();
        let mut coefficients = Vec::new();
        let mut outflow = 0.0;
        for &(asset, point) in &self.connected {
            let core = net.asset(asset)?.core();
            let discharge = core.prev(point, DISCHARGE);
            if discharge > FLOW_EPS {
                // node -> asset: leaves with this node's energy
                outflow += discharge;
            } else if discharge < -FLOW_EPS {
                // asset -> node
                indices.push(core.unknown_index(point, INTERNAL_ENERGY));
                coefficients.push(discharge);
            }
        }
        if outflow <= FLOW_EPS {
            // stagnant junction: pin the energy to the fallback state
            return Ok(EquationRow::prescribe(
                self.unknown_index(INTERNAL_ENERGY),
                water().internal_energy(self.default_temperature),
            ));
        }
        indices.push(self.unknown_index(INTERNAL_ENERGY));
        coefficients.push(outflow);
        Ok(EquationRow::new(indices, coefficients, 0.0))
    }

    pub(crate) fn equations(&self, net: &Network) -> NetworkResult<Vec<EquationRow>> {
        Ok(vec![
            EquationRow::prescribe(self.unknown_index(DISCHARGE), 0.0),
            self.continuity_row(net)?,
            self.thermal_row(net)?,
        ])
    }
}
