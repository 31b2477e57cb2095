//! Prescribed-pressure boundary condition.

use crate::assets::base::AssetCore;
use crate::defaults::{DEFAULT_BOUNDARY_PRESSURE, DEFAULT_TEMPERATURE};
use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, PRESSURE};
use crate::error::NetworkResult;
use crate::network::Network;
use hn_core::{AssetId, Pressure, Temperature};
use hn_fluids::water;

/// A boundary with a single connection point holding the attached node
/// at a configured pressure.
///
/// When flow leaves the boundary into the network it supplies fluid at
/// the configured temperature; when flow enters the boundary it takes
/// whatever state the node carries.
#[derive(Debug, Clone)]
pub struct BaseBoundary {
    core: AssetCore,
    pressure_set: f64,    // Pa
    temperature_set: f64, // K
}

impl BaseBoundary {
    pub fn new(id: AssetId) -> Self {
        Self {
            core: AssetCore::new(id, 1),
            pressure_set: DEFAULT_BOUNDARY_PRESSURE,
            temperature_set: DEFAULT_TEMPERATURE,
        }
    }

    pub fn core(&self) -> &AssetCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut AssetCore {
        &mut self.core
    }

    pub fn set_pressure(&mut self, pressure: Pressure) {
        self.pressure_set = pressure.value;
    }

    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature_set = temperature.value;
    }

    pub fn pressure_set(&self) -> f64 {
        self.pressure_set
    }

    /// `pressure[point] = configured value`
    fn pressure_row(&self) -> EquationRow {
        EquationRow::prescribe(self.core.unknown_index(0, PRESSURE), self.pressure_set)
    }

    fn thermal_row(&self, net: &Network) -> NetworkResult<EquationRow> {
        // Positive discharge is flow from the node into the boundary.
        if self.core.prev(0, DISCHARGE) >= 0.0 {
            let node = net.connected_node_ref(&self.core, 0)?;
            Ok(self.core.thermal_to_node_row(0, node))
        } else {
            Ok(EquationRow::prescribe(
                self.core.unknown_index(0, INTERNAL_ENERGY),
                water().internal_energy(self.temperature_set),
            ))
        }
    }

    pub(crate) fn equations(&self, net: &Network) -> NetworkResult<Vec<EquationRow>> {
        let node = net.connected_node_ref(&self.core, 0)?;
        Ok(vec![
            self.pressure_row(),
            self.thermal_row(net)?,
            self.core.press_to_node_row(0, node),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::{EntityId, pa};

    #[test]
    fn pressure_row_prescribes_setpoint() {
        let mut boundary = BaseBoundary::new(EntityId::new_random());
        boundary.set_pressure(pa(5.0e5));
        boundary.core_mut().set_matrix_index(3);
        let row = boundary.pressure_row();
        assert_eq!(row.indices, vec![3 + PRESSURE]);
        assert_eq!(row.coefficients, vec![1.0]);
        assert_eq!(row.rhs, 5.0e5);
    }
}
