//! Generic lumped two-point asset: a linear hydraulic resistance with an
//! optional prescribed heat flux (demand clusters, heat exchangers).

use crate::assets::base::AssetCore;
use crate::defaults::FLOW_EPS;
use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, PRESSURE};
use crate::error::NetworkResult;
use crate::network::Network;
use hn_core::{AssetId, Power};

#[derive(Debug, Clone)]
pub struct FallType {
    core: AssetCore,
    /// Hydraulic resistance [Pa/(kg/s)].
    resistance: f64,
    /// Heat added to the fluid [W]; negative for consumers.
    heat_flux_set: f64,
}

impl FallType {
    pub fn new(id: AssetId) -> Self {
        Self {
            core: AssetCore::new(id, 2),
            resistance: 0.0,
            heat_flux_set: 0.0,
        }
    }

    pub fn core(&self) -> &AssetCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut AssetCore {
        &mut self.core
    }

    /// Hydraulic resistance [Pa/(kg/s)].
    pub fn set_resistance(&mut self, resistance: f64) {
        self.resistance = resistance;
    }

    pub fn set_heat_flux(&mut self, heat_flux: Power) {
        self.heat_flux_set = heat_flux.value;
    }

    pub fn heat_flux_set(&self) -> f64 {
        self.heat_flux_set
    }

    /// Pressure falls along the flow direction: p0 - p1 = R * q0.
    fn momentum_row(&self) -> EquationRow {
        EquationRow::new(
            vec![
                self.core.unknown_index(0, PRESSURE),
                self.core.unknown_index(1, PRESSURE),
                self.core.unknown_index(0, DISCHARGE),
            ],
            vec![1.0, -1.0, -self.resistance],
            0.0,
        )
    }

    /// Energy balance across the asset, linearized around the previous
    /// discharge: mdot * (ie_out - ie_in) = heat flux.
    fn thermal_row(&self) -> EquationRow {
        let inflow = self.core.unknown_index(self.core.inflow_point(), INTERNAL_ENERGY);
        let outflow = self.core.unknown_index(self.core.outflow_point(), INTERNAL_ENERGY);
        let mass_flow = self.core.prev(0, DISCHARGE).abs();
        if mass_flow < FLOW_EPS {
            // no throughflow: carry the state across unchanged
            EquationRow::difference(outflow, inflow, 0.0)
        } else {
            EquationRow::new(
                vec![outflow, inflow],
                vec![mass_flow, -mass_flow],
                self.heat_flux_set,
            )
        }
    }

    pub(crate) fn equations(&self, net: &Network) -> NetworkResult<Vec<EquationRow>> {
        let node_0 = net.connected_node_ref(&self.core, 0)?;
        let node_1 = net.connected_node_ref(&self.core, 1)?;
        let inflow = self.core.inflow_point();
        let inflow_node = if inflow == 0 { node_0 } else { node_1 };
        Ok(vec![
            self.core.internal_continuity_row(),
            self.momentum_row(),
            self.thermal_row(),
            self.core.press_to_node_row(0, node_0),
            self.core.press_to_node_row(1, node_1),
            self.core.thermal_to_node_row(inflow, inflow_node),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::NUM_CORE_QUANTITIES;
    use hn_core::{EntityId, w};

    #[test]
    fn thermal_row_scales_with_discharge() {
        let mut fall = FallType::new(EntityId::new_random());
        fall.set_heat_flux(w(-40_000.0));
        fall.core_mut().prev_sol[DISCHARGE] = 2.0;
        let row = fall.thermal_row();
        // outflow point is 1 for positive discharge
        assert_eq!(
            row.indices,
            vec![NUM_CORE_QUANTITIES + INTERNAL_ENERGY, INTERNAL_ENERGY]
        );
        assert_eq!(row.coefficients, vec![2.0, -2.0]);
        assert_eq!(row.rhs, -40_000.0);
    }

    #[test]
    fn stagnant_thermal_row_degenerates() {
        let fall = FallType::new(EntityId::new_random());
        let row = fall.thermal_row();
        assert_eq!(row.coefficients, vec![1.0, -1.0]);
        assert_eq!(row.rhs, 0.0);
    }
}
