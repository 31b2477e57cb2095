//! Production cluster: the pressurizing, heat-supplying source asset.

use crate::assets::base::AssetCore;
use crate::defaults::{DEFAULT_MASS_FLOW_RATE, DEFAULT_PRESSURE, DEFAULT_TEMPERATURE};
use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, PRESSURE};
use crate::error::{NetworkError, NetworkResult};
use crate::network::Network;
use hn_core::{AssetId, MassRate, Pressure, Temperature};
use hn_fluids::water;

/// Connection point on the return (inlet) side.
pub const RETURN_POINT: usize = 0;
/// Connection point on the supply (outlet) side.
pub const SUPPLY_POINT: usize = 1;

/// A source asset: draws fluid from the return side, delivers it on the
/// supply side at the configured temperature, and constrains either the
/// mass flow through itself or the supply pressure.
#[derive(Debug, Clone)]
pub struct ProductionAsset {
    core: AssetCore,
    prescribe_mass_flow: bool,
    mass_flow_rate_set: f64,     // kg/s
    pressure_set: f64,           // Pa
    supply_temperature_set: f64, // K
}

impl ProductionAsset {
    pub fn new(id: AssetId) -> Self {
        Self {
            core: AssetCore::new(id, 2),
            prescribe_mass_flow: true,
            mass_flow_rate_set: DEFAULT_MASS_FLOW_RATE,
            pressure_set: DEFAULT_PRESSURE,
            supply_temperature_set: DEFAULT_TEMPERATURE,
        }
    }

    pub fn core(&self) -> &AssetCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut AssetCore {
        &mut self.core
    }

    /// Choose between constraining mass flow (true) or supply pressure.
    pub fn set_prescribe_mass_flow(&mut self, flag: bool) {
        self.prescribe_mass_flow = flag;
    }

    pub fn set_mass_flow_rate(&mut self, mass_flow: MassRate) -> NetworkResult<()> {
        if mass_flow.value < 0.0 {
            return Err(NetworkError::NonPhysical {
                what: "prescribed mass flow must be non-negative",
            });
        }
        self.mass_flow_rate_set = mass_flow.value;
        Ok(())
    }

    pub fn set_pressure(&mut self, pressure: Pressure) {
        self.pressure_set = pressure.value;
    }

    pub fn set_supply_temperature(&mut self, temperature: Temperature) {
        self.supply_temperature_set = temperature.value;
    }

    pub fn mass_flow_rate_set(&self) -> f64 {
        self.mass_flow_rate_set
    }

    /// The source constraint: prescribed mass flow through the asset or
    /// prescribed pressure at the supply side.
    fn supply_row(&self) -> EquationRow {
        if self.prescribe_mass_flow {
            EquationRow::prescribe(
                self.core.unknown_index(RETURN_POINT, DISCHARGE),
                self.mass_flow_rate_set,
            )
        } else {
            EquationRow::prescribe(
                self.core.unknown_index(SUPPLY_POINT, PRESSURE),
                self.pressure_set,
            )
        }
    }

    /// Delivered fluid leaves at the configured supply temperature.
    fn thermal_row(&self) -> EquationRow {
        EquationRow::prescribe(
            self.core.unknown_index(self.core.outflow_point(), INTERNAL_ENERGY),
            water().internal_energy(self.supply_temperature_set),
        )
    }

    pub(crate) fn equations(&self, net: &Network) -> NetworkResult<Vec<EquationRow>> {
        let node_return = net.connected_node_ref(&self.core, RETURN_POINT)?;
        let node_supply = net.connected_node_ref(&self.core, SUPPLY_POINT)?;
        let inflow = self.core.inflow_point();
        let inflow_node = if inflow == RETURN_POINT {
            node_return
        } else {
            node_supply
        };
        Ok(vec![
            self.core.internal_continuity_row(),
            self.supply_row(),
            self.thermal_row(),
            self.core.press_to_node_row(RETURN_POINT, node_return),
            self.core.press_to_node_row(SUPPLY_POINT, node_supply),
            self.core.thermal_to_node_row(inflow, inflow_node),
        ])
    }
}
