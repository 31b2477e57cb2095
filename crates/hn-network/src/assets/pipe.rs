//! Pipe segment: wall friction and advective heat transport.

use std::f64::consts::PI;

use crate::assets::base::AssetCore;
use crate::defaults::{
    DEFAULT_ALPHA_VALUE, DEFAULT_EXTERNAL_TEMPERATURE, DEFAULT_GRID_SIZE, DEFAULT_PIPE_DIAMETER,
    DEFAULT_PIPE_LENGTH, DEFAULT_PIPE_ROUGHNESS, FLOW_EPS,
};
use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, PRESSURE};
use crate::error::NetworkResult;
use crate::network::Network;
use hn_core::{AssetId, Length, Temperature};
use hn_fluids::water;

/// Reynolds number below which the friction factor saturates at 0.64.
const RE_LAMINAR_FLOOR: f64 = 100.0;
/// Upper bound of the pure laminar regime.
const RE_LAMINAR: f64 = 2000.0;
/// Lower bound of the fully turbulent regime.
const RE_TURBULENT: f64 = 4000.0;

/// A pipe segment between two connection points.
///
/// Per solver iteration the pipe refreshes its friction factor and its
/// discretized heat-transport state from the previous iterate; the
/// momentum and thermal rows it contributes are linear in the unknowns
/// with those closures frozen.
#[derive(Debug, Clone)]
pub struct SolverPipe {
    core: AssetCore,
    /// Pipe length [m].
    pub length: f64,
    /// Inner diameter [m].
    pub diameter: f64,
    /// Wall roughness [m].
    pub roughness: f64,
    /// Heat loss coefficient to the surroundings [W/(m2 K)].
    pub alpha_value: f64,
    /// Temperature of the surroundings [K].
    pub external_temperature: f64,
    grid_size: usize,
    lambda_loss: f64,
    heat_supplied: f64,
    /// Interface internal energies in geometric order (index 0 at
    /// connection point 0), `grid_size + 1` entries.
    internal_energy_grid: Vec<f64>,
}

impl SolverPipe {
    pub fn new(id: AssetId) -> Self {
        Self {
            core: AssetCore::new(id, 2),
            length: DEFAULT_PIPE_LENGTH,
            diameter: DEFAULT_PIPE_DIAMETER,
            roughness: DEFAULT_PIPE_ROUGHNESS,
            alpha_value: DEFAULT_ALPHA_VALUE,
            external_temperature: DEFAULT_EXTERNAL_TEMPERATURE,
            grid_size: DEFAULT_GRID_SIZE,
            lambda_loss: 0.0,
            heat_supplied: 0.0,
            internal_energy_grid: Vec::new(),
        }
    }

    pub fn core(&self) -> &AssetCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut AssetCore {
        &mut self.core
    }

    pub fn set_geometry(&mut self, length: Length, diameter: Length, roughness: Length) {
        self.length = length.value;
        self.diameter = diameter.value;
        self.roughness = roughness.value;
    }

    /// Heat loss coefficient [W/(m2 K)] and surroundings temperature.
    pub fn set_heat_loss(&mut self, alpha_value: f64, external_temperature: Temperature) {
        self.alpha_value = alpha_value;
        self.external_temperature = external_temperature.value;
    }

    pub fn set_grid_size(&mut self, cells: usize) {
        self.grid_size = cells.max(1);
    }

    /// Cross-sectional area [m2].
    pub fn area(&self) -> f64 {
        PI * self.diameter * self.diameter / 4.0
    }

    pub fn lambda_loss(&self) -> f64 {
        self.lambda_loss
    }

    /// Net heat exchanged with the surroundings [W]; negative when the
    /// pipe is a net heat sink.
    pub fn heat_supplied(&self) -> f64 {
        self.heat_supplied
    }

    pub fn internal_energy_grid(&self) -> &[f64] {
        &self.internal_energy_grid
    }

    fn upwind_temperature(&self) -> f64 {
        let point = self.core.inflow_point();
        water().temperature(self.core.prev(point, INTERNAL_ENERGY))
    }

    /// Reynolds number from the previous iterate, using upwind fluid
    /// properties.
    pub fn reynolds_number(&self) -> f64 {
        let props = water();
        let temperature = self.upwind_temperature();
        let density = props.density(temperature);
        let viscosity = props.kinematic_viscosity(temperature);
        let velocity = self.core.prev(0, DISCHARGE) / (density * self.area());
        (velocity * self.diameter / viscosity).abs()
    }

    /// Refresh the Darcy friction factor from the previous iterate.
    pub fn update_loss_coefficient(&mut self) {
        self.lambda_loss = self.friction_factor(self.reynolds_number());
    }

    fn friction_factor(&self, reynolds: f64) -> f64 {
        if reynolds <= RE_LAMINAR_FLOOR {
            0.64
        } else if reynolds < RE_LAMINAR {
            64.0 / reynolds
        } else if reynolds < RE_TURBULENT {
            // Blend the laminar value at the regime boundary into the
            // turbulent correlation at the actual Reynolds number;
            // continuous at both ends of the transition band.
            let weight = (reynolds - RE_LAMINAR) / (RE_TURBULENT - RE_LAMINAR);
            (1.0 - weight) * (64.0 / RE_LAMINAR) + weight * self.turbulent_factor(reynolds)
        } else {
            self.turbulent_factor(reynolds)
        }
    }

    /// Colebrook-White friction factor by fixed-point iteration.
    fn turbulent_factor(&self, reynolds: f64) -> f64 {
        let relative_roughness = self.roughness / (3.7 * self.diameter);
        let mut lambda: f64 = 0.02;
        for _ in 0..100 {
            let inv_sqrt = -2.0 * (relative_roughness + 2.51 / (reynolds * lambda.sqrt())).log10();
            let next = 1.0 / (inv_sqrt * inv_sqrt);
            if (next - lambda).abs() < 1e-12 {
                return next;
            }
            lambda = next;
        }
        lambda
    }

    /// Momentum balance linearized around the previous discharge:
    /// p0 - p1 = C * q * |q| with C = lambda * L / (2 d rho A^2).
    fn momentum_row(&self) -> EquationRow {
        let props = water();
        let temperature = self.upwind_temperature();
        let density = props.density(temperature);
        let area = self.area();
        let discharge = self.core.prev(0, DISCHARGE);
        let c = self.lambda_loss * self.length / (2.0 * self.diameter * density * area * area);
        EquationRow::new(
            vec![
                self.core.unknown_index(0, PRESSURE),
                self.core.unknown_index(1, PRESSURE),
                self.core.unknown_index(0, DISCHARGE),
            ],
            vec![1.0, -1.0, -2.0 * c * discharge.abs()],
            -c * discharge * discharge.abs(),
        )
    }

    /// Advect internal energy through the discretized pipe (upwind,
    /// implicit per cell) and refresh `heat_supplied` and the exit state.
    pub fn update_heat_transport(&mut self) {
        let props = water();
        let cells = self.grid_size;
        let discharge = self.core.prev(0, DISCHARGE);
        let ambient_ie = props.internal_energy(self.external_temperature);

        if discharge.abs() < FLOW_EPS {
            // stagnant fluid relaxes to the surroundings
            self.internal_energy_grid.clear();
            self.internal_energy_grid.resize(cells + 1, ambient_ie);
            self.heat_supplied = 0.0;
            return;
        }

        let mass_flow = discharge.abs();
        let cell_loss = self.alpha_value * PI * self.diameter * self.length / cells as f64;
        let feed_point = if discharge >= 0.0 { 0 } else { 1 };
        let feed_ie = self.core.prev(feed_point, INTERNAL_ENERGY);

        let mut interfaces = vec![feed_ie; cells + 1];
        for i in 1..=cells {
            interfaces[i] = cell_exit_energy(
                mass_flow,
                cell_loss,
                interfaces[i - 1],
                self.external_temperature,
            );
        }
        self.heat_supplied = mass_flow * (interfaces[cells] - feed_ie);

        // store in geometric order: index 0 sits at connection point 0
        if discharge >= 0.0 {
            self.internal_energy_grid = interfaces;
        } else {
            interfaces.reverse();
            self.internal_energy_grid = interfaces;
        }
    }

    /// Exit internal energy prescribed at the downstream connection point.
    fn thermal_row(&self) -> EquationRow {
        let outflow = self.core.outflow_point();
        let exit_ie = if self.internal_energy_grid.is_empty() {
            // no transport pass has run yet
            water().internal_energy(self.external_temperature)
        } else if outflow == 0 {
            self.internal_energy_grid[0]
        } else {
            self.internal_energy_grid[self.internal_energy_grid.len() - 1]
        };
        EquationRow::prescribe(self.core.unknown_index(outflow, INTERNAL_ENERGY), exit_ie)
    }

    /// Per-iteration refresh of the friction and heat-transport closures.
    pub(crate) fn update(&mut self) {
        self.update_loss_coefficient();
        self.update_heat_transport();
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

/// Exit internal energy of one grid cell, from the implicit balance
/// mdot * (ie_out - ie_in) + loss * (T(ie_out) - t_ext) = 0.
fn cell_exit_energy(mass_flow: f64, loss: f64, ie_in: f64, t_ext: f64) -> f64 {
    let props = water();
    if loss == 0.0 {
        return ie_in;
    }
    let mut ie = ie_in;
    for _ in 0..50 {
        let temperature = props.temperature(ie);
        let residual = mass_flow * (ie - ie_in) + loss * (temperature - t_ext);
        let slope = mass_flow + loss / props.heat_capacity(temperature);
        let step = residual / slope;
        ie -= step;
        if step.abs() <= 1e-9 * ie.abs().max(1.0) {
            break;
        }
    }
    ie
}
