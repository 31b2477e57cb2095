//! Water property table with linear interpolation.
//!
//! Liquid water at typical district heating pressures, tabulated from
//! 0 degC to 200 degC in 10 K steps. Specific internal energy is the
//! cumulative trapezoid integral of the heat capacity, zero at 273.15 K,
//! so `internal_energy` and `temperature` are exact inverses on the
//! table range.

use std::sync::LazyLock;

use crate::error::{FluidError, FluidResult};
use hn_core::Temperature;

/// Specific internal energy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecInternalEnergy = f64;

/// Table temperatures [K], 273.15..=473.15 in 10 K steps.
const TABLE_TEMPERATURE: [f64; 21] = [
    273.15, 283.15, 293.15, 303.15, 313.15, 323.15, 333.15, 343.15, 353.15, 363.15, 373.15,
    383.15, 393.15, 403.15, 413.15, 423.15, 433.15, 443.15, 453.15, 463.15, 473.15,
];

/// Density [kg/m3].
const TABLE_DENSITY: [f64; 21] = [
    999.8, 999.7, 998.2, 995.7, 992.2, 988.0, 983.2, 977.8, 971.8, 965.3, 958.4, 951.0, 943.1,
    934.8, 926.1, 917.0, 907.4, 897.3, 886.9, 876.0, 864.7,
];

/// Kinematic viscosity [m2/s].
const TABLE_KINEMATIC_VISCOSITY: [f64; 21] = [
    1.792e-6, 1.307e-6, 1.004e-6, 0.801e-6, 0.658e-6, 0.553e-6, 0.475e-6, 0.413e-6, 0.365e-6,
    0.326e-6, 0.294e-6, 0.268e-6, 0.246e-6, 0.228e-6, 0.212e-6, 0.199e-6, 0.188e-6, 0.178e-6,
    0.169e-6, 0.162e-6, 0.155e-6,
];

/// Specific heat capacity [J/(kg K)].
const TABLE_HEAT_CAPACITY: [f64; 21] = [
    4219.0, 4195.0, 4184.0, 4180.0, 4179.0, 4181.0, 4184.0, 4190.0, 4196.0, 4205.0, 4216.0,
    4229.0, 4245.0, 4263.0, 4285.0, 4310.0, 4339.0, 4371.0, 4408.0, 4449.0, 4497.0,
];

/// Specific internal energy [J/kg], trapezoid integral of the heat
/// capacity column, zero at 273.15 K.
const TABLE_INTERNAL_ENERGY: [f64; 21] = [
    0.0, 42_070.0, 83_965.0, 125_785.0, 167_580.0, 209_380.0, 251_205.0, 293_075.0, 335_005.0,
    377_010.0, 419_115.0, 461_340.0, 503_710.0, 546_250.0, 588_990.0, 631_965.0, 675_210.0,
    718_760.0, 762_655.0, 806_940.0, 851_670.0,
];

/// Table-driven property lookup for the working fluid.
#[derive(Debug, Clone)]
pub struct FluidProperties {
    temperature: &'static [f64],
    density: &'static [f64],
    kinematic_viscosity: &'static [f64],
    heat_capacity: &'static [f64],
    internal_energy: &'static [f64],
}

impl FluidProperties {
    /// Build the water table, checking the internal-energy column is
    /// strictly increasing (the inverse lookup relies on it).
    pub fn water_table() -> FluidResult<Self> {
        let props = Self {
            temperature: &TABLE_TEMPERATURE,
            density: &TABLE_DENSITY,
            kinematic_viscosity: &TABLE_KINEMATIC_VISCOSITY,
            heat_capacity: &TABLE_HEAT_CAPACITY,
            internal_energy: &TABLE_INTERNAL_ENERGY,
        };
        if props.internal_energy.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FluidError::InvalidTable {
                what: "internal energy column must be strictly increasing",
            });
        }
        Ok(props)
    }

    /// Density [kg/m3] at temperature [K].
    pub fn density(&self, t_k: f64) -> f64 {
        interpolate(self.temperature, self.density, t_k)
    }

    /// Kinematic viscosity [m2/s] at temperature [K].
    pub fn kinematic_viscosity(&self, t_k: f64) -> f64 {
        interpolate(self.temperature, self.kinematic_viscosity, t_k)
    }

    /// Specific heat capacity [J/(kg K)] at temperature [K].
    pub fn heat_capacity(&self, t_k: f64) -> f64 {
        interpolate(self.temperature, self.heat_capacity, t_k)
    }

    /// Specific internal energy [J/kg] at temperature [K].
    pub fn internal_energy(&self, t_k: f64) -> SpecInternalEnergy {
        interpolate(self.temperature, self.internal_energy, t_k)
    }

    /// Temperature [K] for a specific internal energy [J/kg].
    pub fn temperature(&self, ie: SpecInternalEnergy) -> f64 {
        interpolate(self.internal_energy, self.temperature, ie)
    }

    /// Convenience: internal energy from a uom temperature.
    pub fn internal_energy_at(&self, t: Temperature) -> SpecInternalEnergy {
        self.internal_energy(t.value)
    }
}

/// Clamped linear interpolation of `ys` over strictly increasing `xs`.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if x >= xs[last] {
        return ys[last];
    }
    let hi = xs.partition_point(|&knot| knot < x).max(1);
    let lo = hi - 1;
    let frac = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + frac * (ys[hi] - ys[lo])
}

static WATER: LazyLock<FluidProperties> =
    LazyLock::new(|| FluidProperties::water_table().expect("water property table is valid"));

/// Process-wide water property table.
pub fn water() -> &'static FluidProperties {
    &WATER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knot_values_exact() {
        let props = water();
        assert_eq!(props.density(293.15), 998.2);
        assert_eq!(props.kinematic_viscosity(293.15), 1.004e-6);
        assert_eq!(props.heat_capacity(273.15), 4219.0);
        assert_eq!(props.internal_energy(273.15), 0.0);
        assert_eq!(props.internal_energy(283.15), 42_070.0);
    }

    #[test]
    fn interpolation_between_knots() {
        let props = water();
        // Midpoint of the 20..30 degC segment.
        let cp = props.heat_capacity(298.15);
        assert!((cp - 4182.0).abs() < 1e-9);
        let rho = props.density(298.15);
        assert!((rho - 996.95).abs() < 1e-9);
    }

    #[test]
    fn clamped_outside_range() {
        let props = water();
        assert_eq!(props.density(200.0), props.density(273.15));
        assert_eq!(props.density(600.0), props.density(473.15));
        assert_eq!(props.temperature(-1.0e4), 273.15);
    }

    #[test]
    fn temperature_inverts_internal_energy() {
        let props = water();
        for t in [273.15, 291.0, 330.0, 364.2, 473.15] {
            let ie = props.internal_energy(t);
            assert!((props.temperature(ie) - t).abs() < 1e-9);
        }
    }

    #[test]
    fn internal_energy_monotone() {
        let props = water();
        let mut prev = f64::NEG_INFINITY;
        for t in 0..=200 {
            let ie = props.internal_energy(273.15 + t as f64);
            assert!(ie > prev || (t == 0 && ie == 0.0));
            prev = ie;
        }
    }

    proptest::proptest! {
        #[test]
        fn prop_temperature_roundtrip(t in 273.15f64..473.15) {
            let props = water();
            let ie = props.internal_energy(t);
            proptest::prop_assert!((props.temperature(ie) - t).abs() < 1e-6);
        }
    }
}
