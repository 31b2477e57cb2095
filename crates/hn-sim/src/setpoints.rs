//! Per-timestep boundary and source inputs.

use tracing::warn;

use crate::error::SimResult;
use hn_core::{AssetId, MassRate, Power, Pressure, Temperature};
use hn_network::{AssetVariant, Network};

/// Setpoints pushed into one asset before a timestep is solved.
///
/// Which fields apply depends on the asset variant; inapplicable fields
/// are ignored with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct Setpoints {
    /// Prescribed pressure (boundaries, pressure-controlled production).
    pub pressure: Option<Pressure>,
    /// Feed temperature (boundaries) or supply temperature (production).
    pub temperature: Option<Temperature>,
    /// Prescribed mass flow rate (production).
    pub mass_flow_rate: Option<MassRate>,
    /// Heat flux into the fluid, negative for consumers (fall assets).
    pub heat_flux: Option<Power>,
}

/// Apply one asset's setpoints, dispatching on its variant.
pub fn apply_setpoints(network: &mut Network, id: AssetId, setpoints: &Setpoints) -> SimResult<()> {
    match network.asset_mut(id)? {
        AssetVariant::Boundary(boundary) => {
            if let Some(pressure) = setpoints.pressure {
                boundary.set_pressure(pressure);
            }
            if let Some(temperature) = setpoints.temperature {
                boundary.set_temperature(temperature);
            }
            if setpoints.mass_flow_rate.is_some() || setpoints.heat_flux.is_some() {
                warn!(asset = %id, "mass flow / heat flux setpoints ignored for boundary");
            }
        }
        AssetVariant::Production(production) => {
            if let Some(pressure) = setpoints.pressure {
                production.set_pressure(pressure);
            }
            if let Some(temperature) = setpoints.temperature {
                production.set_supply_temperature(temperature);
            }
            if let Some(mass_flow) = setpoints.mass_flow_rate {
                production.set_mass_flow_rate(mass_flow)?;
            }
            if setpoints.heat_flux.is_some() {
                warn!(asset = %id, "heat flux setpoint ignored for production");
            }
        }
        AssetVariant::Fall(fall) => {
            if let Some(heat_flux) = setpoints.heat_flux {
                fall.set_heat_flux(heat_flux);
            }
            if setpoints.pressure.is_some()
                || setpoints.temperature.is_some()
                || setpoints.mass_flow_rate.is_some()
            {
                warn!(asset = %id, "only heat flux setpoints apply to fall assets");
            }
        }
        AssetVariant::Pipe(_) => {
            warn!(asset = %id, "pipes take no setpoints");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::{kgps, pa};
    use hn_network::{AssetKind, NetworkError};

    #[test]
    fn applies_to_matching_variant() {
        let mut network = Network::new();
        let production = network.add_asset(AssetKind::Production, None).unwrap();
        let setpoints = Setpoints {
            mass_flow_rate: Some(kgps(3.5)),
            ..Setpoints::default()
        };
        apply_setpoints(&mut network, production, &setpoints).unwrap();
        match network.asset(production).unwrap() {
            AssetVariant::Production(p) => assert_eq!(p.mass_flow_rate_set(), 3.5),
            _ => unreachable!(),
        }
    }

    #[test]
    fn negative_mass_flow_is_a_sim_error() {
        let mut network = Network::new();
        let production = network.add_asset(AssetKind::Production, None).unwrap();
        let setpoints = Setpoints {
            mass_flow_rate: Some(kgps(-1.0)),
            ..Setpoints::default()
        };
        let err = apply_setpoints(&mut network, production, &setpoints).unwrap_err();
        assert!(matches!(
            err,
            crate::SimError::Network(NetworkError::NonPhysical { .. })
        ));
    }

    #[test]
    fn unknown_target_is_reported() {
        let mut network = Network::new();
        let ghost = hn_core::EntityId::new_random();
        let setpoints = Setpoints {
            pressure: Some(pa(1.0e5)),
            ..Setpoints::default()
        };
        assert!(apply_setpoints(&mut network, ghost, &setpoints).is_err());
    }
}
