//! Asset variants and their equation contracts.

pub mod base;
mod boundary;
mod fall;
mod pipe;
mod production;

pub use base::AssetCore;
pub use boundary::BaseBoundary;
pub use fall::FallType;
pub use pipe::SolverPipe;
pub use production::{ProductionAsset, RETURN_POINT, SUPPLY_POINT};

use std::str::FromStr;

use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, PRESSURE};
use crate::error::{NetworkError, NetworkResult};
use crate::network::Network;
use hn_core::AssetId;
use hn_fluids::water;

/// Registry tag for constructible asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Boundary,
    Fall,
    Production,
    Pipe,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Boundary,
        AssetKind::Fall,
        AssetKind::Production,
        AssetKind::Pipe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Boundary => "Boundary",
            AssetKind::Fall => "Fall",
            AssetKind::Production => "Production",
            AssetKind::Pipe => "Pipe",
        }
    }
}

impl FromStr for AssetKind {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Boundary" => Ok(AssetKind::Boundary),
            "Fall" => Ok(AssetKind::Fall),
            "Production" => Ok(AssetKind::Production),
            "Pipe" => Ok(AssetKind::Pipe),
            other => Err(NetworkError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Closed set of asset variants making up a network.
#[derive(Debug, Clone)]
pub enum AssetVariant {
    Boundary(BaseBoundary),
    Fall(FallType),
    Production(ProductionAsset),
    Pipe(SolverPipe),
}

impl AssetVariant {
    pub fn construct(kind: AssetKind, id: AssetId) -> Self {
        match kind {
            AssetKind::Boundary => AssetVariant::Boundary(BaseBoundary::new(id)),
            AssetKind::Fall => AssetVariant::Fall(FallType::new(id)),
            AssetKind::Production => AssetVariant::Production(ProductionAsset::new(id)),
            AssetKind::Pipe => AssetVariant::Pipe(SolverPipe::new(id)),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            AssetVariant::Boundary(_) => AssetKind::Boundary,
            AssetVariant::Fall(_) => AssetKind::Fall,
            AssetVariant::Production(_) => AssetKind::Production,
            AssetVariant::Pipe(_) => AssetKind::Pipe,
        }
    }

    pub fn id(&self) -> AssetId {
        self.core().id
    }

    pub fn core(&self) -> &AssetCore {
        match self {
            AssetVariant::Boundary(a) => a.core(),
            AssetVariant::Fall(a) => a.core(),
            AssetVariant::Production(a) => a.core(),
            AssetVariant::Pipe(a) => a.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut AssetCore {
        match self {
            AssetVariant::Boundary(a) => a.core_mut(),
            AssetVariant::Fall(a) => a.core_mut(),
            AssetVariant::Production(a) => a.core_mut(),
            AssetVariant::Pipe(a) => a.core_mut(),
        }
    }

    /// Rows this asset contributes to the global system; exactly
    /// `number_of_unknowns` of them, in a fixed order per variant.
    pub fn equations(&self, net: &Network) -> NetworkResult<Vec<EquationRow>> {
        match self {
            AssetVariant::Boundary(a) => a.equations(net),
            AssetVariant::Fall(a) => a.equations(net),
            AssetVariant::Production(a) => a.equations(net),
            AssetVariant::Pipe(a) => a.equations(net),
        }
    }

    /// Per-iteration refresh of internal closure state from `prev_sol`.
    pub(crate) fn prepare(&mut self) {
        if let AssetVariant::Pipe(pipe) = self {
            pipe.update();
        }
    }

    /// Solved mass flow rate [kg/s] at a connection point.
    pub fn mass_flow_rate(&self, point: usize) -> f64 {
        self.core().prev(point, DISCHARGE)
    }

    /// Solved pressure [Pa] at a connection point.
    pub fn pressure(&self, point: usize) -> f64 {
        self.core().prev(point, PRESSURE)
    }

    /// Solved temperature [K] at a connection point.
    pub fn temperature(&self, point: usize) -> f64 {
        water().temperature(self.core().prev(point, INTERNAL_ENERGY))
    }

    /// Net heat exchanged with the surroundings [W]; pipes only.
    pub fn heat_supplied(&self) -> Option<f64> {
        match self {
            AssetVariant::Pipe(pipe) => Some(pipe.heat_supplied()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::EntityId;

    #[test]
    fn kind_round_trip() {
        for kind in AssetKind::ALL {
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = "Compressor".parse::<AssetKind>().unwrap_err();
        assert!(matches!(err, NetworkError::UnknownKind { kind } if kind == "Compressor"));
    }

    #[test]
    fn construct_matches_kind() {
        for kind in AssetKind::ALL {
            let asset = AssetVariant::construct(kind, EntityId::new_random());
            assert_eq!(asset.kind(), kind);
        }
    }

    #[test]
    fn unknown_counts_per_kind() {
        let boundary = AssetVariant::construct(AssetKind::Boundary, EntityId::new_random());
        assert_eq!(boundary.core().number_of_unknowns, 3);
        for kind in [AssetKind::Fall, AssetKind::Production, AssetKind::Pipe] {
            let asset = AssetVariant::construct(kind, EntityId::new_random());
            assert_eq!(asset.core().number_of_unknowns, 6);
        }
    }
}
