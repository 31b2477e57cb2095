//! Successive-linearization solve loop.

use tracing::debug;

use crate::assemble::assemble;
use crate::error::{SolverError, SolverResult};
use hn_core::{Tolerances, within_tolerance};
use hn_network::Network;

/// Solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Maximum solver iterations per solve.
    pub max_iterations: usize,
    /// Per-entry tolerance on the change of the iterate.
    pub tolerance: Tolerances,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: Tolerances::default(),
        }
    }
}

/// Where a solve currently stands (or how it ended).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SolvePhase {
    #[default]
    Building,
    Assembling,
    Solving,
    Converged,
    MaxIterationsExceeded,
}

/// A converged solve: the final global vector and how it was reached.
#[derive(Clone, Debug)]
pub struct NetworkSolution {
    /// The converged global unknown vector.
    pub x: Vec<f64>,
    /// Iterations used.
    pub iterations: usize,
    /// Largest per-entry change of the final iteration.
    pub delta: f64,
}

/// Drives a [`Network`] to a self-consistent state.
///
/// The network is borrowed exclusively for the duration of a solve; the
/// last successfully scattered iterate stays in the entities whether the
/// solve converges or not.
#[derive(Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    phase: SolvePhase,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            phase: SolvePhase::Building,
        }
    }

    pub fn phase(&self) -> SolvePhase {
        self.phase
    }

    pub fn solve(&mut self, network: &mut Network) -> SolverResult<NetworkSolution> {
        self.phase = SolvePhase::Building;
        if !network.check_connectivity() {
            return Err(SolverError::NotConnected);
        }
        let unknowns = network.assign_indices();
        let mut previous = network.gather_solution()?;
        let mut delta = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            self.phase = SolvePhase::Assembling;
            network.prepare_iteration();
            let rows = network.equations()?;
            let (a, b) = assemble(&rows, unknowns)?;

            self.phase = SolvePhase::Solving;
            let x = a.lu().solve(&b).ok_or(SolverError::SingularMatrix)?;
            for (index, value) in x.iter().enumerate() {
                if !value.is_finite() {
                    return Err(SolverError::NonFinite { index });
                }
            }

            let mut converged = true;
            delta = 0.0;
            for (new, old) in x.iter().zip(&previous) {
                let step = new - old;
                delta = delta.max(step.abs());
                if !within_tolerance(step, *new, self.config.tolerance) {
                    converged = false;
                }
            }

            let x: Vec<f64> = x.iter().copied().collect();
            network.scatter_solution(&x)?;
            debug!(iteration, delta, converged, "solver iteration");

            if converged {
                self.phase = SolvePhase::Converged;
                return Ok(NetworkSolution {
                    x,
                    iterations: iteration,
                    delta,
                });
            }
            previous = x;
        }

        self.phase = SolvePhase::MaxIterationsExceeded;
        Err(SolverError::NotConverged {
            iterations: self.config.max_iterations,
            delta,
            last: previous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_network::{AssetKind, Network};

    #[test]
    fn disconnected_network_is_rejected() {
        let mut network = Network::new();
        network.add_asset(AssetKind::Pipe, None).unwrap();
        let mut solver = Solver::default();
        assert!(matches!(
            solver.solve(&mut network),
            Err(SolverError::NotConnected)
        ));
        assert_eq!(solver.phase(), SolvePhase::Building);
    }

    #[test]
    fn default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_iterations, 50);
        assert!(config.tolerance.abs > 0.0);
    }
}
