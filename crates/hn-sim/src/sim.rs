//! The outer (temporal) loop.

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::record::StepRecord;
use crate::setpoints::{Setpoints, apply_setpoints};
use hn_core::AssetId;
use hn_network::Network;
use hn_solver::Solver;

/// Options for a simulation run. Times in seconds.
#[derive(Clone, Copy, Debug)]
pub struct SimOptions {
    pub start: f64,
    pub stop: f64,
    pub timestep: f64,
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.timestep > 0.0) {
            return Err(SimError::InvalidOptions {
                what: "timestep must be positive",
            });
        }
        if self.stop < self.start {
            return Err(SimError::InvalidOptions {
                what: "stop must not precede start",
            });
        }
        Ok(())
    }
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 3600.0,
            timestep: 3600.0,
        }
    }
}

/// Run the network through `[start, stop)` in fixed steps.
///
/// The controller callback supplies per-asset setpoints for each step;
/// each solve warm-starts from the previous step's converged state, so
/// the outer loop is strictly sequential. A failed step aborts the run
/// with the step time attached; records up to that step are lost with it.
pub fn run_simulation<C>(
    network: &mut Network,
    solver: &mut Solver,
    options: &SimOptions,
    mut controller: C,
) -> SimResult<Vec<StepRecord>>
where
    C: FnMut(f64) -> Vec<(AssetId, Setpoints)>,
{
    options.validate()?;
    let mut records = Vec::new();
    let mut time = options.start;
    while time < options.stop {
        for (id, setpoints) in controller(time) {
            apply_setpoints(network, id, &setpoints)?;
        }
        let solution = solver
            .solve(network)
            .map_err(|source| SimError::Step { time, source })?;
        debug!(time, iterations = solution.iterations, "timestep solved");
        records.push(StepRecord::capture(network, time, solution.iterations));
        time += options.timestep;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_validation() {
        assert!(SimOptions::default().validate().is_ok());
        let bad_step = SimOptions {
            timestep: 0.0,
            ..SimOptions::default()
        };
        assert!(matches!(
            bad_step.validate(),
            Err(SimError::InvalidOptions { .. })
        ));
        let bad_range = SimOptions {
            start: 10.0,
            stop: 0.0,
            timestep: 1.0,
        };
        assert!(bad_range.validate().is_err());
    }
}
