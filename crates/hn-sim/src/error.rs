//! Error types for simulation runs.

use hn_network::NetworkError;
use hn_solver::SolverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid simulation options: {what}")]
    InvalidOptions { what: &'static str },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// A timestep failed to solve; carries the simulation time so the
    /// caller can tell where the run stopped.
    #[error("Timestep at t={time} s failed: {source}")]
    Step { time: f64, source: SolverError },
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_carries_time() {
        let err = SimError::Step {
            time: 3600.0,
            source: SolverError::NotConnected,
        };
        assert!(err.to_string().contains("3600"));
    }
}
