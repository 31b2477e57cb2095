//! Error types for solver operations.

use hn_network::NetworkError;
use thiserror::Error;

/// Errors that can occur while solving a network.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Network is not fully connected")]
    NotConnected,

    #[error("Assembled {rows} equations for {unknowns} unknowns")]
    SystemShapeMismatch { rows: usize, unknowns: usize },

    #[error("Equation references unknown index {index} outside the global vector (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Assembled system is singular")]
    SingularMatrix,

    #[error("Non-finite solution component at index {index}")]
    NonFinite { index: usize },

    /// The iteration cap was hit before the iterate settled. Carries the
    /// last iterate so the caller can inspect or accept it.
    #[error("No convergence after {iterations} iterations (last max step {delta:.3e})")]
    NotConverged {
        iterations: usize,
        delta: f64,
        last: Vec<f64>,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_converged_display_mentions_iterations() {
        let err = SolverError::NotConverged {
            iterations: 7,
            delta: 0.5,
            last: vec![0.0],
        };
        assert!(err.to_string().contains('7'));
    }
}
