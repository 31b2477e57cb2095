//! Iterative network solver.
//!
//! Each iteration collects every entity's linearized [`hn_network::EquationRow`]s
//! (built against the previous iterate), assembles the global system,
//! solves it, and scatters the result back into the network. The loop
//! repeats until the iterate stops moving or the iteration cap is hit.

pub mod assemble;
pub mod error;
pub mod solver;

pub use assemble::assemble;
pub use error::{SolverError, SolverResult};
pub use solver::{NetworkSolution, SolvePhase, Solver, SolverConfig};
