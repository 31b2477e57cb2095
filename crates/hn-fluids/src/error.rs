//! Error types for fluid property lookups.

use hn_core::HnError;
use thiserror::Error;

/// Errors that can occur while building or querying a property table.
#[derive(Error, Debug, Clone)]
pub enum FluidError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Property table invalid: {what}")]
    InvalidTable { what: &'static str },
}

pub type FluidResult<T> = Result<T, FluidError>;

impl From<FluidError> for HnError {
    fn from(e: FluidError) -> Self {
        match e {
            FluidError::NonPhysical { what } => HnError::InvalidArg { what },
            FluidError::InvalidTable { what } => HnError::Invariant { what },
        }
    }
}
