//! Network construction and access errors.

use hn_core::{EntityId, HnError};
use thiserror::Error;

/// Errors raised while building or querying the entity graph.
///
/// These are structural: the topology must be fixed before a solve is
/// attempted, so none of them are recoverable by retrying the same call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Asset kind '{kind}' is not registered")]
    UnknownKind { kind: String },

    #[error("Entity {id} already exists in the network")]
    DuplicateEntity { id: EntityId },

    #[error("No entity with id {id} in the network")]
    MissingEntity { id: EntityId },

    #[error("Connection point {point} of asset {id} is out of range ({points} points)")]
    ConnectionPointOob {
        id: EntityId,
        point: usize,
        points: usize,
    },

    #[error("Connection points of {a} and {b} are already bound to nodes; merging nodes is not supported")]
    AlreadyConnected { a: EntityId, b: EntityId },

    #[error("Connection point {point} of asset {id} is not connected to a node")]
    PointNotConnected { id: EntityId, point: usize },

    #[error("Matrix indices have not been assigned")]
    IndicesNotAssigned,

    #[error("Solution vector has length {got}, expected {expected}")]
    SolutionSizeMismatch { expected: usize, got: usize },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl From<NetworkError> for HnError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::UnknownKind { .. } => HnError::InvalidArg { what: "asset kind" },
            NetworkError::DuplicateEntity { .. } => HnError::InvalidArg { what: "duplicate id" },
            NetworkError::MissingEntity { .. } => HnError::InvalidArg { what: "missing id" },
            NetworkError::ConnectionPointOob { .. } => HnError::InvalidArg {
                what: "connection point",
            },
            NetworkError::AlreadyConnected { .. } => HnError::Invariant {
                what: "connection points already bound",
            },
            NetworkError::PointNotConnected { .. } => HnError::Invariant {
                what: "connection point not bound",
            },
            NetworkError::IndicesNotAssigned => HnError::Invariant {
                what: "indices not assigned",
            },
            NetworkError::SolutionSizeMismatch { .. } => HnError::Invariant {
                what: "solution size mismatch",
            },
            NetworkError::NonPhysical { what } => HnError::InvalidArg { what },
        }
    }
}
