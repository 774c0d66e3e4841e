//! Error types for tuples, the score inliner and propagation.

use scoreforge_config::ConfigError;
use scoreforge_core::ConstraintRef;
use thiserror::Error;

use crate::node::TupleId;
use crate::tuple::TupleState;

/// A store slot was accessed outside the tuple's store size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TupleError {
    #[error("store index ({index}) is out of range for a tuple with store size ({store_size})")]
    IndexOutOfRange { index: usize, store_size: usize },
}

/// Errors raised while building a score inliner or its impacters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InlinerError {
    #[error("The constraint ({0}) has no configured weight")]
    UnknownConstraint(ConstraintRef),

    #[error("The constraint weight cannot be zero, constraint ({0}) should have been culled during node creation")]
    ZeroWeight(ConstraintRef),

    #[error("The weight ({weight}) of constraint ({constraint}) does not match the score shape ({zero})")]
    IncompatibleWeight {
        constraint: ConstraintRef,
        weight: String,
        zero: String,
    },

    #[error("The weight ({weight}) of constraint ({constraint}) must have an init score of 0")]
    UninitializedWeight {
        constraint: ConstraintRef,
        weight: String,
    },

    #[error("Constraint match tracking is disabled for this inliner")]
    MatchTrackingDisabled,
}

/// A tuple reached the propagation queue in a state its operation cannot handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    #[error("The tuple ({tuple}) is in an unexpected state ({state}) for operation ({operation})")]
    UnexpectedState {
        tuple: TupleId,
        state: TupleState,
        operation: &'static str,
    },

    #[error("The tuple ({0}) does not exist in this arena")]
    UnknownTuple(TupleId),
}

/// Errors raised while building a score session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Inliner(#[from] InlinerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
