//! Tuple propagation and incremental scoring for ScoreForge.
//!
//! This crate provides the substrate a constraint network scores through:
//! - Arity-specific tuples (`UniTuple` .. `QuadTuple`) with per-node store slots
//! - The six-state tuple lifecycle and the propagation queue (`TupleArena`)
//! - The incremental score ledger (`ScoreInliner`) with O(1) undo
//! - Constraint match tracking, indictments and score explanation
//! - Evaluation sessions built from a `SessionConfig`
//!
//! # Architecture
//!
//! Everything is monomorphized: tuples are generic over their facts and
//! store value, sinks and scorers over their closures. A session owns its
//! ledger and is driven by one thread; parallel searches build one session
//! each.

// Scorers carry their closures as generic parameters
#![allow(clippy::type_complexity)]

pub mod api;
pub mod error;
pub mod inliner;
pub mod node;
pub mod session;
pub mod tuple;

#[cfg(test)]
mod session_tests;

// ============================================================================
// Tuples
// ============================================================================

pub use tuple::{BiTuple, QuadTuple, TriTuple, Tuple, TupleState, TupleStore, UniTuple};

// ============================================================================
// Propagation
// ============================================================================

pub use node::{PropagationStats, Scorer, ScorerSink, TupleArena, TupleId, TupleSink, UndoSlot};

// ============================================================================
// Score Ledger
// ============================================================================

pub use inliner::{ScoreInliner, UndoHandle, WeightedImpacter};
pub use session::ScoreSession;

// ============================================================================
// Analysis and Weights
// ============================================================================

pub use api::analysis::{
    ConstraintAnalysis, ConstraintMatch, ConstraintMatchTotal, EntityRef, Indictment, MatchId,
    ScoreExplanation,
};
pub use api::weight_overrides::ConstraintWeightOverrides;

pub use error::{InlinerError, PropagationError, SessionError, TupleError};
