//! ScoreForge Core - Score types and constraint identity
//!
//! This crate provides the value types shared by every ScoreForge crate:
//! - Score types for representing solution quality (hard/soft, bendable, ...)
//! - Textual score parsing and formatting
//! - Constraint identification and impact direction

pub mod constraint;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use error::ScoreError;
pub use score::{
    BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore, Score,
    ScoreLevel, SimpleScore,
};
