//! Public scoring API around the inliner.
//!
//! - Analysis types for constraint matches, indictments and score explanation
//! - Runtime weight override configuration

pub mod analysis;
pub mod weight_overrides;



pub use analysis::{
    ConstraintAnalysis, ConstraintMatch, ConstraintMatchTotal, EntityRef, Indictment, MatchId,
    ScoreExplanation,
};
pub use weight_overrides::ConstraintWeightOverrides;
