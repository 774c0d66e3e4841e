//! ScoreForge - Incremental constraint scoring in Rust
//!
//! Tuples carry matches through a constraint network; leaf scorers apply
//! weighted impacts to a score ledger that undoes them in O(1).
//!
//! # Example
//!
//! ```rust
//! use scoreforge::prelude::*;
//!
//! let room = ConstraintRef::new("timetabling", "Room conflict");
//! let mut session = ScoreSession::new(
//!     HardSoftScore::ZERO,
//!     [(room.clone(), HardSoftScore::of_hard(1))],
//!     &SessionConfig::default(),
//! )
//! .unwrap();
//!
//! let scorer = Scorer::new(
//!     session.build_impacter(&room).unwrap(),
//!     ImpactType::Penalty,
//!     0,
//!     |_: &BiTuple<usize, usize, UndoHandle<HardSoftScore>>| 1,
//! );
//! let mut pairs = session.new_arena();
//! pairs.insert(BiTuple::new(0, 1, 1));
//! pairs.propagate(&mut scorer.sink(session.inliner_mut())).unwrap();
//!
//! assert_eq!(session.calculate_score(), HardSoftScore::of(-1, 0));
//! ```

// Score types
pub use scoreforge_core::score::{
    BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore,
    Score, ScoreLevel, SimpleScore,
};
pub use scoreforge_core::{ConstraintRef, ImpactType, ScoreError};

// Configuration
pub use scoreforge_config::{ConfigError, EnvironmentMode, SessionConfig};

// Tuples and propagation
pub use scoreforge_scoring::{
    BiTuple, PropagationError, PropagationStats, QuadTuple, Scorer, TriTuple, Tuple, TupleArena,
    TupleError, TupleId, TupleSink, TupleState, TupleStore, UniTuple, UndoSlot,
};

// Score ledger and analysis
pub use scoreforge_scoring::{
    ConstraintAnalysis, ConstraintMatchTotal, ConstraintWeightOverrides, EntityRef, Indictment,
    InlinerError, ScoreExplanation, ScoreInliner, ScoreSession, SessionError, UndoHandle,
    WeightedImpacter,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore,
        Score, SimpleScore,
    };
    pub use super::{BiTuple, QuadTuple, TriTuple, Tuple, TupleArena, TupleSink, UniTuple};
    pub use super::{ConstraintRef, ImpactType, Scorer, ScoreSession, SessionConfig, UndoHandle};
}
