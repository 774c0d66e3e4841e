//! Tuple lifecycle states.

use std::fmt;

/// Where a tuple stands in the current propagation pass.
///
/// | state    | dirty | active |
/// |----------|-------|--------|
/// | Creating | yes   | yes    |
/// | Updating | yes   | yes    |
/// | Ok       | no    | yes    |
/// | Dying    | yes   | no     |
/// | Dead     | no    | no     |
/// | Aborting | yes   | no     |
///
/// Tuples never reject a state assignment. The propagation network owns the
/// legal transition graph, available through [`can_transition_to`](Self::can_transition_to)
/// for validation in assert modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleState {
    /// Newly produced, not yet propagated downstream.
    Creating,
    /// Content changed, not yet re-propagated.
    Updating,
    /// Propagated and current.
    Ok,
    /// Retracted after being propagated; downstream must retract it.
    Dying,
    /// Retracted and fully propagated; ready for disposal.
    Dead,
    /// Retracted before ever being propagated; downstream never saw it.
    Aborting,
}

impl TupleState {
    /// Returns true if the tuple is waiting in a propagation queue.
    #[inline]
    pub const fn is_dirty(self) -> bool {
        matches!(
            self,
            TupleState::Creating | TupleState::Updating | TupleState::Dying | TupleState::Aborting
        )
    }

    /// Returns true if the tuple contributes to downstream output.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            TupleState::Creating | TupleState::Updating | TupleState::Ok
        )
    }

    /// Returns true if `next` is a legal successor of this state.
    pub const fn can_transition_to(self, next: TupleState) -> bool {
        matches!(
            (self, next),
            (TupleState::Creating, TupleState::Ok)
                | (TupleState::Creating, TupleState::Aborting)
                | (TupleState::Ok, TupleState::Updating)
                | (TupleState::Ok, TupleState::Dying)
                | (TupleState::Updating, TupleState::Ok)
                | (TupleState::Updating, TupleState::Dying)
                | (TupleState::Dying, TupleState::Dead)
                | (TupleState::Aborting, TupleState::Dead)
        )
    }

    /// Returns the upper-case name of this state.
    pub const fn name(self) -> &'static str {
        match self {
            TupleState::Creating => "CREATING",
            TupleState::Updating => "UPDATING",
            TupleState::Ok => "OK",
            TupleState::Dying => "DYING",
            TupleState::Dead => "DEAD",
            TupleState::Aborting => "ABORTING",
        }
    }
}

impl fmt::Display for TupleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
