//! Core constraint types.
//!
//! Constraint identity and impact direction, shared by the score inliner
//! and the configuration layer.

use std::fmt;

/// Reference to a constraint for identification.
///
/// The full name (`package/name`) is the constraint id used by weight
/// tables and configuration files.
///
/// # Example
///
/// ```
/// use scoreforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("scheduling", "NoOverlap");
/// assert_eq!(cr.full_name(), "scheduling/NoOverlap");
///
/// let simple = ConstraintRef::new("", "Simple");
/// assert_eq!(simple.full_name(), "Simple");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Splits a full name on its last `/` into package and name.
    ///
    /// ```
    /// use scoreforge_core::ConstraintRef;
    ///
    /// let cr = ConstraintRef::from_full_name("school/timetabling/Room conflict");
    /// assert_eq!(cr.package, "school/timetabling");
    /// assert_eq!(cr.name, "Room conflict");
    /// ```
    pub fn from_full_name(full_name: &str) -> Self {
        match full_name.rsplit_once('/') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", full_name),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.package, self.name)
        }
    }
}

/// Type of impact a constraint has on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Penalize (subtract from score).
    Penalty,
    /// Reward (add to score).
    Reward,
}

impl ImpactType {
    /// Applies this impact direction to a match weight.
    ///
    /// ```
    /// use scoreforge_core::ImpactType;
    ///
    /// assert_eq!(ImpactType::Penalty.apply(3), -3);
    /// assert_eq!(ImpactType::Reward.apply(3), 3);
    /// ```
    #[inline]
    pub const fn apply(self, match_weight: i64) -> i64 {
        match self {
            ImpactType::Penalty => -match_weight,
            ImpactType::Reward => match_weight,
        }
    }
}
