//! Runtime constraint weight configuration.
//!
//! Lets a session replace the default weight of a constraint without
//! touching the code that declares it.

use std::collections::HashMap;
use std::fmt::Debug;

use scoreforge_config::{ConfigError, SessionConfig};
use scoreforge_core::{ConstraintRef, ParseableScore, Score};
use tracing::warn;

/// Replacement weights keyed by constraint full name (`package/name`).
#[derive(Clone)]
pub struct ConstraintWeightOverrides<Sc: Score> {
    weights: HashMap<String, Sc>,
}

impl<Sc: Score> Debug for ConstraintWeightOverrides<Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintWeightOverrides")
            .field("count", &self.weights.len())
            .finish()
    }
}

impl<Sc: Score> Default for ConstraintWeightOverrides<Sc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Sc: Score> ConstraintWeightOverrides<Sc> {
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    /// Creates overrides from an iterator of (full name, weight) pairs.
    pub fn from_pairs<I, N>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, Sc)>,
        N: Into<String>,
    {
        let weights = iter.into_iter().map(|(n, w)| (n.into(), w)).collect();
        Self { weights }
    }

    /// Sets the weight for a constraint.
    pub fn put<N: Into<String>>(&mut self, name: N, weight: Sc) {
        self.weights.insert(name.into(), weight);
    }

    pub fn remove(&mut self, name: &str) -> Option<Sc> {
        self.weights.remove(name)
    }

    /// Gets the overridden weight, or returns the default if not overridden.
    pub fn get_or_default(&self, name: &str, default: Sc) -> Sc {
        self.weights.get(name).cloned().unwrap_or(default)
    }

    pub fn get(&self, name: &str) -> Option<&Sc> {
        self.weights.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }

    /// Replaces the weights of the listed constraints that have an override.
    ///
    /// Overrides naming none of the listed constraints are reported and
    /// otherwise ignored.
    pub fn apply(&self, weights: &mut [(ConstraintRef, Sc)]) {
        for (constraint, weight) in weights.iter_mut() {
            if let Some(replacement) = self.weights.get(&constraint.full_name()) {
                *weight = replacement.clone();
            }
        }
        for name in self.weights.keys() {
            if !weights.iter().any(|(constraint, _)| &constraint.full_name() == name) {
                warn!(event = "unknown_weight_override", constraint = %name);
            }
        }
    }
}

impl<Sc: ParseableScore> ConstraintWeightOverrides<Sc> {
    /// Parses the `constraint_weights` table of a session configuration.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_pairs(config.parse_constraint_weights::<Sc>()?))
    }
}
