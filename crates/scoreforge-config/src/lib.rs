//! Configuration system for ScoreForge.
//!
//! Load scoring session configuration from TOML or YAML to control
//! assertions, constraint match tracking and constraint weights without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use scoreforge_config::{EnvironmentMode, SessionConfig};
//!
//! let config = SessionConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!     constraint_match_enabled = true
//!
//!     [constraint_weights]
//!     "timetabling/Room conflict" = "-2hard/0soft"
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert!(config.constraint_match_enabled);
//! assert_eq!(config.constraint_weights.len(), 1);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use scoreforge_config::SessionConfig;
//!
//! let config = SessionConfig::load("scoreforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use scoreforge_core::{ParseableScore, ScoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Initial capacity of a propagation queue when none is configured.
pub const DEFAULT_DIRTY_QUEUE_CAPACITY: usize = 1000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid weight for constraint ({constraint}): {source}")]
    Score {
        constraint: String,
        #[source]
        source: ScoreError,
    },
}

/// Scoring session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Tracks constraint matches and indictments alongside the score.
    #[serde(default)]
    pub constraint_match_enabled: bool,

    /// Weight overrides keyed by constraint full name (`package/name`),
    /// written in the text form of the session's score type.
    #[serde(default)]
    pub constraint_weights: BTreeMap<String, String>,

    /// Initial capacity of each propagation queue.
    #[serde(default = "default_dirty_queue_capacity")]
    pub dirty_queue_capacity: usize,
}

fn default_dirty_queue_capacity() -> usize {
    DEFAULT_DIRTY_QUEUE_CAPACITY
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            constraint_match_enabled: false,
            constraint_weights: BTreeMap::new(),
            dirty_queue_capacity: DEFAULT_DIRTY_QUEUE_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!(event = "config_read", path = %path.display(), format = "toml");
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!(event = "config_read", path = %path.display(), format = "yaml");
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validated()
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    /// Enables or disables constraint match tracking.
    pub fn with_constraint_match_enabled(mut self, enabled: bool) -> Self {
        self.constraint_match_enabled = enabled;
        self
    }

    /// Adds a weight override in score text form.
    pub fn with_constraint_weight(
        mut self,
        constraint: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        self.constraint_weights
            .insert(constraint.into(), weight.into());
        self
    }

    /// Sets the initial propagation queue capacity.
    pub fn with_dirty_queue_capacity(mut self, capacity: usize) -> Self {
        self.dirty_queue_capacity = capacity;
        self
    }

    /// Checks the constraint names of the weight overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for constraint in self.constraint_weights.keys() {
            let name = constraint.rsplit('/').next().unwrap_or(constraint);
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "constraint_weights key ({}) has no constraint name",
                    constraint
                )));
            }
        }
        Ok(())
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        debug!(
            event = "config_loaded",
            environment_mode = ?self.environment_mode,
            constraint_match_enabled = self.constraint_match_enabled,
            weight_overrides = self.constraint_weights.len(),
            dirty_queue_capacity = self.dirty_queue_capacity,
        );
        Ok(self)
    }

    /// Parses every weight override with the given score type.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreforge_config::SessionConfig;
    /// use scoreforge_core::HardSoftScore;
    ///
    /// let config = SessionConfig::new().with_constraint_weight("Room conflict", "-1hard/0soft");
    /// let weights = config.parse_constraint_weights::<HardSoftScore>().unwrap();
    /// assert_eq!(weights, vec![("Room conflict".to_string(), HardSoftScore::of_hard(-1))]);
    /// ```
    pub fn parse_constraint_weights<Sc: ParseableScore>(
        &self,
    ) -> Result<Vec<(String, Sc)>, ConfigError> {
        self.constraint_weights
            .iter()
            .map(|(constraint, weight)| {
                Sc::parse(weight)
                    .map(|score| (constraint.clone(), score))
                    .map_err(|source| ConfigError::Score {
                        constraint: constraint.clone(),
                        source,
                    })
            })
            .collect()
    }
}

/// Environment mode affecting scoring behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    #[default]
    Reproducible,

    /// Fast assert mode with basic assertions.
    FastAssert,

    /// Full assert mode with comprehensive assertions.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if tuple lifecycle transitions are validated.
    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    /// Returns true if a session cross-checks its score against the
    /// constraint match totals on every calculation.
    pub fn is_fully_asserted(self) -> bool {
        self == EnvironmentMode::FullAssert
    }
}
