use crate::modules::evolution::DEFAULT_LEARNING_RATE;
use crate::modules::history::DEFAULT_HISTORY_CAPACITY;
use crate::modules::personality::defaults::{default_baseline, default_malleable};
use crate::modules::traits::{TraitVector, DEFAULT_CORE_WEIGHT};
use serde::{Deserialize, Serialize};
use std::convert::Into;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_PROFILE_NAME: &str = "personality";
pub const DEFAULT_PERTURBATION_BOUND: f32 = 0.05;
pub const MAX_PERTURBATION_BOUND: f32 = 0.5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub name: String,
    pub background: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
        }
    }

    /// Prefix for this profile's snapshot keys.
    pub fn profile_id(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_PROFILE_NAME
        } else {
            trimmed
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    pub core_weight: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            core_weight: DEFAULT_CORE_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub learning_rate: f32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// How `reset_malleable` rebuilds the malleable layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ResetStrategy {
    /// Restore the configured initial malleable vector.
    Defaults,
    /// Baseline plus a uniform offset in `[-bound, bound]` per trait.
    Perturbed { bound: f32 },
}

impl Default for ResetStrategy {
    fn default() -> Self {
        ResetStrategy::Perturbed {
            bound: DEFAULT_PERTURBATION_BOUND,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityConfig {
    pub identity: Identity,
    pub blend: BlendConfig,
    pub evolution: EvolutionConfig,
    pub history: HistoryConfig,
    pub reset: ResetStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<TraitVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malleable: Option<TraitVector>,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            identity: Identity::default(),
            blend: BlendConfig::default(),
            evolution: EvolutionConfig::default(),
            history: HistoryConfig::default(),
            reset: ResetStrategy::default(),
            baseline: None,
            malleable: None,
        }
    }
}

impl PersonalityConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PersonalityConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratios = [
            ("blend.core_weight", self.blend.core_weight),
            ("evolution.learning_rate", self.evolution.learning_rate),
        ];

        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "'{}' has value {}, but must be between 0.0 and 1.0",
                    name, value
                )));
            }
        }

        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid(
                "'history.capacity' must be at least 1".to_string(),
            ));
        }

        if let ResetStrategy::Perturbed { bound } = self.reset {
            if !(0.0..=MAX_PERTURBATION_BOUND).contains(&bound) {
                return Err(ConfigError::Invalid(format!(
                    "'reset.bound' has value {}, but must be between 0.0 and {}",
                    bound, MAX_PERTURBATION_BOUND
                )));
            }
        }

        Ok(())
    }

    /// Configured baseline overrides laid over the built-in defaults.
    pub fn initial_baseline(&self) -> TraitVector {
        match &self.baseline {
            Some(overrides) => overrides.merged_over(&default_baseline()),
            None => default_baseline(),
        }
    }

    pub fn initial_malleable(&self) -> TraitVector {
        match &self.malleable {
            Some(overrides) => overrides.merged_over(&default_malleable()),
            None => default_malleable(),
        }
    }
}
