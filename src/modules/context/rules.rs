use crate::modules::traits::vector::normalize_key;
use crate::modules::traits::{Trait, TraitVector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Professional,
    Casual,
    EmotionalSupport,
    Productivity,
    Learning,
    Crisis,
}

const PROFESSIONAL_DELTAS: &[(Trait, f32)] = &[
    (Trait::Discipline, 0.15),
    (Trait::Assertiveness, 0.10),
    (Trait::Creativity, -0.05),
];

const CASUAL_DELTAS: &[(Trait, f32)] = &[
    (Trait::Creativity, 0.15),
    (Trait::Optimism, 0.10),
    (Trait::Discipline, -0.10),
];

const EMOTIONAL_SUPPORT_DELTAS: &[(Trait, f32)] = &[
    (Trait::Compassion, 0.20),
    (Trait::Patience, 0.15),
    (Trait::EmotionalIntelligence, 0.15),
    (Trait::Assertiveness, -0.10),
];

const PRODUCTIVITY_DELTAS: &[(Trait, f32)] = &[
    (Trait::Discipline, 0.20),
    (Trait::Assertiveness, 0.15),
    (Trait::Patience, -0.05),
];

const LEARNING_DELTAS: &[(Trait, f32)] = &[
    (Trait::Patience, 0.15),
    (Trait::Adaptability, 0.15),
    (Trait::Creativity, 0.10),
];

const CRISIS_DELTAS: &[(Trait, f32)] = &[
    (Trait::Assertiveness, 0.25),
    (Trait::Adaptability, 0.20),
    (Trait::Diplomacy, -0.15),
];

impl ContextKind {
    pub const ALL: [ContextKind; 6] = [
        ContextKind::Professional,
        ContextKind::Casual,
        ContextKind::EmotionalSupport,
        ContextKind::Productivity,
        ContextKind::Learning,
        ContextKind::Crisis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContextKind::Professional => "professional",
            ContextKind::Casual => "casual",
            ContextKind::EmotionalSupport => "emotional_support",
            ContextKind::Productivity => "productivity",
            ContextKind::Learning => "learning",
            ContextKind::Crisis => "crisis",
        }
    }

    /// Fixed adjustments applied, in order, whenever this context is current.
    pub fn fixed_deltas(&self) -> &'static [(Trait, f32)] {
        match self {
            ContextKind::Professional => PROFESSIONAL_DELTAS,
            ContextKind::Casual => CASUAL_DELTAS,
            ContextKind::EmotionalSupport => EMOTIONAL_SUPPORT_DELTAS,
            ContextKind::Productivity => PRODUCTIVITY_DELTAS,
            ContextKind::Learning => LEARNING_DELTAS,
            ContextKind::Crisis => CRISIS_DELTAS,
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown context kind: '{0}'")]
pub struct ContextParseError(pub String);

impl FromStr for ContextKind {
    type Err = ContextParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        ContextKind::ALL
            .iter()
            .copied()
            .find(|candidate| normalize_key(candidate.name()) == key)
            .ok_or_else(|| ContextParseError(s.to_string()))
    }
}

/// The situation currently in effect. `factors` carries ad hoc
/// trait-name → delta overrides applied after the fixed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub kind: ContextKind,
    pub description: String,
    #[serde(default)]
    pub factors: BTreeMap<String, f32>,
}

impl Context {
    pub fn new(kind: ContextKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            factors: BTreeMap::new(),
        }
    }

    pub fn with_factor(mut self, trait_name: impl Into<String>, delta: f32) -> Self {
        self.factors.insert(trait_name.into(), delta);
        self
    }
}

/// Applies the fixed table for `context.kind`, then every entry of
/// `context.factors` in key order. Each delta is a clamped add on the same
/// working copy. Unknown factor names are skipped.
pub fn apply_context(vector: &TraitVector, context: &Context) -> TraitVector {
    let mut adjusted = vector.clone();

    for (name, delta) in context.kind.fixed_deltas() {
        adjusted.adjust(*name, *delta);
    }

    for (raw_name, delta) in &context.factors {
        match raw_name.parse::<Trait>() {
            Ok(name) => {
                adjusted.adjust(name, *delta);
            }
            Err(e) => log::debug!("Skipping context factor for {} context: {}", context.kind, e),
        }
    }

    adjusted
}
