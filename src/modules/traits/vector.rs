use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type Intensity = f32;

/// Raw or damped per-trait changes, keyed in declaration order.
pub type TraitDeltas = BTreeMap<Trait, f32>;

pub const NEUTRAL_INTENSITY: Intensity = 0.5;
pub const MIN_INTENSITY: Intensity = 0.0;
pub const MAX_INTENSITY: Intensity = 1.0;

/// Clamps into `[0.0, 1.0]`. NaN collapses to the neutral intensity.
pub fn clamp_intensity(value: Intensity) -> Intensity {
    if value.is_nan() {
        return NEUTRAL_INTENSITY;
    }
    value.clamp(MIN_INTENSITY, MAX_INTENSITY)
}

/// Lowercases and strips `_`, `-` and spaces so `EmotionalIntelligence`,
/// `emotional_intelligence` and `emotional intelligence` compare equal.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Assertiveness,
    Compassion,
    Discipline,
    Patience,
    EmotionalIntelligence,
    Creativity,
    Optimism,
    Diplomacy,
    Adaptability,
}

impl Trait {
    /// Every trait in declaration order. This order breaks ranking ties.
    pub const ALL: [Trait; 9] = [
        Trait::Assertiveness,
        Trait::Compassion,
        Trait::Discipline,
        Trait::Patience,
        Trait::EmotionalIntelligence,
        Trait::Creativity,
        Trait::Optimism,
        Trait::Diplomacy,
        Trait::Adaptability,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Trait::Assertiveness => "assertiveness",
            Trait::Compassion => "compassion",
            Trait::Discipline => "discipline",
            Trait::Patience => "patience",
            Trait::EmotionalIntelligence => "emotional_intelligence",
            Trait::Creativity => "creativity",
            Trait::Optimism => "optimism",
            Trait::Diplomacy => "diplomacy",
            Trait::Adaptability => "adaptability",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown trait name: '{0}'")]
pub struct TraitParseError(pub String);

impl FromStr for Trait {
    type Err = TraitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Trait::ALL
            .iter()
            .copied()
            .find(|candidate| normalize_key(candidate.name()) == key)
            .ok_or_else(|| TraitParseError(s.to_string()))
    }
}

/// Trait name → intensity. Missing traits read as [`NEUTRAL_INTENSITY`],
/// every write is clamped into `[0.0, 1.0]`.
///
/// Serialized as a map of snake_case trait names to numbers. Decoding is
/// tolerant: unknown names are dropped and values are clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Intensity>", into = "BTreeMap<String, Intensity>")]
pub struct TraitVector {
    values: BTreeMap<Trait, Intensity>,
}

impl TraitVector {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Every trait set to the same intensity.
    pub fn uniform(value: Intensity) -> Self {
        Trait::ALL.iter().map(|t| (*t, value)).collect()
    }

    pub fn with(mut self, name: Trait, value: Intensity) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: Trait) -> Intensity {
        self.values.get(&name).copied().unwrap_or(NEUTRAL_INTENSITY)
    }

    pub fn contains(&self, name: Trait) -> bool {
        self.values.contains_key(&name)
    }

    /// Stores the clamped value and returns it.
    pub fn set(&mut self, name: Trait, value: Intensity) -> Intensity {
        let clamped = clamp_intensity(value);
        self.values.insert(name, clamped);
        clamped
    }

    /// Clamped add. A NaN delta leaves the trait untouched.
    pub fn adjust(&mut self, name: Trait, delta: f32) -> Intensity {
        let current = self.get(name);
        if delta.is_nan() {
            return current;
        }
        self.set(name, current + delta)
    }

    pub fn traits(&self) -> impl Iterator<Item = Trait> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, Intensity)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of `self` with any trait it lacks taken from `fallback`.
    pub fn merged_over(&self, fallback: &TraitVector) -> TraitVector {
        let mut merged = fallback.clone();
        for (name, value) in self.iter() {
            merged.set(name, value);
        }
        merged
    }

    /// Present traits sorted by descending intensity. Ties keep
    /// declaration order.
    pub fn ranked(&self) -> Vec<(Trait, Intensity)> {
        let mut ranked: Vec<(Trait, Intensity)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl FromIterator<(Trait, Intensity)> for TraitVector {
    fn from_iter<I: IntoIterator<Item = (Trait, Intensity)>>(iter: I) -> Self {
        let mut vector = TraitVector::new();
        for (name, value) in iter {
            vector.set(name, value);
        }
        vector
    }
}

impl From<BTreeMap<String, Intensity>> for TraitVector {
    fn from(raw: BTreeMap<String, Intensity>) -> Self {
        let mut vector = TraitVector::new();
        for (key, value) in raw {
            match key.parse::<Trait>() {
                Ok(name) => {
                    vector.set(name, value);
                }
                Err(e) => log::debug!("Ignoring trait entry: {}", e),
            }
        }
        vector
    }
}

impl From<TraitVector> for BTreeMap<String, Intensity> {
    fn from(vector: TraitVector) -> Self {
        vector
            .values
            .into_iter()
            .map(|(name, value)| (name.name().to_string(), value))
            .collect()
    }
}
