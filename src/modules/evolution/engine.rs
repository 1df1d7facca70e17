use crate::modules::traits::{Trait, TraitDeltas, TraitVector};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LEARNING_RATE: f32 = 0.05;
pub const FEEDBACK_DELTA: f32 = 0.1;
pub const FEEDBACK_TRAIT_COUNT: usize = 3;
pub const DEFAULT_REQUEST_MAGNITUDE: f32 = 0.1;

/// A signal describing one user exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    PositiveFeedback,
    NegativeFeedback,
    EmotionalResponse {
        emotion: String,
    },
    DirectRequest {
        trait_name: String,
        #[serde(default)]
        magnitude: Option<f32>,
    },
    Conversation {
        topic: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    PositiveFeedback,
    NegativeFeedback,
    EmotionalResponse,
    DirectRequest,
    Conversation,
}

impl InteractionKind {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionKind::PositiveFeedback => "positive_feedback",
            InteractionKind::NegativeFeedback => "negative_feedback",
            InteractionKind::EmotionalResponse => "emotional_response",
            InteractionKind::DirectRequest => "direct_request",
            InteractionKind::Conversation => "conversation",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Interaction {
    pub fn emotional_response(emotion: impl Into<String>) -> Self {
        Interaction::EmotionalResponse {
            emotion: emotion.into(),
        }
    }

    pub fn direct_request(trait_name: impl Into<String>, magnitude: Option<f32>) -> Self {
        Interaction::DirectRequest {
            trait_name: trait_name.into(),
            magnitude,
        }
    }

    pub fn conversation(topic: impl Into<String>) -> Self {
        Interaction::Conversation {
            topic: topic.into(),
        }
    }

    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::PositiveFeedback => InteractionKind::PositiveFeedback,
            Interaction::NegativeFeedback => InteractionKind::NegativeFeedback,
            Interaction::EmotionalResponse { .. } => InteractionKind::EmotionalResponse,
            Interaction::DirectRequest { .. } => InteractionKind::DirectRequest,
            Interaction::Conversation { .. } => InteractionKind::Conversation,
        }
    }

    /// Human-readable summary used for history entries.
    pub fn describe(&self) -> String {
        match self {
            Interaction::PositiveFeedback => "Positive feedback received".to_string(),
            Interaction::NegativeFeedback => "Negative feedback received".to_string(),
            Interaction::EmotionalResponse { emotion } => {
                format!("Emotional response: {}", emotion)
            }
            Interaction::DirectRequest {
                trait_name,
                magnitude,
            } => format!(
                "Direct request: {} {:+.3}",
                trait_name,
                magnitude.unwrap_or(DEFAULT_REQUEST_MAGNITUDE)
            ),
            Interaction::Conversation { topic } => format!("Conversation topic: {}", topic),
        }
    }
}

fn emotion_deltas(emotion: &str) -> &'static [(Trait, f32)] {
    match emotion.trim().to_lowercase().as_str() {
        "happy" | "grateful" | "positive" => &[(Trait::Optimism, 0.1), (Trait::Compassion, 0.05)],
        "sad" | "upset" | "negative" => &[
            (Trait::Compassion, 0.15),
            (Trait::EmotionalIntelligence, 0.1),
        ],
        "angry" | "frustrated" => &[(Trait::Patience, 0.15), (Trait::Diplomacy, 0.1)],
        _ => &[],
    }
}

fn topic_deltas(topic: &str) -> &'static [(Trait, f32)] {
    match topic.trim().to_lowercase().as_str() {
        "professional" | "work" | "career" => {
            &[(Trait::Discipline, 0.05), (Trait::Assertiveness, 0.05)]
        }
        "personal" | "emotional" | "relationship" => &[
            (Trait::Compassion, 0.05),
            (Trait::EmotionalIntelligence, 0.05),
        ],
        "creative" | "art" | "imagination" => &[(Trait::Creativity, 0.05)],
        "learning" | "growth" | "development" => &[(Trait::Adaptability, 0.05)],
        _ => &[],
    }
}

/// Raw, undamped deltas for one interaction. Feedback targets the
/// [`FEEDBACK_TRAIT_COUNT`] highest traits of `effective`.
pub fn deltas_for(interaction: &Interaction, effective: &TraitVector) -> TraitDeltas {
    let mut deltas = TraitDeltas::new();

    match interaction {
        Interaction::PositiveFeedback | Interaction::NegativeFeedback => {
            let delta = if matches!(interaction, Interaction::PositiveFeedback) {
                FEEDBACK_DELTA
            } else {
                -FEEDBACK_DELTA
            };
            for (name, _) in effective.ranked().into_iter().take(FEEDBACK_TRAIT_COUNT) {
                deltas.insert(name, delta);
            }
        }
        Interaction::EmotionalResponse { emotion } => {
            deltas.extend(emotion_deltas(emotion).iter().copied());
        }
        Interaction::DirectRequest {
            trait_name,
            magnitude,
        } => match trait_name.parse::<Trait>() {
            Ok(name) => {
                let magnitude = magnitude
                    .filter(|m| m.is_finite())
                    .unwrap_or(DEFAULT_REQUEST_MAGNITUDE);
                deltas.insert(name, magnitude);
            }
            Err(e) => log::debug!("Direct request ignored: {}", e),
        },
        Interaction::Conversation { topic } => {
            deltas.extend(topic_deltas(topic).iter().copied());
        }
    }

    deltas
}

/// Applies `raw * learning_rate` to each trait with a clamped add and
/// returns the damped deltas.
pub fn apply_evolution(malleable: &mut TraitVector, raw: &TraitDeltas, learning_rate: f32) -> TraitDeltas {
    raw.iter()
        .map(|(name, delta)| {
            let damped = delta * learning_rate;
            malleable.adjust(*name, damped);
            (*name, damped)
        })
        .collect()
}

/// Holds the damping factor and drives [`deltas_for`] / [`apply_evolution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionEngine {
    learning_rate: f32,
}

impl EvolutionEngine {
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate: Self::sanitize_rate(learning_rate, DEFAULT_LEARNING_RATE),
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn evolve(&self, malleable: &mut TraitVector, interaction: &Interaction, effective: &TraitVector) -> TraitDeltas {
        self.evolve_with_rate(malleable, interaction, effective, self.learning_rate)
    }

    pub fn evolve_with_rate(
        &self,
        malleable: &mut TraitVector,
        interaction: &Interaction,
        effective: &TraitVector,
        learning_rate: f32,
    ) -> TraitDeltas {
        let rate = self.applied_rate(learning_rate);
        let raw = deltas_for(interaction, effective);
        apply_evolution(malleable, &raw, rate)
    }

    /// The rate `evolve_with_rate` actually uses for `requested`: clamped
    /// into `[0, 1]`, NaN falls back to the engine's own rate.
    pub fn applied_rate(&self, requested: f32) -> f32 {
        Self::sanitize_rate(requested, self.learning_rate)
    }

    fn sanitize_rate(rate: f32, fallback: f32) -> f32 {
        if rate.is_nan() {
            fallback
        } else {
            rate.clamp(0.0, 1.0)
        }
    }
}

impl Default for EvolutionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}
