use crate::modules::traits::{Trait, TraitVector};

pub fn default_baseline() -> TraitVector {
    TraitVector::new()
        .with(Trait::Assertiveness, 0.70)
        .with(Trait::Compassion, 0.80)
        .with(Trait::Discipline, 0.75)
        .with(Trait::Patience, 0.70)
        .with(Trait::EmotionalIntelligence, 0.85)
        .with(Trait::Creativity, 0.65)
        .with(Trait::Optimism, 0.70)
        .with(Trait::Diplomacy, 0.75)
        .with(Trait::Adaptability, 0.80)
}

pub fn default_malleable() -> TraitVector {
    TraitVector::new()
        .with(Trait::Assertiveness, 0.60)
        .with(Trait::Compassion, 0.70)
        .with(Trait::Discipline, 0.65)
        .with(Trait::Patience, 0.60)
        .with(Trait::EmotionalIntelligence, 0.75)
        .with(Trait::Creativity, 0.70)
        .with(Trait::Optimism, 0.65)
        .with(Trait::Diplomacy, 0.70)
        .with(Trait::Adaptability, 0.75)
}
