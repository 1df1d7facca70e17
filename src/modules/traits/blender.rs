use super::vector::TraitVector;
use std::collections::BTreeSet;

pub const DEFAULT_CORE_WEIGHT: f32 = 0.7;

/// Weighted combination of the baseline and malleable layers over the union
/// of their traits: `baseline * w + malleable * (1 - w)`. Missing entries
/// read as neutral. The weight is clamped into `[0, 1]` so the result stays
/// a convex combination.
pub fn blend(baseline: &TraitVector, malleable: &TraitVector, core_weight: f32) -> TraitVector {
    let weight = if core_weight.is_nan() {
        DEFAULT_CORE_WEIGHT
    } else {
        core_weight.clamp(0.0, 1.0)
    };

    baseline
        .traits()
        .chain(malleable.traits())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|name| {
            let value = (baseline.get(name) * weight) + (malleable.get(name) * (1.0 - weight));
            (name, value)
        })
        .collect()
}
