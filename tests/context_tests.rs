pub mod mock;

use adaptive_personality_matrix::modules::context::{apply_context, Context, ContextKind};
use adaptive_personality_matrix::{Trait, TraitVector};

use mock::PersonalityTestHelpers;

#[test]
fn test_every_context_table() {
    let base = TraitVector::uniform(0.5);
    let expectations: [(ContextKind, &[(Trait, f32)]); 6] = [
        (
            ContextKind::Professional,
            &[(Trait::Discipline, 0.65), (Trait::Assertiveness, 0.60), (Trait::Creativity, 0.45)],
        ),
        (
            ContextKind::Casual,
            &[(Trait::Creativity, 0.65), (Trait::Optimism, 0.60), (Trait::Discipline, 0.40)],
        ),
        (
            ContextKind::EmotionalSupport,
            &[
                (Trait::Compassion, 0.70),
                (Trait::Patience, 0.65),
                (Trait::EmotionalIntelligence, 0.65),
                (Trait::Assertiveness, 0.40),
            ],
        ),
        (
            ContextKind::Productivity,
            &[(Trait::Discipline, 0.70), (Trait::Assertiveness, 0.65), (Trait::Patience, 0.45)],
        ),
        (
            ContextKind::Learning,
            &[(Trait::Patience, 0.65), (Trait::Adaptability, 0.65), (Trait::Creativity, 0.60)],
        ),
        (
            ContextKind::Crisis,
            &[(Trait::Assertiveness, 0.75), (Trait::Adaptability, 0.70), (Trait::Diplomacy, 0.35)],
        ),
    ];

    for (kind, expected) in expectations {
        let adjusted = apply_context(&base, &Context::new(kind, "table check"));
        for (name, value) in expected {
            assert!(
                PersonalityTestHelpers::approx_eq(adjusted.get(*name), *value),
                "{} in {}: got {}, expected {}",
                name,
                kind,
                adjusted.get(*name),
                value
            );
        }
    }
}

#[test]
fn test_crisis_assertiveness_scenario() {
    let effective = TraitVector::new().with(Trait::Assertiveness, 0.67);
    let adjusted = apply_context(&effective, &Context::new(ContextKind::Crisis, "incident"));
    assert!(PersonalityTestHelpers::approx_eq(adjusted.get(Trait::Assertiveness), 0.92));

    let saturated = TraitVector::new().with(Trait::Assertiveness, 0.9);
    let adjusted = apply_context(&saturated, &Context::new(ContextKind::Crisis, "incident"));
    assert_eq!(adjusted.get(Trait::Assertiveness), 1.0);
}

#[test]
fn test_sequential_clamping_does_not_compound() {
    // Table pushes discipline to the floor before the factor lifts it back.
    let vector = TraitVector::new().with(Trait::Discipline, 0.05);
    let context = Context::new(ContextKind::Casual, "banter").with_factor("discipline", 0.2);

    let adjusted = apply_context(&vector, &context);
    assert!(PersonalityTestHelpers::approx_eq(adjusted.get(Trait::Discipline), 0.2));
}

#[test]
fn test_factor_names_are_flexible() {
    let vector = TraitVector::uniform(0.5);
    let context = Context::new(ContextKind::Learning, "workshop")
        .with_factor("Emotional Intelligence", 0.1)
        .with_factor("not-a-trait", 0.4);

    let adjusted = apply_context(&vector, &context);
    assert!(PersonalityTestHelpers::approx_eq(adjusted.get(Trait::EmotionalIntelligence), 0.6));
    PersonalityTestHelpers::assert_in_bounds(&adjusted);
}

#[test]
fn test_context_serde() {
    let context = Context::new(ContextKind::EmotionalSupport, "late night talk").with_factor("patience", 0.05);
    let json = serde_json::to_value(&context).unwrap();
    assert_eq!(json["kind"], "emotional_support");

    let decoded: Context = serde_json::from_value(serde_json::json!({
        "kind": "crisis",
        "description": "no factors given"
    }))
    .unwrap();
    assert!(decoded.factors.is_empty());
}
