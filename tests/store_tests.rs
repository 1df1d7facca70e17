pub mod mock;

use adaptive_personality_matrix::config::ResetStrategy;
use adaptive_personality_matrix::{blend, Context, ContextKind, EventKind, Interaction, PersonalityStore, Trait};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mock::PersonalityTestHelpers;

#[test]
fn test_default_effective_blend() {
    let store = PersonalityTestHelpers::store("scenario-a");
    let effective = store.effective();

    assert!(PersonalityTestHelpers::approx_eq(effective.get(Trait::Assertiveness), 0.67));
    assert!(PersonalityTestHelpers::approx_eq(effective.get(Trait::EmotionalIntelligence), 0.82));
    assert_eq!(effective.len(), Trait::ALL.len());
}

#[test]
fn test_crisis_context_on_store() {
    let mut store = PersonalityTestHelpers::store("scenario-b");
    store.set_context(Context::new(ContextKind::Crisis, "server outage"));
    assert!(PersonalityTestHelpers::approx_eq(store.effective().get(Trait::Assertiveness), 0.92));

    store.clear_context();
    assert!(PersonalityTestHelpers::approx_eq(store.effective().get(Trait::Assertiveness), 0.67));
}

#[test]
fn test_set_context_is_idempotent_for_effective() {
    let mut store = PersonalityTestHelpers::store("idempotent");
    let context = Context::new(ContextKind::EmotionalSupport, "grief").with_factor("patience", 0.1);

    store.set_context(context.clone());
    let once = store.effective();
    store.set_context(context);
    assert_eq!(store.effective(), once);
}

#[test]
fn test_reset_stays_near_baseline() {
    for seed in 0..20 {
        let mut store = PersonalityStore::with_seed(PersonalityTestHelpers::config("scenario-e"), seed);
        store.adjust_malleable_trait(Trait::Optimism, -0.5);
        store.evolve(&Interaction::emotional_response("happy"));
        store.reset_malleable();

        for name in Trait::ALL {
            let offset = store.malleable().get(name) - store.baseline().get(name);
            assert!(offset.abs() <= 0.05 + 1e-6, "{} drifted by {} (seed {})", name, offset, seed);
        }
        PersonalityTestHelpers::assert_in_bounds(store.malleable());
        assert_eq!(store.effective(), blend(store.baseline(), store.malleable(), 0.7));
        assert_eq!(store.history().latest().map(|e| e.kind), Some(EventKind::Reset));
    }
}

#[test]
fn test_reset_never_touches_baseline() {
    let mut config = PersonalityTestHelpers::config("reset-defaults");
    config.reset = ResetStrategy::Defaults;
    let mut store = PersonalityStore::with_seed(config, 5);

    store.adjust_baseline_trait(Trait::Diplomacy, 0.1, "mediation training");
    let baseline = store.baseline().clone();
    store.reset_malleable();
    assert_eq!(store.baseline(), &baseline);
}

#[test]
fn test_history_keeps_most_recent_events() {
    let mut store = PersonalityTestHelpers::store("history-cap");
    for turn in 0..150 {
        store.set_context(Context::new(ContextKind::Casual, format!("turn-{}", turn)));
    }

    let history = store.history();
    assert_eq!(history.len(), 100);
    assert_eq!(history.count_of(EventKind::Initialization), 0);

    let events = history.to_vec();
    assert!(events[0].description.ends_with("turn-50"));
    assert!(events[99].description.ends_with("turn-149"));
}

#[test]
fn test_every_mutation_records_one_event() {
    let mut store = PersonalityTestHelpers::store("one-event-each");
    let mut expected = store.history().len();

    store.set_context(Context::new(ContextKind::Learning, "tutorial"));
    expected += 1;
    assert_eq!(store.history().len(), expected);

    store.adjust_baseline_trait(Trait::Patience, 0.0, "no-op");
    expected += 1;
    assert_eq!(store.history().len(), expected);

    store.adjust_malleable_trait(Trait::Patience, 5.0);
    expected += 1;
    assert_eq!(store.history().len(), expected);

    store.evolve(&Interaction::conversation("gardening"));
    expected += 1;
    assert_eq!(store.history().len(), expected);

    store.reset_malleable();
    store.clear_context();
    assert_eq!(store.history().len(), expected + 2);
}

#[test]
fn test_random_operations_stay_in_bounds() {
    let mut store = PersonalityTestHelpers::store("bounds");
    let mut rng = StdRng::seed_from_u64(99);
    let interactions = [
        Interaction::PositiveFeedback,
        Interaction::NegativeFeedback,
        Interaction::emotional_response("angry"),
        Interaction::direct_request("optimism", Some(25.0)),
        Interaction::conversation("career"),
    ];

    for _ in 0..500 {
        let name = Trait::ALL[rng.gen_range(0..Trait::ALL.len())];
        match rng.gen_range(0..5) {
            0 => {
                store.adjust_baseline_trait(name, rng.gen_range(-3.0..3.0), "fuzz");
            }
            1 => {
                store.adjust_malleable_trait(name, rng.gen_range(-3.0..3.0));
            }
            2 => {
                let interaction = &interactions[rng.gen_range(0..interactions.len())];
                store.evolve_with_rate(interaction, rng.gen_range(0.0..1.0));
            }
            3 => {
                let kind = ContextKind::ALL[rng.gen_range(0..ContextKind::ALL.len())];
                store.set_context(Context::new(kind, "fuzz").with_factor(name.name(), rng.gen_range(-2.0..2.0)));
            }
            _ => store.reset_malleable(),
        }

        PersonalityTestHelpers::assert_in_bounds(store.baseline());
        PersonalityTestHelpers::assert_in_bounds(store.malleable());
        PersonalityTestHelpers::assert_in_bounds(&store.effective());
    }
}

#[test]
fn test_dominant_traits_ordering() {
    let mut store = PersonalityTestHelpers::store("dominant");
    let top = store.dominant_traits(3);
    assert_eq!(top[0].0, Trait::EmotionalIntelligence);
    assert!(top.windows(2).all(|pair| pair[0].1 >= pair[1].1));

    store.adjust_baseline_trait(Trait::Creativity, 1.0, "muse");
    store.adjust_malleable_trait(Trait::Creativity, 1.0);
    let top = store.dominant_traits(1);
    assert_eq!(top[0].0, Trait::Creativity);
    assert!(PersonalityTestHelpers::approx_eq(top[0].1, 1.0));
    assert_eq!(store.dominant_traits(50).len(), Trait::ALL.len());
    assert!(store.dominant_traits(0).is_empty());
}
