pub mod engine;
pub mod observer;

pub use engine::{
    apply_evolution, deltas_for, EvolutionEngine, Interaction, InteractionKind, DEFAULT_LEARNING_RATE,
    DEFAULT_REQUEST_MAGNITUDE, FEEDBACK_DELTA, FEEDBACK_TRAIT_COUNT,
};
pub use observer::{notify_observer, EvolutionObserver};
