pub mod config;
pub mod modules;
pub mod storage;
pub mod api;

#[cfg(test)]
mod _test_mock;

pub use config::{PersonalityConfig, Identity, ResetStrategy, ConfigError};
pub use modules::traits::{Trait, TraitVector, TraitDeltas, Intensity, blend};
pub use modules::context::{Context, ContextKind, apply_context};
pub use modules::evolution::{EvolutionEngine, EvolutionObserver, Interaction, InteractionKind};
pub use modules::history::{EventKind, EvolutionEvent, HistoryLog};
pub use modules::personality::PersonalityStore;
pub use storage::{Blob, FileSnapshotStorage, MemorySnapshotStorage, SnapshotStorage};
pub use api::PersonalityService;
