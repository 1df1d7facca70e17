use adaptive_personality_matrix::storage::{Blob, SnapshotStorage};
use adaptive_personality_matrix::{
    EvolutionObserver, Identity, InteractionKind, PersonalityConfig, PersonalityStore, Trait, TraitDeltas,
    TraitVector,
};
use std::sync::Mutex;

mockall::mock! {
    pub Storage {}

    impl SnapshotStorage for Storage {
        fn load(&self, key: &str) -> Option<Blob>;
        fn save(&self, key: &str, blob: &Blob) -> bool;
    }
}

mockall::mock! {
    pub Observer {}

    impl EvolutionObserver for Observer {
        fn observe_evolution(&self, kind: InteractionKind, deltas: &TraitDeltas) -> Result<(), String>;
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    calls: Mutex<Vec<(InteractionKind, TraitDeltas)>>,
}

impl RecordingObserver {
    pub fn calls(&self) -> Vec<(InteractionKind, TraitDeltas)> {
        self.calls.lock().unwrap().clone()
    }
}

impl EvolutionObserver for RecordingObserver {
    fn observe_evolution(&self, kind: InteractionKind, deltas: &TraitDeltas) -> Result<(), String> {
        self.calls.lock().unwrap().push((kind, deltas.clone()));
        Ok(())
    }
}

pub struct PersonalityTestHelpers;

impl PersonalityTestHelpers {
    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub fn config(name: &str) -> PersonalityConfig {
        PersonalityConfig {
            identity: Identity::new(name, "Integration test persona"),
            ..PersonalityConfig::default()
        }
    }

    pub fn store(name: &str) -> PersonalityStore {
        Self::init_logging();
        PersonalityStore::with_seed(Self::config(name), 7)
    }

    pub fn assert_in_bounds(vector: &TraitVector) {
        for name in Trait::ALL {
            let value = vector.get(name);
            assert!((0.0..=1.0).contains(&value), "{} out of bounds: {}", name, value);
        }
    }

    pub fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }
}
