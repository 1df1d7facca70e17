use crate::config::{Identity, PersonalityConfig};
use crate::modules::evolution::{EvolutionObserver, InteractionKind};
use crate::modules::personality::PersonalityStore;
use crate::modules::traits::{Trait, TraitDeltas, TraitVector};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingObserver {
    calls: Mutex<Vec<(InteractionKind, TraitDeltas)>>,
    fail: bool,
}

impl RecordingObserver {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(InteractionKind, TraitDeltas)> {
        self.calls.lock().unwrap().clone()
    }
}

impl EvolutionObserver for RecordingObserver {
    fn observe_evolution(&self, kind: InteractionKind, deltas: &TraitDeltas) -> Result<(), String> {
        self.calls.lock().unwrap().push((kind, deltas.clone()));
        if self.fail {
            Err("Mock observer failure".to_string())
        } else {
            Ok(())
        }
    }
}

pub struct PersonalityTestHelpers;

impl PersonalityTestHelpers {
    pub fn config() -> PersonalityConfig {
        PersonalityConfig {
            identity: Identity::new("test-profile", "Unit test persona"),
            ..PersonalityConfig::default()
        }
    }

    pub fn store() -> PersonalityStore {
        Self::store_with_seed(42)
    }

    pub fn store_with_seed(seed: u64) -> PersonalityStore {
        PersonalityStore::with_seed(Self::config(), seed)
    }

    pub fn assert_in_bounds(vector: &TraitVector) {
        for name in Trait::ALL {
            let value = vector.get(name);
            assert!((0.0..=1.0).contains(&value), "{} out of bounds: {}", name, value);
        }
    }
}
