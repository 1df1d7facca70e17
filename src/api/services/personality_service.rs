use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::modules::context::Context;
use crate::modules::evolution::{notify_observer, EvolutionObserver, Interaction};
use crate::modules::history::EvolutionEvent;
use crate::modules::personality::PersonalityStore;
use crate::modules::traits::{Intensity, Trait, TraitDeltas, TraitVector};
use crate::storage::{load_snapshot, save_snapshot, SnapshotStorage};

/// Shares one [`PersonalityStore`] between threads.
///
/// Every call runs under a single mutex so concurrent read-modify-clamp
/// sequences never lose updates. Storage I/O and observer notifications
/// happen after the lock is released: `persist` copies a snapshot out first,
/// `restore` decodes before swapping state in.
pub struct PersonalityService {
    store: Mutex<PersonalityStore>,
    storage: Arc<dyn SnapshotStorage>,
}

impl PersonalityService {
    pub fn new(store: PersonalityStore, storage: Arc<dyn SnapshotStorage>) -> Self {
        Self {
            store: Mutex::new(store),
            storage,
        }
    }

    // Every store operation leaves it valid, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, PersonalityStore> {
        self.store.lock().unwrap_or_else(|poisoned| {
            log::warn!("Personality lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn with_store<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut PersonalityStore) -> T,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    pub fn attach_observer(&self, observer: Weak<dyn EvolutionObserver>) {
        self.lock().attach_observer(observer);
    }

    pub fn set_context(&self, context: Context) {
        self.lock().set_context(context);
    }

    pub fn clear_context(&self) {
        self.lock().clear_context();
    }

    pub fn adjust_baseline_trait(&self, name: Trait, delta: f32, reason: impl Into<String>) -> Intensity {
        self.lock().adjust_baseline_trait(name, delta, reason)
    }

    pub fn adjust_malleable_trait(&self, name: Trait, delta: f32) -> Intensity {
        self.lock().adjust_malleable_trait(name, delta)
    }

    pub fn reset_malleable(&self) {
        self.lock().reset_malleable();
    }

    pub fn evolve(&self, interaction: &Interaction) -> TraitDeltas {
        let learning_rate = self.lock().learning_rate();
        self.evolve_with_rate(interaction, learning_rate)
    }

    /// The observer runs after the lock is released, so it may call back
    /// into the service.
    pub fn evolve_with_rate(&self, interaction: &Interaction, learning_rate: f32) -> TraitDeltas {
        let (applied, observer) = self.lock().evolve_deferred(interaction, learning_rate);
        if let Some(observer) = observer {
            notify_observer(observer.as_ref(), interaction.kind(), &applied);
        }
        applied
    }

    pub fn effective(&self) -> TraitVector {
        self.lock().effective()
    }

    pub fn dominant_traits(&self, n: usize) -> Vec<(Trait, Intensity)> {
        self.lock().dominant_traits(n)
    }

    pub fn history(&self) -> Vec<EvolutionEvent> {
        self.lock().history().to_vec()
    }

    pub fn persist(&self) -> bool {
        let (keys, snapshot) = {
            let store = self.lock();
            (store.snapshot_keys(), store.snapshot())
        };
        save_snapshot(self.storage.as_ref(), &keys, &snapshot)
    }

    pub fn restore(&self) -> bool {
        let keys = self.lock().snapshot_keys();
        match load_snapshot(self.storage.as_ref(), &keys) {
            Ok(snapshot) => {
                self.lock().restore(snapshot);
                true
            }
            Err(e) => {
                log::warn!("Failed to restore personality from '{}': {}", keys.baseline, e);
                false
            }
        }
    }
}
