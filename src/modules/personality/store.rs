//! The personality facade.
//!
//! Owns the baseline and malleable trait layers, the current context and the
//! event history. Every mutating call appends exactly one
//! [`EvolutionEvent`], including calls that end up changing nothing.

use crate::config::{PersonalityConfig, ResetStrategy, MAX_PERTURBATION_BOUND};
use crate::modules::context::{apply_context, Context};
use crate::modules::evolution::{notify_observer, EvolutionEngine, EvolutionObserver, Interaction};
use crate::modules::history::{EventKind, EvolutionEvent, HistoryLog};
use crate::modules::traits::{blend, Intensity, Trait, TraitDeltas, TraitVector};
use crate::storage::{load_snapshot, save_snapshot, PersonalitySnapshot, SnapshotKeys, SnapshotStorage};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::sync::{Arc, Weak};

pub struct PersonalityStore {
    config: PersonalityConfig,
    baseline: TraitVector,
    malleable: TraitVector,
    context: Option<Context>,
    history: HistoryLog,
    engine: EvolutionEngine,
    rng: Box<dyn RngCore + Send>,
    observer: Option<Weak<dyn EvolutionObserver>>,
}

impl PersonalityStore {
    pub fn new(config: PersonalityConfig) -> Self {
        Self::with_rng(config, Box::new(StdRng::from_entropy()))
    }

    /// Reproducible perturbations for `reset_malleable`.
    pub fn with_seed(config: PersonalityConfig, seed: u64) -> Self {
        Self::with_rng(config, Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_rng(config: PersonalityConfig, rng: Box<dyn RngCore + Send>) -> Self {
        let baseline = config.initial_baseline();
        let malleable = config.initial_malleable();
        let history = HistoryLog::new(config.history.capacity);
        let engine = EvolutionEngine::new(config.evolution.learning_rate);

        let mut store = Self {
            config,
            baseline,
            malleable,
            context: None,
            history,
            engine,
            rng,
            observer: None,
        };

        let profile_id = store.config.identity.profile_id().to_string();
        log::info!("Initialized personality '{}'", profile_id);
        store.record(
            EvolutionEvent::new(EventKind::Initialization, "Personality initialized")
                .with_metadata("profile", profile_id),
        );
        store
    }

    pub fn config(&self) -> &PersonalityConfig {
        &self.config
    }

    pub fn baseline(&self) -> &TraitVector {
        &self.baseline
    }

    pub fn malleable(&self) -> &TraitVector {
        &self.malleable
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Registers a non-owning observer notified after each `evolve`. Once
    /// the observer is dropped it is silently skipped.
    pub fn attach_observer(&mut self, observer: Weak<dyn EvolutionObserver>) {
        self.observer = Some(observer);
    }

    pub fn detach_observer(&mut self) {
        self.observer = None;
    }

    pub fn set_context(&mut self, context: Context) {
        log::debug!("Context set to {} ({})", context.kind, context.description);
        let event = EvolutionEvent::new(
            EventKind::ContextChange,
            format!("Context changed to {}: {}", context.kind, context.description),
        )
        .with_metadata("context", context.kind)
        .with_metadata("factors", context.factors.len());

        self.context = Some(context);
        self.record(event);
    }

    pub fn clear_context(&mut self) {
        let previous = self.context.take();
        let description = match &previous {
            Some(context) => format!("Context {} cleared", context.kind),
            None => "Context cleared".to_string(),
        };
        log::debug!("{}", description);
        self.record(EvolutionEvent::new(EventKind::ContextChange, description).with_metadata("context", "none"));
    }

    /// Clamped add to the baseline layer. `reason` is kept in the history.
    pub fn adjust_baseline_trait(&mut self, name: Trait, delta: f32, reason: impl Into<String>) -> Intensity {
        let reason = reason.into();
        let previous = self.baseline.get(name);
        let current = self.baseline.adjust(name, delta);
        log::debug!("Baseline {} {:.3} -> {:.3}: {}", name, previous, current, reason);

        self.record(
            EvolutionEvent::new(EventKind::CoreTraitAdjustment, format!("Baseline {} adjusted: {}", name, reason))
                .with_metadata("trait", name)
                .with_metadata("delta", delta)
                .with_metadata("previous", previous)
                .with_metadata("current", current)
                .with_metadata("reason", reason),
        );
        current
    }

    pub fn adjust_malleable_trait(&mut self, name: Trait, delta: f32) -> Intensity {
        let previous = self.malleable.get(name);
        let current = self.malleable.adjust(name, delta);
        log::debug!("Malleable {} {:.3} -> {:.3}", name, previous, current);

        self.record(
            EvolutionEvent::new(EventKind::TraitEvolution, format!("Malleable {} adjusted", name))
                .with_metadata("trait", name)
                .with_metadata("delta", delta)
                .with_metadata("previous", previous)
                .with_metadata("current", current),
        );
        current
    }

    /// Rebuilds the malleable layer according to the configured
    /// [`ResetStrategy`]. The baseline is never touched.
    pub fn reset_malleable(&mut self) {
        let (malleable, strategy) = match self.config.reset.clone() {
            ResetStrategy::Defaults => (self.config.initial_malleable(), "defaults".to_string()),
            ResetStrategy::Perturbed { bound } => {
                let bound = if bound.is_finite() {
                    bound.abs().min(MAX_PERTURBATION_BOUND)
                } else {
                    0.0
                };
                let perturbed = Trait::ALL
                    .iter()
                    .map(|name| {
                        let offset = if bound > 0.0 {
                            self.rng.gen_range(-bound..=bound)
                        } else {
                            0.0
                        };
                        (*name, self.baseline.get(*name) + offset)
                    })
                    .collect();
                (perturbed, format!("perturbed(±{})", bound))
            }
        };

        log::info!("Malleable traits reset using {}", strategy);
        self.malleable = malleable;
        self.record(
            EvolutionEvent::new(EventKind::Reset, "Malleable traits reset").with_metadata("strategy", strategy),
        );
    }

    /// Evolves the malleable layer at the configured learning rate.
    pub fn evolve(&mut self, interaction: &Interaction) -> TraitDeltas {
        self.evolve_with_rate(interaction, self.engine.learning_rate())
    }

    /// Evolves the malleable layer and returns the damped deltas applied.
    /// Interactions that yield no deltas are still recorded.
    pub fn evolve_with_rate(&mut self, interaction: &Interaction, learning_rate: f32) -> TraitDeltas {
        let (applied, observer) = self.evolve_deferred(interaction, learning_rate);
        if let Some(observer) = observer {
            notify_observer(observer.as_ref(), interaction.kind(), &applied);
        }
        applied
    }

    /// Same as [`evolve_with_rate`](Self::evolve_with_rate) but hands the
    /// live observer back instead of calling it, so callers holding a lock
    /// can notify after releasing it.
    pub fn evolve_deferred(
        &mut self,
        interaction: &Interaction,
        learning_rate: f32,
    ) -> (TraitDeltas, Option<Arc<dyn EvolutionObserver>>) {
        let effective = self.effective();
        let rate = self.engine.applied_rate(learning_rate);
        let applied = self
            .engine
            .evolve_with_rate(&mut self.malleable, interaction, &effective, rate);

        let summary = applied
            .iter()
            .map(|(name, delta)| format!("{}:{:+.4}", name, delta))
            .collect::<Vec<_>>()
            .join(",");
        log::debug!("Evolved on {}: [{}]", interaction.kind(), summary);

        self.record(
            EvolutionEvent::new(EventKind::TraitEvolution, interaction.describe())
                .with_metadata("interaction", interaction.kind())
                .with_metadata("learning_rate", rate)
                .with_metadata("changed_traits", applied.len())
                .with_metadata("deltas", summary),
        );

        let observer = self.observer.as_ref().and_then(Weak::upgrade);
        (applied, observer)
    }

    pub fn learning_rate(&self) -> f32 {
        self.engine.learning_rate()
    }

    /// Context-adjusted blend of both layers. Recomputed on every call.
    pub fn effective(&self) -> TraitVector {
        let blended = blend(&self.baseline, &self.malleable, self.config.blend.core_weight);
        match &self.context {
            Some(context) => apply_context(&blended, context),
            None => blended,
        }
    }

    /// Top `n` effective traits, highest first. Equal intensities keep
    /// trait declaration order.
    pub fn dominant_traits(&self, n: usize) -> Vec<(Trait, Intensity)> {
        let mut ranked = self.effective().ranked();
        ranked.truncate(n);
        ranked
    }

    pub fn snapshot_keys(&self) -> SnapshotKeys {
        SnapshotKeys::for_profile(self.config.identity.profile_id())
    }

    pub fn snapshot(&self) -> PersonalitySnapshot {
        PersonalitySnapshot {
            baseline: self.baseline.clone(),
            malleable: self.malleable.clone(),
            history: Some(self.history.to_vec()),
        }
    }

    /// Replaces both layers (missing traits fall back to the configured
    /// defaults) and, when present, the history. No event is recorded.
    pub fn restore(&mut self, snapshot: PersonalitySnapshot) {
        self.baseline = snapshot.baseline.merged_over(&self.config.initial_baseline());
        self.malleable = snapshot.malleable.merged_over(&self.config.initial_malleable());
        if let Some(events) = snapshot.history {
            self.history = HistoryLog::with_events(events, self.config.history.capacity);
        }
        log::info!(
            "Restored personality '{}' ({} history events)",
            self.config.identity.profile_id(),
            self.history.len()
        );
    }

    pub fn save_to(&self, storage: &dyn SnapshotStorage) -> bool {
        save_snapshot(storage, &self.snapshot_keys(), &self.snapshot())
    }

    /// Loads and restores a stored snapshot. State is untouched on failure.
    pub fn load_from(&mut self, storage: &dyn SnapshotStorage) -> bool {
        match load_snapshot(storage, &self.snapshot_keys()) {
            Ok(snapshot) => {
                self.restore(snapshot);
                true
            }
            Err(e) => {
                log::warn!("Failed to load personality '{}': {}", self.config.identity.profile_id(), e);
                false
            }
        }
    }

    fn record(&mut self, event: EvolutionEvent) {
        if let Some(evicted) = self.history.record(event) {
            log::debug!("History full, evicted event {}", evicted.id);
        }
    }
}

impl Default for PersonalityStore {
    fn default() -> Self {
        Self::new(PersonalityConfig::default())
    }
}

impl fmt::Debug for PersonalityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonalityStore")
            .field("profile", &self.config.identity.profile_id())
            .field("baseline", &self.baseline)
            .field("malleable", &self.malleable)
            .field("context", &self.context)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
