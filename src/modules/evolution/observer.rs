use super::engine::InteractionKind;
use crate::modules::traits::TraitDeltas;

/// Passive listener notified after every evolution with the damped deltas
/// that were applied. Errors are logged by the caller and otherwise ignored.
pub trait EvolutionObserver: Send + Sync {
    fn observe_evolution(&self, kind: InteractionKind, deltas: &TraitDeltas) -> Result<(), String>;
}

/// Delivers one notification, logging a failure at warn.
pub fn notify_observer(observer: &dyn EvolutionObserver, kind: InteractionKind, deltas: &TraitDeltas) {
    if let Err(e) = observer.observe_evolution(kind, deltas) {
        log::warn!("Evolution observer failed for {}: {}", kind, e);
    }
}
