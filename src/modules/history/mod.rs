pub mod event_log;

pub use event_log::{EventKind, EvolutionEvent, HistoryLog, DEFAULT_HISTORY_CAPACITY};
