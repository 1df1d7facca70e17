use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use uuid::Uuid;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ContextChange,
    TraitEvolution,
    CoreTraitAdjustment,
    Reset,
    Initialization,
}

/// One state-changing operation. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub description: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl EvolutionEvent {
    pub fn new(kind: EventKind, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            description: description.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }
}

/// Append-only event record that keeps the most recent `capacity` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    events: VecDeque<EvolutionEvent>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a log from stored events, oldest first. Only the newest
    /// `capacity` entries are kept.
    pub fn with_events(events: Vec<EvolutionEvent>, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        for event in events {
            log.record(event);
        }
        log
    }

    /// Appends `event`, returning the evicted oldest entry when full.
    pub fn record(&mut self, event: EvolutionEvent) -> Option<EvolutionEvent> {
        let evicted = if self.events.len() >= self.capacity {
            self.events.pop_front()
        } else {
            None
        };
        self.events.push_back(event);
        evicted
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EvolutionEvent> + '_ {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&EvolutionEvent> {
        self.events.back()
    }

    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|event| event.kind == kind).count()
    }

    pub fn to_vec(&self) -> Vec<EvolutionEvent> {
        self.events.iter().cloned().collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
