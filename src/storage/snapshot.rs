use super::port::{Blob, SnapshotError, SnapshotStorage};
use crate::modules::history::EvolutionEvent;
use crate::modules::traits::{Trait, TraitVector};

/// Persisted state of one personality: the two trait layers and, when
/// known, the event history (oldest first).
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalitySnapshot {
    pub baseline: TraitVector,
    pub malleable: TraitVector,
    pub history: Option<Vec<EvolutionEvent>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKeys {
    pub baseline: String,
    pub malleable: String,
    pub history: String,
}

impl SnapshotKeys {
    pub fn for_profile(profile_id: &str) -> Self {
        Self {
            baseline: format!("{}.baseline", profile_id),
            malleable: format!("{}.malleable", profile_id),
            history: format!("{}.history", profile_id),
        }
    }
}

pub fn encode_vector(vector: &TraitVector) -> Result<Blob, SnapshotError> {
    Ok(serde_json::to_value(vector)?)
}

/// Accepts any JSON object; unknown trait names and non-numeric values are
/// skipped and intensities are clamped.
pub fn decode_vector(key: &str, blob: &Blob) -> Result<TraitVector, SnapshotError> {
    let entries = blob.as_object().ok_or_else(|| SnapshotError::Malformed {
        key: key.to_string(),
        reason: "expected an object of trait intensities".to_string(),
    })?;

    let mut vector = TraitVector::new();
    for (raw_name, raw_value) in entries {
        let name = match raw_name.parse::<Trait>() {
            Ok(name) => name,
            Err(e) => {
                log::debug!("Snapshot '{}': {}", key, e);
                continue;
            }
        };
        match raw_value.as_f64() {
            Some(value) => {
                vector.set(name, value as f32);
            }
            None => log::debug!("Snapshot '{}': non-numeric value for {}", key, name),
        }
    }

    Ok(vector)
}

pub fn encode_history(events: &[EvolutionEvent]) -> Result<Blob, SnapshotError> {
    Ok(serde_json::to_value(events)?)
}

/// Accepts a JSON array of events, keeping order and dropping entries that
/// do not decode.
pub fn decode_history(key: &str, blob: &Blob) -> Result<Vec<EvolutionEvent>, SnapshotError> {
    let entries = blob.as_array().ok_or_else(|| SnapshotError::Malformed {
        key: key.to_string(),
        reason: "expected an array of events".to_string(),
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<EvolutionEvent>(entry.clone()) {
            Ok(event) => Some(event),
            Err(e) => {
                log::debug!("Snapshot '{}': dropping event: {}", key, e);
                None
            }
        })
        .collect())
}

fn encode_snapshot<'k>(
    keys: &'k SnapshotKeys,
    snapshot: &PersonalitySnapshot,
) -> Result<Vec<(&'k str, Blob)>, SnapshotError> {
    let mut blobs = vec![
        (keys.baseline.as_str(), encode_vector(&snapshot.baseline)?),
        (keys.malleable.as_str(), encode_vector(&snapshot.malleable)?),
    ];
    if let Some(events) = &snapshot.history {
        blobs.push((keys.history.as_str(), encode_history(events)?));
    }
    Ok(blobs)
}

/// Writes every blob of `snapshot`. Returns `true` only if all writes
/// succeeded.
pub fn save_snapshot(storage: &dyn SnapshotStorage, keys: &SnapshotKeys, snapshot: &PersonalitySnapshot) -> bool {
    let blobs = match encode_snapshot(keys, snapshot) {
        Ok(blobs) => blobs,
        Err(e) => {
            log::warn!("Failed to encode personality snapshot: {}", e);
            return false;
        }
    };

    blobs
        .iter()
        .fold(true, |all_saved, (key, blob)| storage.save(key, blob) && all_saved)
}

/// Reads both trait layers and, if present, the history. Missing or
/// malformed layers are an error; a missing history yields `None`.
pub fn load_snapshot(storage: &dyn SnapshotStorage, keys: &SnapshotKeys) -> Result<PersonalitySnapshot, SnapshotError> {
    let baseline_blob = storage
        .load(&keys.baseline)
        .ok_or_else(|| SnapshotError::Missing(keys.baseline.clone()))?;
    let malleable_blob = storage
        .load(&keys.malleable)
        .ok_or_else(|| SnapshotError::Missing(keys.malleable.clone()))?;

    let baseline = decode_vector(&keys.baseline, &baseline_blob)?;
    let malleable = decode_vector(&keys.malleable, &malleable_blob)?;

    let history = match storage.load(&keys.history) {
        Some(blob) => Some(decode_history(&keys.history, &blob)?),
        None => None,
    };

    Ok(PersonalitySnapshot {
        baseline,
        malleable,
        history,
    })
}
