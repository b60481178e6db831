use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::project::ProjectState;
use crate::services::persistence::{
    DecodeOptions, Decoded, PersistenceError, decode_project_value, keys, project_to_value,
};
use crate::services::store::{KeyValueStore, StoreError};

#[derive(Error, Debug)]
pub enum AutoSaveError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    saved_at: DateTime<Utc>,
    project: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    Saved,
    Unchanged,
}

fn read_snapshot(store: &dyn KeyValueStore) -> Result<Option<SnapshotRecord>, StoreError> {
    let Some(contents) = store.get(keys::AUTO_SAVE)? else {
        return Ok(None);
    };
    match serde_json::from_str(&contents) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(e) => {
            warn!("discarding malformed auto-save snapshot: {e}");
            Ok(None)
        }
    }
}

/// Writes a snapshot unless the stored one already holds the same project.
/// Running it twice on unchanged state is a no-op.
pub fn auto_save(
    store: &mut dyn KeyValueStore,
    state: &ProjectState,
    now: DateTime<Utc>,
) -> Result<AutoSaveOutcome, AutoSaveError> {
    let project = project_to_value(state)?;
    if let Some(previous) = read_snapshot(store)? {
        if previous.project == project {
            debug!("auto-save skipped, project unchanged");
            return Ok(AutoSaveOutcome::Unchanged);
        }
    }
    let snapshot = SnapshotRecord {
        saved_at: now,
        project,
    };
    store.set(keys::AUTO_SAVE, &serde_json::to_string_pretty(&snapshot)?)?;
    debug!(%now, "auto-saved project");
    Ok(AutoSaveOutcome::Saved)
}

pub fn load_snapshot(
    store: &dyn KeyValueStore,
    options: DecodeOptions<'_>,
) -> Result<Option<(DateTime<Utc>, Decoded)>, StoreError> {
    Ok(read_snapshot(store)?
        .map(|snapshot| (snapshot.saved_at, decode_project_value(&snapshot.project, options))))
}

pub fn is_enabled(store: &dyn KeyValueStore, default: bool) -> Result<bool, StoreError> {
    Ok(store
        .get(keys::AUTO_SAVE_ENABLED)?
        .and_then(|value| value.trim().parse::<bool>().ok())
        .unwrap_or(default))
}

pub fn set_enabled(store: &mut dyn KeyValueStore, enabled: bool) -> Result<(), StoreError> {
    store.set(keys::AUTO_SAVE_ENABLED, &enabled.to_string())
}
