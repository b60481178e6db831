use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::history::{HistoryEvent, ReconciliationEntry, ReconciliationFlag};
use crate::services::persistence::keys;
use crate::services::store::{KeyValueStore, StoreError};

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct EventRecord {
    timestamp: DateTime<Utc>,
    project_name: String,
    event_type: String,
    #[serde(default)]
    detail: String,
}

#[derive(Serialize, Deserialize)]
struct ReconciliationRecord {
    timestamp: DateTime<Utc>,
    project: String,
    status: String,
    #[serde(default)]
    required_connectors: f64,
    #[serde(default)]
    ordered_connectors: f64,
    #[serde(default)]
    cable_calculated: f64,
    #[serde(default)]
    cable_ordered: f64,
    #[serde(default)]
    report: String,
}

fn load_records<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    let Some(contents) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let entries: Vec<serde_json::Value> = match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, "discarding malformed history: {e}");
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, "dropping malformed history entry: {e}");
                None
            }
        })
        .collect())
}

fn event_from_record(record: EventRecord) -> HistoryEvent {
    HistoryEvent {
        timestamp: record.timestamp,
        project_name: record.project_name,
        event_type: record.event_type,
        detail: record.detail,
    }
}

/// Event log, newest first.
pub fn load_events(store: &dyn KeyValueStore) -> Result<Vec<HistoryEvent>, StoreError> {
    let records: Vec<EventRecord> = load_records(store, keys::PROJECT_HISTORY)?;
    Ok(records.into_iter().map(event_from_record).collect())
}

/// Puts `event` at the front of the log and keeps at most `limit` entries.
pub fn record_event(
    store: &mut dyn KeyValueStore,
    event: HistoryEvent,
    limit: usize,
) -> Result<(), HistoryError> {
    let mut records: Vec<EventRecord> = load_records(store, keys::PROJECT_HISTORY)?;
    records.insert(
        0,
        EventRecord {
            timestamp: event.timestamp,
            project_name: event.project_name,
            event_type: event.event_type,
            detail: event.detail,
        },
    );
    records.truncate(limit);
    store.set(
        keys::PROJECT_HISTORY,
        &serde_json::to_string_pretty(&records)?,
    )?;
    Ok(())
}

fn reconciliation_from_record(record: ReconciliationRecord) -> ReconciliationEntry {
    ReconciliationEntry {
        timestamp: record.timestamp,
        project: record.project,
        flag: ReconciliationFlag::from_label(&record.status),
        required_connectors: record.required_connectors,
        ordered_connectors: record.ordered_connectors,
        cable_calculated: record.cable_calculated,
        cable_ordered: record.cable_ordered,
        report: record.report,
    }
}

/// Reconciliation runs, oldest first.
pub fn load_reconciliations(
    store: &dyn KeyValueStore,
) -> Result<Vec<ReconciliationEntry>, StoreError> {
    let records: Vec<ReconciliationRecord> = load_records(store, keys::RECONCILIATION_HISTORY)?;
    Ok(records.into_iter().map(reconciliation_from_record).collect())
}

/// Appends `entry`, evicting the oldest runs beyond `limit`.
pub fn append_reconciliation(
    store: &mut dyn KeyValueStore,
    entry: &ReconciliationEntry,
    limit: usize,
) -> Result<(), HistoryError> {
    let mut records: Vec<ReconciliationRecord> = load_records(store, keys::RECONCILIATION_HISTORY)?;
    records.push(ReconciliationRecord {
        timestamp: entry.timestamp,
        project: entry.project.clone(),
        status: entry.flag.label().to_string(),
        required_connectors: entry.required_connectors,
        ordered_connectors: entry.ordered_connectors,
        cable_calculated: entry.cable_calculated,
        cable_ordered: entry.cable_ordered,
        report: entry.report.clone(),
    });
    if records.len() > limit {
        let excess = records.len() - limit;
        records.drain(..excess);
    }
    store.set(
        keys::RECONCILIATION_HISTORY,
        &serde_json::to_string_pretty(&records)?,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;
    use crate::test_support::fixed_time;

    fn event(n: usize) -> HistoryEvent {
        HistoryEvent {
            timestamp: fixed_time().with_timezone(&Utc),
            project_name: "Sample Install".into(),
            event_type: "save".into(),
            detail: format!("event {n}"),
        }
    }

    fn entry(n: usize) -> ReconciliationEntry {
        ReconciliationEntry {
            timestamp: fixed_time().with_timezone(&Utc),
            project: format!("Project {n}"),
            flag: ReconciliationFlag::Shortages,
            required_connectors: 40.0,
            ordered_connectors: 30.0,
            cable_calculated: 0.0,
            cable_ordered: 0.0,
            report: String::new(),
        }
    }

    #[test]
    fn the_event_log_keeps_the_newest_entries_first() {
        let mut store = MemoryStore::new();
        for n in 0..5 {
            record_event(&mut store, event(n), 3).unwrap();
        }
        let details: Vec<String> = load_events(&store)
            .unwrap()
            .into_iter()
            .map(|event| event.detail)
            .collect();
        assert_eq!(details, vec!["event 4", "event 3", "event 2"]);
    }

    #[test]
    fn reconciliation_history_evicts_the_oldest_runs() {
        let mut store = MemoryStore::new();
        for n in 0..55 {
            append_reconciliation(&mut store, &entry(n), 50).unwrap();
        }
        let history = load_reconciliations(&store).unwrap();
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].project, "Project 5");
        assert_eq!(history[49].project, "Project 54");
        assert_eq!(history[49].flag, ReconciliationFlag::Shortages);
    }

    #[test]
    fn a_corrupt_history_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::PROJECT_HISTORY, "not json").unwrap();
        assert!(load_events(&store).unwrap().is_empty());
        record_event(&mut store, event(1), 100).unwrap();
        assert_eq!(load_events(&store).unwrap().len(), 1);
    }
}
