use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::history::{HistoryEvent, ReconciliationEntry};
use crate::domain::project::ProjectState;
use crate::domain::results::CalculationResult;
use crate::services::autosave::{self, AutoSaveError, AutoSaveOutcome};
use crate::services::calculator::calculate;
use crate::services::config::CalculatorConfig;
use crate::services::history_log::{self, HistoryError};
use crate::services::input_reader::DefaultTable;
use crate::services::persistence::{
    DecodeOptions, Decoded, PersistenceError, apply_default_settings, decode_cable_items,
    decode_project, decode_project_value, encode_cable_items, encode_default_settings,
    encode_project, has_cable_items, keys, merge_project, reset_default_settings,
};
use crate::services::reconciliation::{ReconciliationReport, reconcile};
use crate::services::store::{KeyValueStore, StoreError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    AutoSave(#[from] AutoSaveError),
    #[error("failed to read project file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to write project file {path}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("project file {path} is not valid JSON: {source}")]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no saved project named {0}")]
    UnknownProject(String),
}

/// Where the working state came from when the session opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    AutoSave,
    SavedProject(String),
    Defaults,
}

/// Owns the configuration, the store and the working project. Every command
/// runs against one session.
pub struct Session {
    config: CalculatorConfig,
    table: DefaultTable,
    store: Box<dyn KeyValueStore>,
    pub state: ProjectState,
    pub source: LoadSource,
    load_warnings: Vec<String>,
}

/// Store-safe key fragment for a project slot name.
pub fn slot_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn load_primary(
    store: &dyn KeyValueStore,
    options: DecodeOptions<'_>,
) -> Result<Option<Decoded>, StoreError> {
    let Some(contents) = store.get(keys::PROJECT)? else {
        return Ok(None);
    };
    let value = match serde_json::from_str::<Value>(&contents) {
        Ok(value) => value,
        Err(_) => return Ok(Some(decode_project(&contents, options))),
    };
    let mut decoded = decode_project_value(&value, options);
    if !has_cable_items(&value) {
        if let Some(legacy) = store.get(keys::LEGACY_CABLE_ITEMS)? {
            let (cables, warnings) = decode_cable_items(&legacy, options);
            decoded.state.line_items.cables = cables;
            decoded.warnings.extend(warnings);
        }
    }
    Ok(Some(decoded))
}

fn load_saved(
    store: &dyn KeyValueStore,
    name: &str,
    options: DecodeOptions<'_>,
) -> Result<Option<Decoded>, StoreError> {
    Ok(store
        .get(&keys::saved_project(name))?
        .map(|contents| decode_project(&contents, options)))
}

impl Session {
    /// Restores the working project: the primary key first, then the
    /// auto-save snapshot, then the current project slot.
    pub fn open(
        config: CalculatorConfig,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, SessionError> {
        let table = config.default_table();
        let options = DecodeOptions {
            table: &table,
            placeholders: &config.legacy_placeholders,
        };

        let (decoded, source) = if let Some(decoded) = load_primary(store.as_ref(), options)? {
            (decoded, LoadSource::Primary)
        } else if let Some((saved_at, decoded)) =
            autosave::load_snapshot(store.as_ref(), options)?
        {
            info!(%saved_at, "restored auto-saved project");
            (decoded, LoadSource::AutoSave)
        } else if let Some(name) = store.get(keys::CURRENT_PROJECT)? {
            match load_saved(store.as_ref(), name.trim(), options)? {
                Some(decoded) => (decoded, LoadSource::SavedProject(name.trim().to_string())),
                None => {
                    warn!(project = %name, "current project slot is missing");
                    (Self::empty(&table), LoadSource::Defaults)
                }
            }
        } else {
            (Self::empty(&table), LoadSource::Defaults)
        };
        debug!(?source, "session opened");

        Ok(Self {
            config,
            table,
            store,
            state: decoded.state,
            source,
            load_warnings: decoded.warnings,
        })
    }

    fn empty(table: &DefaultTable) -> Decoded {
        Decoded {
            state: ProjectState::new(table.default_inputs()),
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn table(&self) -> &DefaultTable {
        &self.table
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Entries the decoder dropped or flagged while opening the project.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn calculate(&self) -> CalculationResult {
        calculate(&self.state)
    }

    /// Writes the working project under the primary key and the cable rows
    /// under the legacy key.
    pub fn save(&mut self) -> Result<(), SessionError> {
        self.store.set(keys::PROJECT, &encode_project(&self.state)?)?;
        self.store.set(
            keys::LEGACY_CABLE_ITEMS,
            &encode_cable_items(&self.state.line_items.cables)?,
        )?;
        debug!("project saved");
        Ok(())
    }

    pub fn record_event(
        &mut self,
        event_type: &str,
        detail: impl Into<String>,
    ) -> Result<(), SessionError> {
        let event = HistoryEvent {
            timestamp: Utc::now(),
            project_name: self.state.header.display_name().to_string(),
            event_type: event_type.to_string(),
            detail: detail.into(),
        };
        history_log::record_event(self.store.as_mut(), event, self.config.history.event_limit)?;
        Ok(())
    }

    pub fn events(&self) -> Result<Vec<HistoryEvent>, SessionError> {
        Ok(history_log::load_events(self.store.as_ref())?)
    }

    /// Runs a reconciliation and appends it to the history.
    pub fn reconcile(
        &mut self,
        now: DateTime<Local>,
    ) -> Result<ReconciliationReport, SessionError> {
        let result = self.calculate();
        let report = reconcile(
            &self.state,
            &result,
            self.config.reconciliation.infer_categories,
            now,
        );
        history_log::append_reconciliation(
            self.store.as_mut(),
            &report.to_entry(),
            self.config.history.reconciliation_limit,
        )?;
        info!(flag = report.flag.label(), "reconciliation recorded");
        Ok(report)
    }

    pub fn reconciliations(&self) -> Result<Vec<ReconciliationEntry>, SessionError> {
        Ok(history_log::load_reconciliations(self.store.as_ref())?)
    }

    pub fn save_project_as(&mut self, name: &str) -> Result<String, SessionError> {
        let slot = slot_name(name);
        self.store
            .set(&keys::saved_project(&slot), &encode_project(&self.state)?)?;
        self.store.set(keys::CURRENT_PROJECT, &slot)?;
        self.record_event("save", format!("Saved project as {slot}"))?;
        Ok(slot)
    }

    pub fn open_project(&mut self, name: &str) -> Result<Vec<String>, SessionError> {
        let slot = slot_name(name);
        let options = DecodeOptions {
            table: &self.table,
            placeholders: &self.config.legacy_placeholders,
        };
        let decoded = load_saved(self.store.as_ref(), &slot, options)?
            .ok_or_else(|| SessionError::UnknownProject(slot.clone()))?;
        self.state = decoded.state;
        self.store.set(keys::CURRENT_PROJECT, &slot)?;
        self.save()?;
        self.record_event("open", format!("Opened project {slot}"))?;
        Ok(decoded.warnings)
    }

    pub fn saved_projects(&self) -> Result<Vec<String>, SessionError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| {
                key.strip_prefix(keys::SAVED_PROJECT_PREFIX)
                    .map(str::to_string)
            })
            .collect())
    }

    pub fn current_project(&self) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(keys::CURRENT_PROJECT)?)
    }

    /// Merges a user-supplied project file into the working state.
    pub fn load_project_file(&mut self, path: &Path) -> Result<Vec<String>, SessionError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SessionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|source| SessionError::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;
        let options = DecodeOptions {
            table: &self.table,
            placeholders: &self.config.legacy_placeholders,
        };
        let mut state = self.state.clone();
        let warnings = merge_project(&mut state, &value, options);
        self.state = state;
        self.save()?;
        self.record_event("load", format!("Loaded project file {}", path.display()))?;
        Ok(warnings)
    }

    pub fn write_project_file(&mut self, path: &Path) -> Result<(), SessionError> {
        std::fs::write(path, encode_project(&self.state)?).map_err(|source| {
            SessionError::WriteFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.record_event("export", format!("Wrote project file {}", path.display()))?;
        Ok(())
    }

    /// Back to an empty project on the configured defaults.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.state = ProjectState::new(self.table.default_inputs());
        self.save()?;
        self.record_event("reset", "Reset project")?;
        Ok(())
    }

    pub fn auto_save_enabled(&self) -> Result<bool, SessionError> {
        Ok(autosave::is_enabled(
            self.store.as_ref(),
            self.config.auto_save.enabled,
        )?)
    }

    pub fn set_auto_save(&mut self, enabled: bool) -> Result<(), SessionError> {
        autosave::set_enabled(self.store.as_mut(), enabled)?;
        Ok(())
    }

    pub fn auto_save(&mut self, now: DateTime<Utc>) -> Result<AutoSaveOutcome, SessionError> {
        Ok(autosave::auto_save(self.store.as_mut(), &self.state, now)?)
    }

    /// Re-reads the primary key, picking up edits made by other commands
    /// since the session opened.
    pub fn reload(&mut self) -> Result<(), SessionError> {
        let options = DecodeOptions {
            table: &self.table,
            placeholders: &self.config.legacy_placeholders,
        };
        if let Some(decoded) = load_primary(self.store.as_ref(), options)? {
            self.state = decoded.state;
        }
        Ok(())
    }

    pub fn save_default_settings(&mut self) -> Result<(), SessionError> {
        self.store.set(
            keys::DEFAULT_SETTINGS,
            &encode_default_settings(&self.state.inputs)?,
        )?;
        Ok(())
    }

    /// Returns false when no default settings are stored.
    pub fn load_default_settings(&mut self) -> Result<bool, SessionError> {
        let Some(stored) = self.store.get(keys::DEFAULT_SETTINGS)? else {
            return Ok(false);
        };
        if !apply_default_settings(&mut self.state.inputs, &stored, &self.table) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn clear_default_settings(&mut self) -> Result<(), SessionError> {
        self.store.remove(keys::DEFAULT_SETTINGS)?;
        reset_default_settings(&mut self.state.inputs, &self.table);
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;
    use crate::test_support::{fixed_time, populated_state, sample_state};

    fn session_with(store: MemoryStore) -> Session {
        Session::open(CalculatorConfig::default(), Box::new(store)).unwrap()
    }

    fn store_with(key: &str, value: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(key, value).unwrap();
        store
    }

    #[test]
    fn a_first_run_starts_from_defaults() {
        let session = session_with(MemoryStore::new());
        assert_eq!(session.source, LoadSource::Defaults);
        assert_eq!(session.state.inputs.spool_length, 1000.0);
        assert!(session.load_warnings().is_empty());
    }

    #[test]
    fn a_saved_project_is_restored_from_the_primary_key() {
        let state = populated_state();
        let session = session_with(store_with(keys::PROJECT, &encode_project(&state).unwrap()));
        assert_eq!(session.source, LoadSource::Primary);
        assert_eq!(session.state, state);
    }

    #[test]
    fn a_corrupt_primary_document_degrades_to_defaults() {
        let session = session_with(store_with(keys::PROJECT, "{{{"));
        assert_eq!(session.source, LoadSource::Primary);
        assert_eq!(session.state.inputs.terminations_per_cable, 2.0);
        assert_eq!(session.load_warnings().len(), 1);
    }

    #[test]
    fn the_auto_save_snapshot_is_used_when_the_primary_key_is_missing() {
        let mut store = MemoryStore::new();
        autosave::auto_save(&mut store, &populated_state(), Utc::now()).unwrap();
        let session = session_with(store);
        assert_eq!(session.source, LoadSource::AutoSave);
        assert_eq!(session.state, populated_state());
    }

    #[test]
    fn the_current_project_slot_is_the_last_fallback() {
        let mut store = store_with(
            &keys::saved_project("studio_b"),
            &encode_project(&sample_state()).unwrap(),
        );
        store.set(keys::CURRENT_PROJECT, "studio_b").unwrap();
        let session = session_with(store);
        assert_eq!(session.source, LoadSource::SavedProject("studio_b".into()));
        assert_eq!(session.state.header.project_name, "Sample Install");
    }

    #[test]
    fn legacy_documents_pick_up_cable_rows_from_the_secondary_key() {
        let mut store = store_with(keys::PROJECT, r#"{ "inputs": { "numCables": "5" } }"#);
        store
            .set(
                keys::LEGACY_CABLE_ITEMS,
                r#"[ { "cableType": "1855", "qty": "3", "length": "20" }, { "cableType": "cat6", "qty": "75", "length": "10" } ]"#,
            )
            .unwrap();
        let session = session_with(store);
        assert_eq!(session.state.inputs.num_cables, 5.0);
        assert_eq!(session.state.line_items.cables.len(), 1);
        assert_eq!(session.load_warnings().len(), 1);
    }

    #[test]
    fn saving_writes_the_primary_and_legacy_keys() {
        let mut session = session_with(MemoryStore::new());
        session.state = populated_state();
        session.save().unwrap();
        assert!(session.store().get(keys::PROJECT).unwrap().is_some());
        let legacy = session.store().get(keys::LEGACY_CABLE_ITEMS).unwrap().unwrap();
        assert!(legacy.contains("\"1694\""));
    }

    #[test]
    fn named_projects_can_be_saved_listed_and_reopened() {
        let mut session = session_with(MemoryStore::new());
        session.state = populated_state();
        assert_eq!(session.save_project_as("Studio B").unwrap(), "Studio_B");

        session.reset().unwrap();
        assert_eq!(session.state.header.project_name, "");
        assert_eq!(
            session.saved_projects().unwrap(),
            vec!["Studio_B".to_string()]
        );
        assert_eq!(
            session.current_project().unwrap().as_deref(),
            Some("Studio_B")
        );

        session.open_project("Studio B").unwrap();
        assert_eq!(session.state, populated_state());
        assert!(matches!(
            session.open_project("missing"),
            Err(SessionError::UnknownProject(_))
        ));

        let events: Vec<String> = session
            .events()
            .unwrap()
            .into_iter()
            .map(|event| event.event_type)
            .collect();
        assert_eq!(events, vec!["open", "reset", "save"]);
    }

    #[test]
    fn reconciliation_runs_are_appended_to_the_history() {
        let mut session = session_with(MemoryStore::new());
        session.state = sample_state();
        session.state.vendors.add_item(1, "BNC connector", 5.0, 1.0, None);
        let report = session.reconcile(fixed_time()).unwrap();
        session.reconcile(fixed_time()).unwrap();
        let history = session.reconciliations().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].flag, report.flag);
        assert_eq!(history[0].ordered_connectors, 5.0);
    }

    #[test]
    fn project_files_merge_into_the_working_state() {
        let file = assert_fs::NamedTempFile::new("project.json").unwrap();
        std::fs::write(
            file.path(),
            r#"{ "version": 2, "header": { "project_name": "Imported" }, "inputs": { "num_cables": 3 } }"#,
        )
        .unwrap();
        let mut session = session_with(MemoryStore::new());
        session.state = populated_state();
        let warnings = session.load_project_file(file.path()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(session.state.header.project_name, "Imported");
        assert_eq!(session.state.header.customer_name, "Riverside Studios");
        assert_eq!(session.state.inputs.num_cables, 3.0);
        assert_eq!(session.state.line_items, populated_state().line_items);
    }

    #[test]
    fn an_invalid_project_file_leaves_the_state_alone() {
        let file = assert_fs::NamedTempFile::new("broken.json").unwrap();
        std::fs::write(file.path(), "not json").unwrap();
        let mut session = session_with(MemoryStore::new());
        session.state = populated_state();
        assert!(matches!(
            session.load_project_file(file.path()),
            Err(SessionError::ParseFile { .. })
        ));
        assert_eq!(session.state, populated_state());
    }

    #[test]
    fn default_settings_can_be_saved_loaded_and_cleared() {
        let mut session = session_with(MemoryStore::new());
        assert!(!session.load_default_settings().unwrap());
        session.state.inputs.waste_factor = 15.0;
        session.save_default_settings().unwrap();

        session.reset().unwrap();
        assert_eq!(session.state.inputs.waste_factor, 7.5);
        assert!(session.load_default_settings().unwrap());
        assert_eq!(session.state.inputs.waste_factor, 15.0);

        session.clear_default_settings().unwrap();
        assert_eq!(session.state.inputs.waste_factor, 7.5);
        assert!(!session.load_default_settings().unwrap());
    }
}
