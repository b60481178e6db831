use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::commands::report_format::{format_calculation_report, format_total_line};
use crate::services::autosave::AutoSaveOutcome;
use crate::services::chart::ChartError;
use crate::services::config::ConfigError;
use crate::services::export::ExportError;
use crate::services::session::{Session, SessionError};

pub mod base_commands;
pub mod edit_cmd;
pub mod export_cmd;
pub mod project_cmd;
pub mod reconcile_cmd;
pub mod report_format;
pub mod vendor_cmd;
pub mod watch_cmd;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("{0}")]
    Invalid(String),
}

/// Persists the edited project, takes an auto-save snapshot when enabled and
/// appends the new project total to `message`.
pub fn finish_edit(session: &mut Session, message: String) -> Result<String, CommandError> {
    session.save()?;
    if session.auto_save_enabled()? {
        let outcome = session.auto_save(Utc::now())?;
        debug!(
            saved = outcome == AutoSaveOutcome::Saved,
            "auto-save after edit"
        );
    }
    let result = session.calculate();
    Ok(format!("{message}\n{}", format_total_line(&result)))
}

/// Appends the recoveries the decoder made while loading, if any.
pub fn with_warnings(message: String, warnings: &[String]) -> String {
    if warnings.is_empty() {
        return message;
    }
    let noun = match warnings.len() {
        1 => "entry",
        _ => "entries",
    };
    let mut lines = vec![message, format!("{} {noun} recovered:", warnings.len())];
    lines.extend(warnings.iter().map(|warning| format!("  {warning}")));
    lines.join("\n")
}

pub fn calculate_command(session: &Session) -> String {
    let report = format_calculation_report(&session.state, &session.calculate());
    with_warnings(report, session.load_warnings())
}
