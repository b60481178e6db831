use tracing::warn;

use crate::commands::base_commands::{DefaultsAction, ProjectAction, Switch};
use crate::commands::report_format::format_history;
use crate::commands::{CommandError, finish_edit, with_warnings};
use crate::services::session::Session;

pub fn project_command(
    session: &mut Session,
    action: ProjectAction,
) -> Result<String, CommandError> {
    match action {
        ProjectAction::Save { name } => {
            let slot = session.save_project_as(&name)?;
            Ok(format!("Project saved as {slot}"))
        }
        ProjectAction::Open { name } => {
            let warnings = session.open_project(&name)?;
            let message = format!("Opened project {}", session.state.header.display_name());
            finish_edit(session, with_warnings(message, &warnings))
        }
        ProjectAction::List => {
            let current = session.current_project()?;
            let names = session.saved_projects()?;
            if names.is_empty() {
                return Ok("No saved projects".to_string());
            }
            Ok(names
                .into_iter()
                .map(|name| {
                    if current.as_deref() == Some(name.as_str()) {
                        format!("* {name}")
                    } else {
                        format!("  {name}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        ProjectAction::Load { input } => {
            let warnings = session.load_project_file(&input)?;
            let message = format!("Project data loaded from {}", input.display());
            finish_edit(session, with_warnings(message, &warnings))
        }
        ProjectAction::Write { output } => {
            session.write_project_file(&output)?;
            Ok(format!("Project written to {}", output.display()))
        }
    }
}

pub fn defaults_command(
    session: &mut Session,
    action: DefaultsAction,
) -> Result<String, CommandError> {
    match action {
        DefaultsAction::Save => {
            session.save_default_settings()?;
            Ok("Default settings saved".to_string())
        }
        DefaultsAction::Load => {
            if session.load_default_settings()? {
                finish_edit(session, "Default settings applied".to_string())
            } else {
                warn!("no stored default settings");
                Ok("No default settings stored".to_string())
            }
        }
        DefaultsAction::Clear => {
            session.clear_default_settings()?;
            finish_edit(session, "Default settings cleared".to_string())
        }
    }
}

pub fn history_command(session: &Session) -> Result<String, CommandError> {
    Ok(format_history(&session.events()?))
}

pub fn auto_save_command(session: &mut Session, state: Switch) -> Result<String, CommandError> {
    let enabled = state == Switch::On;
    session.set_auto_save(enabled)?;
    Ok(format!(
        "Auto-save {}",
        if enabled { "enabled" } else { "disabled" }
    ))
}
