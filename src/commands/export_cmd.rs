use std::path::PathBuf;

use chrono::Local;

use crate::commands::CommandError;
use crate::commands::base_commands::ExportAction;
use crate::services::chart::{ChartKind, render_chart_png};
use crate::services::export::{
    ExportError, current_reconciliation_csv, export_file_stem, reconciliation_history_csv,
    write_csv, write_workbook,
};
use crate::services::session::Session;

fn output_or(output: Option<PathBuf>, session: &Session, action: &str, extension: &str) -> PathBuf {
    output.unwrap_or_else(|| {
        let stem = export_file_stem(&session.state.header, Local::now().date_naive(), action);
        PathBuf::from(format!("{stem}.{extension}"))
    })
}

pub fn export_command(session: &mut Session, action: ExportAction) -> Result<String, CommandError> {
    match action {
        ExportAction::Workbook { dir } => {
            let stem = export_file_stem(&session.state.header, Local::now().date_naive(), "Export");
            let result = session.calculate();
            let paths = write_workbook(&dir, &stem, &session.state, &result)?;
            let written: Vec<String> =
                paths.iter().map(|path| path.display().to_string()).collect();
            session.record_event("export", format!("Workbook {stem}"))?;
            Ok(format!("Workbook written to {}", written.join(", ")))
        }
        ExportAction::ReconciliationHistory { output } => {
            let csv = reconciliation_history_csv(&session.reconciliations()?)?;
            let path = write_csv(
                &output_or(output, session, "Reconciliation_History", "csv"),
                &csv,
            )?;
            Ok(format!("Reconciliation history written to {}", path.display()))
        }
        ExportAction::Reconciliation { output } => {
            // The last run is the one on screen; exporting never runs a new one.
            let entry = session
                .reconciliations()?
                .pop()
                .ok_or(ExportError::EmptyHistory)?;
            let path = write_csv(
                &output_or(output, session, "Reconciliation", "csv"),
                &current_reconciliation_csv(&entry.report),
            )?;
            session.record_event("export", format!("Reconciliation {}", entry.flag.label()))?;
            Ok(format!("Reconciliation report written to {}", path.display()))
        }
        ExportAction::Chart { kind, output } => {
            let kind = ChartKind::from(kind);
            let action = match kind {
                ChartKind::Time => "Time_Breakdown",
                ChartKind::Cost => "Cost_Analysis",
            };
            let path = output_or(output, session, action, "png");
            render_chart_png(&path, kind, &session.calculate())?;
            Ok(format!("Chart written to {}", path.display()))
        }
    }
}
