use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::domain::history::ReconciliationEntry;
use crate::domain::line_items::CostCategory;
use crate::domain::project::{ProjectHeader, ProjectState};
use crate::domain::results::CalculationResult;
use crate::services::calculator::category_cost;
use crate::services::cost_aggregator::vendor_order_total;
use crate::services::formatting::{format_currency, format_hours, summary_cards};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("reconciliation history is empty")]
    EmptyHistory,
}

pub type Sheet = Vec<Vec<String>>;

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// `Project_Name_2026-10-14_Export`: the project name with everything but
/// letters and digits replaced.
pub fn export_file_stem(header: &ProjectHeader, date: NaiveDate, action: &str) -> String {
    let name: String = header
        .project_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let name = if name.trim_matches('_').is_empty() {
        "Project".to_string()
    } else {
        name
    };
    format!("{name}_{}_{action}", date.format("%Y-%m-%d"))
}

pub fn summary_sheet(header: &ProjectHeader, result: &CalculationResult) -> Sheet {
    let mut sheet = vec![
        row(["Project Summary"]),
        row(["Project Name:", header.project_name.as_str()]),
        row(["Project Number:", header.project_number.as_str()]),
        row(["Customer:", header.customer_name.as_str()]),
        row(["Date:", header.date.as_str()]),
        Vec::new(),
        row(["Summary Cards"]),
    ];
    sheet.extend(
        summary_cards(result)
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value]),
    );
    sheet
}

pub fn breakdown_sheet(state: &ProjectState, result: &CalculationResult) -> Sheet {
    let mut sheet = vec![row(["Calculator Breakdown"]), row(["Category", "Amount"])];
    sheet.push(vec!["Labor Cost".to_string(), format_currency(result.labor_cost)]);
    for category in CostCategory::ALL {
        sheet.push(vec![
            category.label().to_string(),
            format_currency(category_cost(result, category)),
        ]);
    }
    sheet.push(vec![
        "Pending Quotes".to_string(),
        format_currency(result.pending_quotes_total),
    ]);
    sheet.push(vec![
        "Approved Quotes".to_string(),
        format_currency(result.approved_quotes_total),
    ]);
    sheet.push(vec![
        "Active Orders".to_string(),
        format_currency(result.active_vendor_total),
    ]);
    sheet.push(vec![
        "Total Project Cost".to_string(),
        format_currency(result.grand_total),
    ]);
    sheet.push(Vec::new());

    sheet.push(row(["Time Breakdown"]));
    sheet.push(row(["Activity", "Hours"]));
    for (label, hours) in result.breakdown.activities() {
        sheet.push(vec![label.to_string(), format_hours(hours)]);
    }
    sheet.push(vec!["Total".to_string(), format_hours(result.breakdown.total)]);
    sheet.push(Vec::new());

    sheet.push(row(["Vendor Breakdown"]));
    sheet.push(row(["Vendor", "Status", "Items", "Total"]));
    for (index, vendor) in state.vendors.vendors.iter().enumerate() {
        let status = if vendor.active { "Active" } else { "Inactive" };
        sheet.push(vec![
            vendor.display_name(index + 1),
            status.to_string(),
            vendor.items.len().to_string(),
            format_currency(vendor_order_total(vendor)),
        ]);
    }
    sheet
}

fn csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub fn sheet_to_csv(sheet: &Sheet) -> String {
    let mut csv = String::new();
    for cells in sheet {
        let line: Vec<String> = cells.iter().map(|cell| csv_cell(cell)).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }
    csv
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf, ExportError> {
    std::fs::write(&path, contents).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Writes the Summary and Breakdown sheets as `<stem>_Summary.csv` and
/// `<stem>_Breakdown.csv` under `dir`.
pub fn write_workbook(
    dir: &Path,
    stem: &str,
    state: &ProjectState,
    result: &CalculationResult,
) -> Result<Vec<PathBuf>, ExportError> {
    let summary = sheet_to_csv(&summary_sheet(&state.header, result));
    let breakdown = sheet_to_csv(&breakdown_sheet(state, result));
    Ok(vec![
        write_file(dir.join(format!("{stem}_Summary.csv")), &summary)?,
        write_file(dir.join(format!("{stem}_Breakdown.csv")), &breakdown)?,
    ])
}

pub fn reconciliation_history_csv(entries: &[ReconciliationEntry]) -> Result<String, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::EmptyHistory);
    }
    let mut sheet = vec![row(["Date", "Time", "Project", "Status"])];
    for entry in entries {
        let local = entry.timestamp.with_timezone(&Local);
        sheet.push(vec![
            local.format("%Y-%m-%d").to_string(),
            local.format("%H:%M:%S").to_string(),
            entry.project.clone(),
            entry.flag.label().to_string(),
        ]);
    }
    Ok(sheet_to_csv(&sheet))
}

pub fn current_reconciliation_csv(report: &str) -> String {
    let mut sheet = vec![row(["Current Reconciliation Report"])];
    sheet.extend(report.lines().map(|line| vec![line.to_string()]));
    sheet_to_csv(&sheet)
}

pub fn write_csv(path: &Path, contents: &str) -> Result<PathBuf, ExportError> {
    write_file(path.to_path_buf(), contents)
}
