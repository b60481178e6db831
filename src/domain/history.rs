use chrono::{DateTime, Utc};

/// One entry of the project event log.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    pub project_name: String,
    pub event_type: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationFlag {
    Ok,
    Shortages,
}

impl ReconciliationFlag {
    pub fn label(self) -> &'static str {
        match self {
            ReconciliationFlag::Ok => "OK",
            ReconciliationFlag::Shortages => "SHORTAGES",
        }
    }

    pub fn from_label(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("shortages") {
            ReconciliationFlag::Shortages
        } else {
            ReconciliationFlag::Ok
        }
    }
}

/// A stored reconciliation run. Entries are never edited after they are
/// appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationEntry {
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub flag: ReconciliationFlag,
    pub required_connectors: f64,
    pub ordered_connectors: f64,
    pub cable_calculated: f64,
    pub cable_ordered: f64,
    pub report: String,
}
