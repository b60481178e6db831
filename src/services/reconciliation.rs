use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info};

use crate::domain::cable::CableType;
use crate::domain::history::{ReconciliationEntry, ReconciliationFlag};
use crate::domain::project::ProjectState;
use crate::domain::results::CalculationResult;
use crate::domain::vendor::{ItemCategory, VendorBook, VendorItem};

const CONNECTOR_KEYWORDS: [&str; 3] = ["bnc", "connector", "termination"];
const CABLE_KEYWORDS: [&str; 11] = [
    "cable",
    "coax",
    "1855",
    "1505",
    "1694",
    "cat6",
    "cat 6",
    "category 6",
    "cat5",
    "cat 5",
    "category 5",
];

/// Keyword classification of a free-text vendor item description. Used for
/// items that were entered without an explicit category.
pub fn classify_description(description: &str) -> Option<ItemCategory> {
    let text = description.to_lowercase();
    if CONNECTOR_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return Some(ItemCategory::Connector);
    }
    if !CABLE_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return None;
    }
    let cable_type = if text.contains("1855") {
        CableType::Rg1855
    } else if text.contains("1505") {
        CableType::Rg1505
    } else if text.contains("1694") {
        CableType::Rg1694
    } else if ["cat6", "cat 6", "category 6"]
        .iter()
        .any(|keyword| text.contains(keyword))
    {
        CableType::Cat6
    } else {
        CableType::Other
    };
    Some(ItemCategory::Cable(cable_type))
}

pub fn item_category(item: &VendorItem, infer: bool) -> Option<ItemCategory> {
    item.category
        .or_else(|| infer.then(|| classify_description(&item.description)).flatten())
}

/// Writes inferred categories into every item that has none yet. Returns the
/// number of items that were classified.
pub fn classify_uncategorized(book: &mut VendorBook) -> usize {
    let mut classified = 0;
    for item in book.items_mut() {
        if item.category.is_some() {
            continue;
        }
        if let Some(category) = classify_description(&item.description) {
            item.category = Some(category);
            classified += 1;
        }
    }
    info!(classified, "classified vendor items");
    classified
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedQuantities {
    pub connectors: f64,
    pub cable: f64,
    pub by_type: BTreeMap<CableType, f64>,
}

/// Quantities ordered from active vendors, by reconciliation class.
pub fn ordered_quantities(book: &VendorBook, infer: bool) -> OrderedQuantities {
    let mut ordered = OrderedQuantities::default();
    for (_, vendor) in book.active_vendors() {
        for item in &vendor.items {
            match item_category(item, infer) {
                Some(ItemCategory::Connector) => ordered.connectors += item.qty,
                Some(ItemCategory::Cable(cable_type)) => {
                    ordered.cable += item.qty;
                    *ordered.by_type.entry(cable_type).or_insert(0.0) += item.qty;
                }
                Some(ItemCategory::Other) | None => {}
            }
        }
    }
    ordered
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantityCheck {
    pub required: f64,
    pub ordered: f64,
}

impl QuantityCheck {
    /// Positive when over-ordered, negative when short.
    pub fn difference(&self) -> f64 {
        self.ordered - self.required
    }

    pub fn is_short(&self) -> bool {
        self.ordered < self.required
    }

    pub fn status_line(&self) -> String {
        let difference = self.difference();
        if difference > 0.0 {
            format!("Over-ordered: {difference} extra")
        } else if difference < 0.0 {
            format!("NEED TO ORDER: {} more", -difference)
        } else {
            "Perfect match".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationReport {
    pub timestamp: DateTime<Local>,
    pub project: String,
    pub active_vendors: Vec<String>,
    pub connectors: QuantityCheck,
    pub cable: QuantityCheck,
    pub by_type: Vec<(CableType, QuantityCheck)>,
    pub flag: ReconciliationFlag,
}

impl ReconciliationReport {
    pub fn quick_status(&self) -> String {
        let mark = |check: &QuantityCheck| if check.is_short() { "short" } else { "ok" };
        match self.flag {
            ReconciliationFlag::Ok => "All quantities reconciled".to_string(),
            ReconciliationFlag::Shortages => format!(
                "Quantity mismatches detected (connectors {}, cable {})",
                mark(&self.connectors),
                mark(&self.cable)
            ),
        }
    }

    pub fn text(&self) -> String {
        let mut lines = vec![
            "=== CONNECTOR/TERMINATION RECONCILIATION ===".to_string(),
            format!("Reconciliation Date: {}", self.timestamp.format("%Y-%m-%d")),
            format!("Reconciliation Time: {}", self.timestamp.format("%H:%M:%S")),
            format!("Project: {}", self.project),
            format!(
                "Active Vendors ({}): {}",
                self.active_vendors.len(),
                self.active_vendors.join(", ")
            ),
            String::new(),
            format!("Total terminations required: {}", self.connectors.required),
            String::new(),
            "BNC Connectors/Terminations:".to_string(),
        ];
        push_check(&mut lines, &self.connectors);
        lines.push("=== CABLE QUANTITY RECONCILIATION ===".to_string());
        lines.push(format!("Cable ordered: {}ft", self.cable.ordered));
        lines.push(format!("Calculated need: {}ft", self.cable.required));
        lines.push(format!("  {}", self.cable.status_line()));
        lines.push(String::new());
        if !self.by_type.is_empty() {
            lines.push("=== CABLE TYPE BREAKDOWN ===".to_string());
            for (cable_type, check) in &self.by_type {
                lines.push(format!("{cable_type} Cable:"));
                push_check(&mut lines, check);
            }
        }
        lines.join("\n")
    }

    pub fn to_entry(&self) -> ReconciliationEntry {
        ReconciliationEntry {
            timestamp: self.timestamp.with_timezone(&Utc),
            project: self.project.clone(),
            flag: self.flag,
            required_connectors: self.connectors.required,
            ordered_connectors: self.connectors.ordered,
            cable_calculated: self.cable.required,
            cable_ordered: self.cable.ordered,
            report: self.text(),
        }
    }
}

fn push_check(lines: &mut Vec<String>, check: &QuantityCheck) {
    lines.push(format!("  Required: {}", check.required));
    lines.push(format!("  Ordered: {}", check.ordered));
    lines.push(format!("  {}", check.status_line()));
    lines.push(String::new());
}

/// Compares what the project needs with what is on order from active
/// vendors.
pub fn reconcile(
    state: &ProjectState,
    result: &CalculationResult,
    infer: bool,
    now: DateTime<Local>,
) -> ReconciliationReport {
    let ordered = ordered_quantities(&state.vendors, infer);
    let connectors = QuantityCheck {
        required: result.total_cables * state.inputs.terminations_per_cable,
        ordered: ordered.connectors,
    };
    let cable = QuantityCheck {
        required: result.total_length,
        ordered: ordered.cable,
    };

    let mut types: BTreeMap<CableType, QuantityCheck> = BTreeMap::new();
    for (cable_type, qty) in &ordered.by_type {
        types.entry(*cable_type).or_default().ordered = *qty;
    }
    for (cable_type, qty) in &result.required_by_type {
        types.entry(*cable_type).or_default().required = *qty;
    }
    let by_type: Vec<(CableType, QuantityCheck)> = types.into_iter().collect();

    let short = connectors.is_short()
        || cable.is_short()
        || by_type.iter().any(|(_, check)| check.is_short());
    let flag = if short {
        ReconciliationFlag::Shortages
    } else {
        ReconciliationFlag::Ok
    };
    debug!(flag = flag.label(), "reconciliation finished");

    ReconciliationReport {
        timestamp: now,
        project: state.header.display_name().to_string(),
        active_vendors: state
            .vendors
            .active_vendors()
            .map(|(slot, vendor)| vendor.display_name(slot))
            .collect(),
        connectors,
        cable,
        by_type,
        flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cable::{CableLengthMode, CableLineItem};
    use crate::services::calculator::calculate;
    use crate::test_support::{fixed_time, sample_state};

    #[test]
    fn connector_keywords_win_over_cable_keywords() {
        assert_eq!(
            classify_description("BNC connector for 1694A cable"),
            Some(ItemCategory::Connector)
        );
        assert_eq!(
            classify_description("Belden 1694A coax"),
            Some(ItemCategory::Cable(CableType::Rg1694))
        );
        assert_eq!(
            classify_description("Category 6 patch cable"),
            Some(ItemCategory::Cable(CableType::Cat6))
        );
        assert_eq!(
            classify_description("Cat5e jumper"),
            Some(ItemCategory::Cable(CableType::Other))
        );
        assert_eq!(classify_description("Label printer"), None);
    }

    #[test]
    fn explicit_categories_are_used_before_keywords() {
        let item = VendorItem {
            id: 1,
            description: "BNC".into(),
            qty: 1.0,
            cost: 1.0,
            category: Some(ItemCategory::Other),
        };
        assert_eq!(item_category(&item, true), Some(ItemCategory::Other));
        let bare = VendorItem {
            category: None,
            ..item
        };
        assert_eq!(item_category(&bare, true), Some(ItemCategory::Connector));
        assert_eq!(item_category(&bare, false), None);
    }

    #[test]
    fn thirty_of_forty_connectors_is_a_shortage_of_ten() {
        let mut state = sample_state();
        state.inputs.num_cables = 20.0;
        state.vendors.add_item(1, "BNC connector", 30.0, 2.4, None);
        state.vendors.add_item(1, "Coax cable", 1000.0, 0.34, None);
        let result = calculate(&state);

        let report = reconcile(&state, &result, true, fixed_time());
        assert_eq!(report.connectors.required, 40.0);
        assert_eq!(report.connectors.ordered, 30.0);
        assert_eq!(report.connectors.difference(), -10.0);
        assert_eq!(report.flag, ReconciliationFlag::Shortages);
        assert!(report.text().contains("NEED TO ORDER: 10 more"));
        assert!(report.quick_status().contains("connectors short"));
    }

    #[test]
    fn enough_stock_everywhere_is_ok() {
        let mut state = sample_state();
        state.vendors.add_item(1, "BNC connector", 25.0, 2.4, None);
        state.vendors.add_item(1, "1694A cable", 500.0, 0.5, None);
        let result = calculate(&state);

        let report = reconcile(&state, &result, true, fixed_time());
        assert_eq!(report.flag, ReconciliationFlag::Ok);
        let text = report.text();
        assert!(text.contains("Over-ordered: 5 extra"));
        assert!(text.contains("Cable ordered: 500ft"));
        assert!(text.contains("Perfect match"));
        assert!(text.contains("Active Vendors (1): Vendor 1"));
        assert_eq!(report.quick_status(), "All quantities reconciled");
    }

    #[test]
    fn inactive_vendors_are_not_counted_as_ordered() {
        let mut state = sample_state();
        state.vendors.add_item(2, "BNC connector", 100.0, 2.4, None);
        let result = calculate(&state);
        let report = reconcile(&state, &result, true, fixed_time());
        assert_eq!(report.connectors.ordered, 0.0);
    }

    #[test]
    fn itemized_cable_types_are_reconciled_per_type() {
        let mut state = sample_state();
        state.cable_length_mode = CableLengthMode::Itemized;
        state.line_items.cables = vec![
            CableLineItem::new(Some(CableType::Cat6), 4.0, 100.0),
            CableLineItem::new(Some(CableType::Rg1855), 2.0, 50.0),
        ];
        let category = Some(ItemCategory::Cable(CableType::Cat6));
        state.vendors.add_item(1, "Cat6 bulk", 6.0, 1.0, category);
        state.vendors.add_item(1, "BNC", 12.0, 1.0, None);
        let result = calculate(&state);

        let report = reconcile(&state, &result, true, fixed_time());
        let by_type: BTreeMap<CableType, (f64, f64)> = report
            .by_type
            .iter()
            .map(|(cable_type, check)| (*cable_type, (check.required, check.ordered)))
            .collect();
        assert_eq!(by_type[&CableType::Cat6], (4.0, 6.0));
        assert_eq!(by_type[&CableType::Rg1855], (2.0, 0.0));
        assert_eq!(report.flag, ReconciliationFlag::Shortages);
        assert!(report.text().contains("=== CABLE TYPE BREAKDOWN ==="));
        assert!(report.text().contains("1855 Cable:"));
    }

    #[test]
    fn classifying_fills_only_uncategorized_items() {
        let mut book = VendorBook::new();
        book.add_item(1, "BNC connector", 1.0, 1.0, None);
        book.add_item(1, "1505 cable", 1.0, 1.0, Some(ItemCategory::Other));
        book.add_item(1, "Gloves", 1.0, 1.0, None);
        assert_eq!(classify_uncategorized(&mut book), 1);
        let categories: Vec<Option<ItemCategory>> = book.vendors[0]
            .items
            .iter()
            .map(|item| item.category)
            .collect();
        assert_eq!(
            categories,
            vec![Some(ItemCategory::Connector), Some(ItemCategory::Other), None]
        );
    }

    #[test]
    fn history_entries_keep_the_rendered_report() {
        let state = sample_state();
        let result = calculate(&state);
        let report = reconcile(&state, &result, true, fixed_time());
        let entry = report.to_entry();
        assert_eq!(entry.report, report.text());
        assert_eq!(entry.flag, report.flag);
        assert_eq!(entry.project, "Sample Install");
    }
}
