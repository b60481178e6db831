use crate::domain::cable::{CableLengthMode, CableLineItem};
use crate::domain::history::HistoryEvent;
use crate::domain::project::ProjectState;
use crate::domain::results::CalculationResult;
use crate::domain::vendor::VendorBook;
use crate::services::cable_aggregator::spool_details;
use crate::services::cost_aggregator::{count_label, vendor_order_total};
use crate::services::formatting::{
    duration_details, format_currency, format_hours, format_number, summary_cards,
    termination_details,
};
use crate::services::labor_cost::staff_caption;

pub fn format_calculation_report(state: &ProjectState, result: &CalculationResult) -> String {
    let header = &state.header;
    let mut lines = Vec::new();
    lines.push(format!("Project: {}", header.display_name()));
    for (label, value) in [
        ("Project number", &header.project_number),
        ("Customer", &header.customer_name),
        ("Date", &header.date),
    ] {
        if !value.trim().is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }
    lines.push(format!(
        "Labor mode: {} | Cable lengths: {}",
        state.labor_mode.code(),
        state.cable_length_mode.code()
    ));
    lines.push(String::new());

    lines.push("Summary:".to_string());
    for (label, value) in summary_cards(result) {
        lines.push(format!("  {label}: {value}"));
    }
    lines.push(String::new());

    lines.push("Details:".to_string());
    lines.push(format!(
        "  Terminations: {}",
        termination_details(result.total_terminations, state.inputs.time_per_termination)
    ));
    lines.push(format!("  Duration: {}", duration_details(result.breakdown.total)));
    lines.push(format!("  Labor: {}", result.labor_details));
    lines.push(format!(
        "  Spools: {}",
        spool_details(result.total_length, state.inputs.waste_factor)
    ));
    let check = result.labor_hours;
    lines.push(format!(
        "  Labor hours: {} calculated, {} allocated, {} difference",
        format_number(check.calculated),
        format_number(check.allocated),
        format_number(check.difference)
    ));
    if state.cable_length_mode == CableLengthMode::Itemized && !result.required_by_type.is_empty() {
        let types: Vec<String> = result
            .required_by_type
            .iter()
            .map(|(cable_type, count)| format!("{cable_type}: {}", format_number(*count)))
            .collect();
        lines.push(format!("  Cables by type: {}", types.join(", ")));
    }
    lines.push(String::new());

    lines.push("Staff:".to_string());
    for line in staff_caption(&result.staff_assignments) {
        lines.push(format!("  {line}"));
    }
    lines.push(String::new());

    lines.push("Time Breakdown:".to_string());
    lines.push("Activity | Hours".to_string());
    lines.push("---------|------".to_string());
    for (label, hours) in result.breakdown.activities() {
        lines.push(format!("{label} | {}", format_hours(hours)));
    }
    lines.push(format!("Total | {}", format_hours(result.breakdown.total)));
    lines.push(String::new());

    lines.push(format!(
        "Vendor Orders ({}, {}):",
        count_label(result.order_count(), "item"),
        count_label(result.quote_count, "quote")
    ));
    for order in &result.vendor_orders {
        lines.push(format!(
            "  {}: {} ({})",
            order.name,
            format_currency(order.total),
            count_label(order.order_count, "item")
        ));
    }

    lines.join("\n")
}

/// One line after every edit so the effect on the total is visible.
pub fn format_total_line(result: &CalculationResult) -> String {
    format!(
        "Total Project Cost: {}",
        format_currency(result.grand_total)
    )
}

pub fn format_cable_items(items: &[CableLineItem]) -> String {
    if items.is_empty() {
        return "No cable line items".to_string();
    }
    let mut lines = vec!["# | Type | Qty | Length".to_string()];
    for (index, item) in items.iter().enumerate() {
        let cable_type = item
            .cable_type
            .map(|cable_type| cable_type.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{} | {cable_type} | {} | {}ft",
            index + 1,
            format_number(item.qty),
            format_number(item.length)
        ));
    }
    lines.join("\n")
}

pub fn format_vendor_book(book: &VendorBook) -> String {
    let mut lines = Vec::new();
    for (index, vendor) in book.vendors.iter().enumerate() {
        let slot = index + 1;
        let mut flags = vec![if vendor.active { "active" } else { "inactive" }];
        if slot == book.current_vendor {
            flags.push("current");
        }
        lines.push(format!(
            "[{slot}] {} ({}): {}",
            vendor.display_name(slot),
            flags.join(", "),
            format_currency(vendor_order_total(vendor))
        ));
        for item in &vendor.items {
            let category = item
                .category
                .map(|category| format!(" [{}]", category.code()))
                .unwrap_or_default();
            lines.push(format!(
                "  #{} {}: {} × {} = {}{category}",
                item.id,
                item.description,
                format_number(item.qty),
                format_currency(item.cost),
                format_currency(item.total())
            ));
        }
    }
    if !book.quotes.is_empty() {
        lines.push(String::new());
        lines.push("Quotes:".to_string());
        for quote in &book.quotes {
            lines.push(format!(
                "  #{} {} / {}: {} ({})",
                quote.id,
                quote.vendor_name,
                quote.item_description,
                format_currency(quote.amount),
                quote.status.code()
            ));
        }
    }
    lines.join("\n")
}

pub fn format_history(events: &[HistoryEvent]) -> String {
    if events.is_empty() {
        return "No project history".to_string();
    }
    events
        .iter()
        .map(|event| {
            format!(
                "{} | {} | {} | {}",
                event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                event.project_name,
                event.event_type,
                event.detail
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
