use tracing::debug;

use crate::domain::line_items::CostCategory;
use crate::domain::project::ProjectState;
use crate::domain::results::CalculationResult;
use crate::services::cable_aggregator::{aggregate_cables, required_by_type};
use crate::services::cost_aggregator::{
    active_vendor_total, category_total, quote_totals, vendor_orders,
};
use crate::services::labor_cost::{
    labor_cost, labor_details, labor_hours_check, staff_assignments, staff_hours_total,
};
use crate::services::time_breakdown::{project_days, time_breakdown};

/// Runs the full pipeline over `state`. Nothing is carried over from a
/// previous pass.
pub fn calculate(state: &ProjectState) -> CalculationResult {
    let inputs = &state.inputs;
    let items = &state.line_items;

    let cables = aggregate_cables(state.cable_length_mode, inputs, &items.cables);
    debug!(
        total_cables = cables.total_cables,
        total_length = cables.total_length,
        "aggregated cables"
    );

    let breakdown = time_breakdown(inputs, cables.total_cables, cables.termination_hours);
    let labor = labor_cost(state.labor_mode, inputs);
    debug!(
        total_hours = breakdown.total,
        labor_cost = labor,
        "computed labor"
    );

    let quotes = quote_totals(&state.vendors.quotes);
    let orders = active_vendor_total(&state.vendors);

    let mut result = CalculationResult {
        total_cables: cables.total_cables,
        total_length: cables.total_length,
        total_terminations: cables.total_terminations,
        termination_hours: cables.termination_hours,
        spools_required: cables.spools_required,
        required_by_type: required_by_type(state.cable_length_mode, &items.cables),
        breakdown,
        project_days: project_days(&breakdown),
        labor_cost: labor,
        labor_details: labor_details(state.labor_mode, inputs),
        labor_hours: labor_hours_check(state.labor_mode, inputs, &breakdown),
        staff_hours_total: staff_hours_total(inputs.staff_hours, &items.staff),
        staff_assignments: staff_assignments(inputs.staff_hours, &items.staff),
        supplies_cost: category_total(items.category(CostCategory::Supplies)),
        materials_cost: category_total(items.category(CostCategory::Materials)),
        equipment_cost: category_total(items.category(CostCategory::Equipment)),
        shipping_cost: category_total(items.category(CostCategory::Shipping)),
        admin_cost: category_total(items.category(CostCategory::Admin)),
        pending_quotes_total: quotes.pending,
        approved_quotes_total: quotes.approved,
        vendor_quotes_total: quotes.total,
        quote_count: state.vendors.quotes.len(),
        active_vendor_total: orders,
        vendor_orders: vendor_orders(&state.vendors),
        grand_total: 0.0,
    };
    result.grand_total = grand_total(&result);
    debug!(grand_total = result.grand_total, "calculation finished");
    result
}

pub fn grand_total(result: &CalculationResult) -> f64 {
    result.labor_cost
        + result.supplies_cost
        + result.materials_cost
        + result.equipment_cost
        + result.shipping_cost
        + result.admin_cost
        + result.vendor_quotes_total
        + result.active_vendor_total
}

pub fn category_cost(result: &CalculationResult, category: CostCategory) -> f64 {
    match category {
        CostCategory::Supplies => result.supplies_cost,
        CostCategory::Materials => result.materials_cost,
        CostCategory::Equipment => result.equipment_cost,
        CostCategory::Shipping => result.shipping_cost,
        CostCategory::Admin => result.admin_cost,
    }
}
