use std::collections::BTreeMap;

use crate::domain::cable::CableType;

/// Hours per activity. Rebuilt from scratch on every calculation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeBreakdown {
    pub termination: f64,
    pub running: f64,
    pub testing: f64,
    pub labeling: f64,
    pub cleanup: f64,
    pub cutover: f64,
    pub decommissioning: f64,
    pub rack_setup: f64,
    pub total: f64,
}

impl TimeBreakdown {
    /// Activity buckets in display order, without the total.
    pub fn activities(&self) -> [(&'static str, f64); 8] {
        [
            ("Termination Work", self.termination),
            ("Cable Running", self.running),
            ("Testing", self.testing),
            ("Labeling", self.labeling),
            ("Cleanup", self.cleanup),
            ("Cutover", self.cutover),
            ("Decommissioning", self.decommissioning),
            ("Rack Setup", self.rack_setup),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaborHoursCheck {
    pub calculated: f64,
    pub allocated: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorOrderSummary {
    pub slot: usize,
    pub name: String,
    pub total: f64,
    pub order_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationResult {
    pub total_cables: f64,
    pub total_length: f64,
    pub total_terminations: f64,
    pub termination_hours: f64,
    pub spools_required: f64,
    pub required_by_type: BTreeMap<CableType, f64>,
    pub breakdown: TimeBreakdown,
    pub project_days: f64,
    pub labor_cost: f64,
    pub labor_details: String,
    pub labor_hours: LaborHoursCheck,
    pub staff_hours_total: f64,
    pub staff_assignments: Vec<String>,
    pub supplies_cost: f64,
    pub materials_cost: f64,
    pub equipment_cost: f64,
    pub shipping_cost: f64,
    pub admin_cost: f64,
    pub pending_quotes_total: f64,
    pub approved_quotes_total: f64,
    pub vendor_quotes_total: f64,
    pub quote_count: usize,
    pub active_vendor_total: f64,
    pub vendor_orders: Vec<VendorOrderSummary>,
    pub grand_total: f64,
}

impl CalculationResult {
    pub fn order_count(&self) -> usize {
        self.vendor_orders.iter().map(|vendor| vendor.order_count).sum()
    }
}
