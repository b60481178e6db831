use std::collections::BTreeMap;

use crate::domain::cable::{CableLengthMode, CableLineItem, CableType};
use crate::domain::inputs::ProjectInputs;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CableTotals {
    pub total_cables: f64,
    pub total_length: f64,
    pub total_terminations: f64,
    pub termination_hours: f64,
    pub spools_required: f64,
}

pub fn cable_quantities(
    mode: CableLengthMode,
    inputs: &ProjectInputs,
    line_items: &[CableLineItem],
) -> (f64, f64) {
    match mode {
        CableLengthMode::Average => (
            inputs.num_cables,
            inputs.num_cables * inputs.avg_cable_length,
        ),
        CableLengthMode::Itemized => line_items
            .iter()
            .filter(|item| item.is_countable())
            .fold((0.0, 0.0), |(cables, length), item| {
                (cables + item.qty, length + item.qty * item.length)
            }),
    }
}

/// Whole spools needed for `total_length` plus waste. Partial spools are not
/// usable, so this always rounds up.
pub fn spools_required(total_length: f64, waste_factor: f64, spool_length: f64) -> f64 {
    if spool_length <= 0.0 || total_length <= 0.0 {
        return 0.0;
    }
    (total_length * (1.0 + waste_factor / 100.0) / spool_length).ceil()
}

pub fn aggregate_cables(
    mode: CableLengthMode,
    inputs: &ProjectInputs,
    line_items: &[CableLineItem],
) -> CableTotals {
    let (total_cables, total_length) = cable_quantities(mode, inputs, line_items);
    let total_terminations = total_cables * inputs.terminations_per_cable;
    CableTotals {
        total_cables,
        total_length,
        total_terminations,
        termination_hours: total_terminations * inputs.time_per_termination / 60.0,
        spools_required: spools_required(total_length, inputs.waste_factor, inputs.spool_length),
    }
}

/// Cable counts per type from itemized rows. Average mode carries no type
/// information and yields an empty map.
pub fn required_by_type(
    mode: CableLengthMode,
    line_items: &[CableLineItem],
) -> BTreeMap<CableType, f64> {
    let mut required = BTreeMap::new();
    if mode == CableLengthMode::Average {
        return required;
    }
    for item in line_items {
        if let Some(cable_type) = item.cable_type.filter(|_| item.qty > 0.0) {
            *required.entry(cable_type).or_insert(0.0) += item.qty;
        }
    }
    required
}

pub fn spool_details(total_length: f64, waste_factor: f64) -> String {
    format!("{total_length}ft needed + {waste_factor}% waste")
}
