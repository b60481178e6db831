use chrono::{DateTime, Local, TimeZone, Utc};

use crate::domain::cable::{CableLineItem, CableType};
use crate::domain::line_items::{CostCategory, CostLineItem, StaffLineItem};
use crate::domain::project::ProjectState;
use crate::domain::vendor::{ItemCategory, QuoteStatus, VendorQuote};
use crate::services::input_reader::DefaultTable;

pub fn fixed_time() -> DateTime<Local> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .unwrap()
        .with_timezone(&Local)
}

/// Ten cables of 50 ft on factory defaults.
pub fn sample_state() -> ProjectState {
    let mut state = ProjectState::new(DefaultTable::factory().default_inputs());
    state.header.project_name = "Sample Install".into();
    state.inputs.num_cables = 10.0;
    state.inputs.avg_cable_length = 50.0;
    state
}

/// A project with something in every section.
pub fn populated_state() -> ProjectState {
    let mut state = sample_state();
    state.header.project_number = "P-1042".into();
    state.header.customer_name = "Riverside Studios".into();
    state.header.date = "2026-03-14".into();
    state.inputs.num_technicians = 2.0;
    state.inputs.work_hours_per_day = 10.0;
    state.inputs.cable_run_time = 6.0;
    state.inputs.cleanup_time = 2.0;
    state.inputs.staff_hours = 3.0;

    state.line_items.cables = vec![
        CableLineItem::new(Some(CableType::Rg1694), 6.0, 120.0),
        CableLineItem::new(Some(CableType::Cat6), 4.0, 35.5),
        CableLineItem::new(None, 0.0, 0.0),
    ];
    state
        .line_items
        .category_mut(CostCategory::Supplies)
        .push(CostLineItem::new("Heat shrink", 3.0, 4.25));
    state
        .line_items
        .category_mut(CostCategory::Equipment)
        .push(CostLineItem::new("Crimper rental", 1.0, 85.0));
    state.line_items.staff.push(StaffLineItem {
        description: "Project manager".into(),
        hours: 6.0,
        notes: "walkthrough".into(),
    });

    state.vendors.set_name(1, "Acme Supply");
    state
        .vendors
        .add_item(1, "BNC connector", 20.0, 2.4, Some(ItemCategory::Connector));
    state.vendors.add_item(1, "1694A cable", 1000.0, 0.34, None);
    state.vendors.set_name(2, "Backup Co");
    state.vendors.add_item(2, "Cat6 box", 2.0, 140.0, None);
    state.vendors.add_quote(VendorQuote {
        vendor_name: "Acme Supply".into(),
        item_description: "Patch panels".into(),
        part_number: "PP-24".into(),
        quote_number: "Q-77".into(),
        amount: 320.0,
        ..VendorQuote::default()
    });
    let approved = state.vendors.add_quote(VendorQuote {
        vendor_name: "Backup Co".into(),
        item_description: "Rack".into(),
        amount: 900.0,
        ..VendorQuote::default()
    });
    state.vendors.set_quote_status(approved, QuoteStatus::Approved);
    state
}
