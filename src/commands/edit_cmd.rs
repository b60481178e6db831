use tracing::warn;

use crate::commands::base_commands::{
    CableAction, CableModeArg, ItemAction, LaborModeArg, PresetArg, StaffAction,
};
use crate::commands::report_format::format_cable_items;
use crate::commands::{CommandError, finish_edit};
use crate::domain::cable::{CableLineItem, CableType};
use crate::domain::inputs::InputField;
use crate::domain::line_items::{CostCategory, CostLineItem, StaffLineItem};
use crate::services::input_reader::{parse_amount, set_input};
use crate::services::labor_cost::{LaborPreset, apply_labor_preset};
use crate::services::session::Session;

pub fn set_command(
    session: &mut Session,
    field: &str,
    value: &str,
) -> Result<String, CommandError> {
    let field = InputField::from_name(field)
        .ok_or_else(|| CommandError::Invalid(format!("unknown input field {field}")))?;
    let table = session.table().clone();
    set_input(&mut session.state.inputs, field, value, &table);
    let stored = session.state.inputs.get(field);
    finish_edit(session, format!("{} = {stored}", field.name()))
}

pub fn header_command(
    session: &mut Session,
    name: Option<String>,
    number: Option<String>,
    customer: Option<String>,
    date: Option<String>,
) -> Result<String, CommandError> {
    let header = &mut session.state.header;
    for (target, value) in [
        (&mut header.project_name, name),
        (&mut header.project_number, number),
        (&mut header.customer_name, customer),
        (&mut header.date, date),
    ] {
        if let Some(value) = value {
            *target = value;
        }
    }
    let message = format!("Project header updated: {}", header.display_name());
    finish_edit(session, message)
}

pub fn mode_command(
    session: &mut Session,
    labor: Option<LaborModeArg>,
    cable: Option<CableModeArg>,
) -> Result<String, CommandError> {
    if let Some(labor) = labor {
        session.state.labor_mode = labor.into();
    }
    if let Some(cable) = cable {
        session.state.cable_length_mode = cable.into();
    }
    let message = format!(
        "Labor mode: {} | Cable lengths: {}",
        session.state.labor_mode.code(),
        session.state.cable_length_mode.code()
    );
    finish_edit(session, message)
}

pub fn labor_preset_command(
    session: &mut Session,
    preset: PresetArg,
) -> Result<String, CommandError> {
    let preset = LaborPreset::from(preset);
    let state = &mut session.state;
    apply_labor_preset(preset, &mut state.labor_mode, &mut state.inputs);
    let message = format!(
        "Labor preset applied, hourly rate {}",
        state.inputs.hourly_rate
    );
    finish_edit(session, message)
}

/// Removes the entry at a 1-based `index`. Out of range positions are a
/// logged no-op.
fn remove_at<T>(items: &mut Vec<T>, index: usize, what: &str) -> String {
    if index == 0 || index > items.len() {
        warn!(index, "no {what} at this position");
        return format!("No {what} at position {index}");
    }
    items.remove(index - 1);
    format!("Removed {what} {index}")
}

pub fn cable_command(session: &mut Session, action: CableAction) -> Result<String, CommandError> {
    let cables = &mut session.state.line_items.cables;
    let message = match action {
        CableAction::List => return Ok(format_cable_items(cables)),
        CableAction::Add {
            cable_type,
            qty,
            length,
        } => {
            let item = CableLineItem::new(cable_type, parse_amount(&qty), parse_amount(&length));
            cables.push(item);
            let label = cable_type.map(CableType::label).unwrap_or("untyped");
            format!("Added {label} cable row {}", cables.len())
        }
        CableAction::Remove { index } => remove_at(cables, index, "cable row"),
    };
    finish_edit(session, message)
}

pub fn item_command(session: &mut Session, action: ItemAction) -> Result<String, CommandError> {
    let message = match action {
        ItemAction::Add {
            category,
            description,
            qty,
            cost,
        } => {
            let category = CostCategory::from(category);
            let item = CostLineItem::new(description, parse_amount(&qty), parse_amount(&cost));
            let items = session.state.line_items.category_mut(category);
            items.push(item);
            format!("Added {} item {}", category.label(), items.len())
        }
        ItemAction::Remove { category, index } => {
            let category: CostCategory = category.into();
            remove_at(
                session.state.line_items.category_mut(category),
                index,
                category.code(),
            )
        }
    };
    finish_edit(session, message)
}

pub fn staff_command(session: &mut Session, action: StaffAction) -> Result<String, CommandError> {
    let staff = &mut session.state.line_items.staff;
    let message = match action {
        StaffAction::Add {
            description,
            hours,
            notes,
        } => {
            staff.push(StaffLineItem {
                description,
                hours: parse_amount(&hours),
                notes,
            });
            format!("Added staff assignment {}", staff.len())
        }
        StaffAction::Remove { index } => remove_at(staff, index, "staff assignment"),
    };
    finish_edit(session, message)
}

pub fn reset_command(session: &mut Session) -> Result<String, CommandError> {
    session.reset()?;
    finish_edit(session, "Project reset to defaults".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::base_commands::CategoryArg;
    use crate::services::config::CalculatorConfig;
    use crate::services::store::MemoryStore;

    fn session() -> Session {
        Session::open(CalculatorConfig::default(), Box::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn set_accepts_camel_case_names_and_reports_the_stored_value() {
        let mut session = session();
        let output = set_command(&mut session, "numCables", "24").unwrap();
        assert!(output.starts_with("num_cables = 24"));
        assert!(output.contains("Total Project Cost:"));
        assert_eq!(session.state.inputs.num_cables, 24.0);
    }

    #[test]
    fn set_substitutes_defaults_for_unusable_values() {
        let mut session = session();
        set_command(&mut session, "spool_length", "0").unwrap();
        assert_eq!(session.state.inputs.spool_length, 1000.0);
        set_command(&mut session, "waste_factor", "lots").unwrap();
        assert_eq!(session.state.inputs.waste_factor, 7.5);
    }

    #[test]
    fn set_rejects_unknown_fields() {
        let mut session = session();
        assert!(matches!(
            set_command(&mut session, "colour", "red"),
            Err(CommandError::Invalid(_))
        ));
    }

    #[test]
    fn the_550_dollar_crew_comes_from_three_edits() {
        let mut session = session();
        set_command(&mut session, "num_technicians", "2").unwrap();
        set_command(&mut session, "hourly_rate", "25").unwrap();
        let output = set_command(&mut session, "work_hours_per_day", "10").unwrap();
        assert!(output.contains("Total Project Cost: $550"));
    }

    #[test]
    fn cable_rows_can_be_added_listed_and_removed() {
        let mut session = session();
        cable_command(
            &mut session,
            CableAction::Add {
                cable_type: Some(CableType::Rg1694),
                qty: "6".into(),
                length: "120".into(),
            },
        )
        .unwrap();
        let listing = cable_command(&mut session, CableAction::List).unwrap();
        assert!(listing.contains("1 | 1694 | 6 | 120ft"));

        let missing = cable_command(&mut session, CableAction::Remove { index: 4 }).unwrap();
        assert!(missing.starts_with("No cable row at position 4"));
        assert_eq!(session.state.line_items.cables.len(), 1);

        cable_command(&mut session, CableAction::Remove { index: 1 }).unwrap();
        assert!(session.state.line_items.cables.is_empty());
    }

    #[test]
    fn cost_items_land_in_their_category() {
        let mut session = session();
        let output = item_command(
            &mut session,
            ItemAction::Add {
                category: CategoryArg::Shipping,
                description: "Freight".into(),
                qty: "2".into(),
                cost: "40".into(),
            },
        )
        .unwrap();
        assert!(output.contains("Added Shipping & Logistics item 1"));
        assert!(output.contains("Total Project Cost: $80"));
        assert_eq!(
            session.state.line_items.category(CostCategory::Shipping),
            [CostLineItem::new("Freight", 2.0, 40.0)]
        );
    }

    #[test]
    fn labor_presets_switch_to_a_single_crew() {
        let mut session = session();
        mode_command(&mut session, Some(LaborModeArg::Dual), None).unwrap();
        set_command(&mut session, "hourly_rate", "0").unwrap();
        labor_preset_command(&mut session, PresetArg::RateB).unwrap();
        assert_eq!(
            session.state.labor_mode,
            crate::domain::project::LaborMode::Single
        );
        assert_eq!(session.state.inputs.hourly_rate, 125.0);
    }

    #[test]
    fn edits_are_persisted_for_the_next_session() {
        let mut session = session();
        header_command(&mut session, Some("Studio B".into()), None, None, None).unwrap();
        staff_command(
            &mut session,
            StaffAction::Add {
                description: "Site lead".into(),
                hours: "4".into(),
                notes: String::new(),
            },
        )
        .unwrap();
        session.reload().unwrap();
        assert_eq!(session.state.header.project_name, "Studio B");
        assert_eq!(session.state.line_items.staff.len(), 1);
    }
}
