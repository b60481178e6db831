use crate::commands::base_commands::{QuoteAction, VendorAction};
use crate::commands::report_format::format_vendor_book;
use crate::commands::{CommandError, finish_edit};
use crate::domain::vendor::{QuoteStatus, VendorQuote};
use crate::services::input_reader::parse_amount;
use crate::services::reconciliation::classify_uncategorized;
use crate::services::session::Session;

fn outcome(done: bool, success: String, miss: String) -> String {
    if done { success } else { miss }
}

pub fn vendor_command(session: &mut Session, action: VendorAction) -> Result<String, CommandError> {
    let book = &mut session.state.vendors;
    let message = match action {
        VendorAction::List => return Ok(format_vendor_book(book)),
        VendorAction::Name { slot, name } => outcome(
            book.set_name(slot, &name),
            format!("Vendor {slot} renamed to {}", name.trim()),
            format!("No vendor slot {slot}"),
        ),
        VendorAction::Toggle { slot } => {
            let done = book.toggle_active(slot);
            let state = match book.vendor(slot) {
                Some(vendor) if vendor.active => "active",
                _ => "inactive",
            };
            outcome(
                done,
                format!("Vendor {slot} is now {state}"),
                format!("No vendor slot {slot}"),
            )
        }
        VendorAction::Select { slot } => outcome(
            book.select(slot),
            format!("Vendor {slot} selected"),
            format!("No vendor slot {slot}"),
        ),
        VendorAction::AddItem {
            description,
            qty,
            cost,
            slot,
            category,
        } => {
            let slot = slot.unwrap_or(book.current_vendor);
            let (qty, cost) = (parse_amount(&qty), parse_amount(&cost));
            match book.add_item(slot, &description, qty, cost, category) {
                Some(id) => format!("Added item #{id} to vendor {slot}"),
                None => format!("No vendor slot {slot}"),
            }
        }
        VendorAction::UpdateItem {
            slot,
            id,
            description,
            qty,
            cost,
            category,
        } => outcome(
            book.update_item(slot, id, |item| {
                if let Some(description) = description {
                    item.description = description;
                }
                if let Some(qty) = qty {
                    item.qty = parse_amount(&qty);
                }
                if let Some(cost) = cost {
                    item.cost = parse_amount(&cost);
                }
                if category.is_some() {
                    item.category = category;
                }
            }),
            format!("Updated item #{id} on vendor {slot}"),
            format!("No item #{id} on vendor {slot}"),
        ),
        VendorAction::RemoveItem { slot, id } => outcome(
            book.remove_item(slot, id),
            format!("Removed item #{id} from vendor {slot}"),
            format!("No item #{id} on vendor {slot}"),
        ),
        VendorAction::Classify => {
            let classified = classify_uncategorized(book);
            format!("Classified {classified} vendor items")
        }
        VendorAction::Reset => {
            book.reset();
            "Vendor slots and quotes cleared".to_string()
        }
    };
    finish_edit(session, message)
}

pub fn quote_command(session: &mut Session, action: QuoteAction) -> Result<String, CommandError> {
    let book = &mut session.state.vendors;
    let message = match action {
        QuoteAction::Add {
            vendor,
            item,
            part_number,
            quote_number,
            amount,
        } => {
            let id = book.add_quote(VendorQuote {
                vendor_name: vendor,
                item_description: item,
                part_number,
                quote_number,
                amount: parse_amount(&amount),
                ..VendorQuote::default()
            });
            format!("Added quote #{id}")
        }
        QuoteAction::Remove { id } => outcome(
            book.remove_quote(id),
            format!("Removed quote #{id}"),
            format!("No quote #{id}"),
        ),
        QuoteAction::Approve { id } => outcome(
            book.set_quote_status(id, QuoteStatus::Approved),
            format!("Quote #{id} approved"),
            format!("No quote #{id}"),
        ),
        QuoteAction::Pending { id } => outcome(
            book.set_quote_status(id, QuoteStatus::Pending),
            format!("Quote #{id} marked pending"),
            format!("No quote #{id}"),
        ),
    };
    finish_edit(session, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vendor::ItemCategory;
    use crate::services::config::CalculatorConfig;
    use crate::services::store::MemoryStore;

    fn session() -> Session {
        Session::open(CalculatorConfig::default(), Box::new(MemoryStore::new())).unwrap()
    }

    fn add_item(
        session: &mut Session,
        description: &str,
        qty: &str,
        cost: &str,
        slot: Option<usize>,
    ) -> String {
        vendor_command(
            session,
            VendorAction::AddItem {
                description: description.into(),
                qty: qty.into(),
                cost: cost.into(),
                slot,
                category: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn items_go_to_the_current_vendor_by_default() {
        let mut session = session();
        vendor_command(&mut session, VendorAction::Select { slot: 2 }).unwrap();
        let output = add_item(&mut session, "BNC connector", "10", "2", None);
        assert!(output.starts_with("Added item #1 to vendor 2"));
        assert_eq!(session.state.vendors.vendors[1].items.len(), 1);
    }

    #[test]
    fn inactive_vendors_do_not_count_towards_the_total() {
        let mut session = session();
        let active = add_item(&mut session, "Cable", "100", "0.5", Some(1));
        assert!(active.contains("Total Project Cost: $50"));
        let inactive = add_item(&mut session, "Cable", "100", "0.5", Some(2));
        assert!(inactive.contains("Total Project Cost: $50"));
        let toggled = vendor_command(&mut session, VendorAction::Toggle { slot: 2 }).unwrap();
        assert!(toggled.starts_with("Vendor 2 is now active"));
        assert!(toggled.contains("Total Project Cost: $100"));
    }

    #[test]
    fn unknown_slots_and_ids_are_reported_without_changes() {
        let mut session = session();
        let output = vendor_command(&mut session, VendorAction::Select { slot: 4 }).unwrap();
        assert!(output.starts_with("No vendor slot 4"));
        let output =
            vendor_command(&mut session, VendorAction::RemoveItem { slot: 1, id: 9 }).unwrap();
        assert!(output.starts_with("No item #9 on vendor 1"));
        assert_eq!(session.state.vendors.current_vendor, 1);
    }

    #[test]
    fn items_can_be_updated_in_place() {
        let mut session = session();
        add_item(&mut session, "Patch cord", "10", "3", None);
        let output = vendor_command(
            &mut session,
            VendorAction::UpdateItem {
                slot: 1,
                id: 1,
                description: None,
                qty: Some("12".into()),
                cost: None,
                category: Some(ItemCategory::Other),
            },
        )
        .unwrap();
        assert!(output.contains("Total Project Cost: $36"));
        let item = &session.state.vendors.vendors[0].items[0];
        assert_eq!(item.description, "Patch cord");
        assert_eq!(item.category, Some(ItemCategory::Other));
    }

    #[test]
    fn classify_tags_items_from_their_descriptions() {
        let mut session = session();
        add_item(&mut session, "BNC connector", "24", "2", None);
        add_item(&mut session, "Belden 1694A coax", "500", "0.3", None);
        let output = vendor_command(&mut session, VendorAction::Classify).unwrap();
        assert!(output.starts_with("Classified 2 vendor items"));
        let categories: Vec<Option<ItemCategory>> = session.state.vendors.vendors[0]
            .items
            .iter()
            .map(|item| item.category)
            .collect();
        assert_eq!(categories[0], Some(ItemCategory::Connector));
        assert!(matches!(categories[1], Some(ItemCategory::Cable(_))));
    }

    #[test]
    fn reset_clears_slots_and_quotes() {
        let mut session = session();
        vendor_command(&mut session, VendorAction::Select { slot: 3 }).unwrap();
        add_item(&mut session, "Patch panel", "2", "90", Some(1));
        quote_command(
            &mut session,
            QuoteAction::Add {
                vendor: "Acme".into(),
                item: "Rack".into(),
                part_number: String::new(),
                quote_number: String::new(),
                amount: "400".into(),
            },
        )
        .unwrap();

        let output = vendor_command(&mut session, VendorAction::Reset).unwrap();
        assert!(output.starts_with("Vendor slots and quotes cleared"));
        assert!(output.contains("Total Project Cost: $0"));
        assert_eq!(session.state.vendors.current_vendor, 1);
        assert!(session.state.vendors.quotes.is_empty());
        assert!(session.state.vendors.vendors.iter().all(|vendor| vendor.items.is_empty()));
    }

    #[test]
    fn quotes_count_whether_pending_or_approved() {
        let mut session = session();
        let output = quote_command(
            &mut session,
            QuoteAction::Add {
                vendor: "Acme".into(),
                item: "Patch panel".into(),
                part_number: String::new(),
                quote_number: "Q-1".into(),
                amount: "320".into(),
            },
        )
        .unwrap();
        assert!(output.starts_with("Added quote #1"));
        assert!(output.contains("Total Project Cost: $320"));

        let approved = quote_command(&mut session, QuoteAction::Approve { id: 1 }).unwrap();
        assert!(approved.contains("Total Project Cost: $320"));
        assert_eq!(
            session.state.vendors.quotes[0].status,
            QuoteStatus::Approved
        );

        let missing = quote_command(&mut session, QuoteAction::Remove { id: 7 }).unwrap();
        assert!(missing.starts_with("No quote #7"));
    }
}
