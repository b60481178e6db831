use chrono::Local;

use crate::commands::CommandError;
use crate::services::session::Session;

/// Runs a reconciliation against the active vendors, stores it in the
/// history and prints the report.
pub fn reconcile_command(session: &mut Session) -> Result<String, CommandError> {
    let report = session.reconcile(Local::now())?;
    session.record_event("reconcile", report.flag.label())?;
    Ok(format!(
        "{}\nStatus: {} ({})",
        report.text(),
        report.flag.label(),
        report.quick_status()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vendor::ItemCategory;
    use crate::services::config::CalculatorConfig;
    use crate::services::store::MemoryStore;
    use crate::test_support::sample_state;

    fn session() -> Session {
        let mut session =
            Session::open(CalculatorConfig::default(), Box::new(MemoryStore::new())).unwrap();
        // 10 cables of 50 ft with two terminations each: 20 connectors, 500 ft.
        session.state = sample_state();
        session
    }

    #[test]
    fn short_connector_orders_are_flagged() {
        let mut session = session();
        session.state.inputs.num_cables = 20.0;
        session
            .state
            .vendors
            .add_item(1, "Crimp set", 30.0, 1.0, Some(ItemCategory::Connector));
        session.state.vendors.add_item(1, "Coax reel", 1000.0, 0.2, None);

        let output = reconcile_command(&mut session).unwrap();
        assert!(output.contains("NEED TO ORDER: 10 more"));
        assert!(output.contains("Status: SHORTAGES (Quantity mismatches detected"));
        assert!(output.contains("(connectors short, cable ok))"));
        assert_eq!(session.reconciliations().unwrap().len(), 1);
    }

    #[test]
    fn matching_orders_reconcile_cleanly() {
        let mut session = session();
        session.state.vendors.add_item(1, "BNC connector", 20.0, 1.0, None);
        session.state.vendors.add_item(1, "RG6 coax", 500.0, 0.2, None);

        let output = reconcile_command(&mut session).unwrap();
        assert!(output.contains("Perfect match"));
        assert!(output.contains("Status: OK (All quantities reconciled)"));
        let events = session.events().unwrap();
        assert_eq!(events[0].event_type, "reconcile");
        assert_eq!(events[0].detail, "OK");
    }
}
