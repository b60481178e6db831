use crate::domain::inputs::ProjectInputs;
use crate::domain::results::TimeBreakdown;

/// Nominal working day used for the project duration.
pub const HOURS_PER_DAY: f64 = 8.0;

fn per_cable_hours(total_cables: f64, minutes_per_cable: f64) -> f64 {
    total_cables * minutes_per_cable / 60.0
}

pub fn time_breakdown(
    inputs: &ProjectInputs,
    total_cables: f64,
    termination_hours: f64,
) -> TimeBreakdown {
    let mut breakdown = TimeBreakdown {
        termination: termination_hours,
        running: per_cable_hours(total_cables, inputs.cable_run_time),
        testing: per_cable_hours(total_cables, inputs.testing_time),
        labeling: per_cable_hours(total_cables, inputs.labeling_time),
        cleanup: inputs.cleanup_time,
        cutover: inputs.cutover_time,
        decommissioning: inputs.decommissioning_time,
        rack_setup: inputs.rack_setup_time,
        total: 0.0,
    };
    breakdown.total = breakdown.activities().iter().map(|(_, hours)| hours).sum();
    breakdown
}

pub fn project_days(breakdown: &TimeBreakdown) -> f64 {
    breakdown.total / HOURS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_cable_activities_scale_with_the_cable_count_and_flat_ones_pass_through() {
        let inputs = ProjectInputs {
            cable_run_time: 6.0,
            testing_time: 3.0,
            labeling_time: 1.5,
            cleanup_time: 2.0,
            cutover_time: 1.0,
            decommissioning_time: 4.0,
            rack_setup_time: 0.5,
            ..ProjectInputs::default()
        };
        let breakdown = time_breakdown(&inputs, 20.0, 1.0);
        assert_eq!(breakdown.termination, 1.0);
        assert_eq!(breakdown.running, 2.0);
        assert_eq!(breakdown.testing, 1.0);
        assert_eq!(breakdown.labeling, 0.5);
        assert_eq!(breakdown.cleanup, 2.0);
        assert_eq!(breakdown.cutover, 1.0);
        assert_eq!(breakdown.decommissioning, 4.0);
        assert_eq!(breakdown.rack_setup, 0.5);
        assert_eq!(breakdown.total, 12.0);
        assert_eq!(project_days(&breakdown), 1.5);
    }

    #[test]
    fn an_empty_project_takes_no_time() {
        let breakdown = time_breakdown(&ProjectInputs::default(), 0.0, 0.0);
        assert_eq!(breakdown, TimeBreakdown::default());
        assert_eq!(project_days(&breakdown), 0.0);
    }
}
