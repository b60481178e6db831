use crate::domain::inputs::ProjectInputs;
use crate::domain::line_items::StaffLineItem;
use crate::domain::project::LaborMode;
use crate::domain::results::{LaborHoursCheck, TimeBreakdown};

pub const REGULAR_HOURS: f64 = 8.0;
pub const OVERTIME_HOURS: f64 = 4.0;
pub const OVERTIME_MULTIPLIER: f64 = 1.5;
pub const DOUBLE_TIME_MULTIPLIER: f64 = 2.0;

const CAPTION_WIDTH: usize = 40;

/// A technician group: headcount, hourly rate and hours per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crew {
    pub count: f64,
    pub rate: f64,
    pub hours: f64,
}

impl Crew {
    /// Hours are rounded to whole hours before any costing.
    pub fn new(count: f64, rate: f64, hours: f64) -> Self {
        Self {
            count,
            rate,
            hours: hours.round(),
        }
    }

    fn is_staffed(&self) -> bool {
        self.count > 0.0 && self.hours > 0.0
    }

    pub fn cost(&self) -> f64 {
        if self.is_staffed() {
            overtime_cost(self.hours, self.rate, self.count)
        } else {
            0.0
        }
    }

    fn details(&self) -> Option<String> {
        (self.is_staffed() && self.rate > 0.0).then(|| {
            format!(
                "{} techs × {:.1} hrs × ${}/hr",
                self.count, self.hours, self.rate
            )
        })
    }
}

/// Daily cost of `count` technicians working `hours` at `rate`.
///
/// Beyond 8 hours the next 4 are paid at 1.5x and anything past 12 at 2x.
/// The ceiling applies to the whole crew cost, never per technician.
pub fn overtime_cost(hours: f64, rate: f64, count: f64) -> f64 {
    if hours > REGULAR_HOURS {
        let regular = hours.min(REGULAR_HOURS);
        let overtime = (hours - REGULAR_HOURS).min(OVERTIME_HOURS);
        let double_time = (hours - REGULAR_HOURS - OVERTIME_HOURS).max(0.0);
        let per_tech = regular * rate
            + overtime * rate * OVERTIME_MULTIPLIER
            + double_time * rate * DOUBLE_TIME_MULTIPLIER;
        (per_tech * count).ceil()
    } else {
        (hours * count * rate).ceil()
    }
}

pub fn crews(mode: LaborMode, inputs: &ProjectInputs) -> Vec<Crew> {
    match mode {
        LaborMode::Single => vec![Crew::new(
            inputs.num_technicians,
            inputs.hourly_rate,
            inputs.work_hours_per_day,
        )],
        LaborMode::Dual => vec![
            Crew::new(inputs.tech_a_count, inputs.tech_a_rate, inputs.tech_a_hours),
            Crew::new(inputs.tech_b_count, inputs.tech_b_rate, inputs.tech_b_hours),
        ],
    }
}

pub fn labor_cost(mode: LaborMode, inputs: &ProjectInputs) -> f64 {
    crews(mode, inputs).iter().map(Crew::cost).sum()
}

pub fn labor_details(mode: LaborMode, inputs: &ProjectInputs) -> String {
    let parts: Vec<String> = crews(mode, inputs)
        .iter()
        .filter_map(Crew::details)
        .collect();
    if parts.is_empty() {
        "No labor allocated".to_string()
    } else {
        parts.join(" + ")
    }
}

/// Compares the hours the work needs with the hours the crews provide.
pub fn labor_hours_check(
    mode: LaborMode,
    inputs: &ProjectInputs,
    breakdown: &TimeBreakdown,
) -> LaborHoursCheck {
    let calculated = breakdown.total.round();
    let allocated = crews(mode, inputs)
        .iter()
        .map(|crew| crew.count * crew.hours)
        .sum();
    LaborHoursCheck {
        calculated,
        allocated,
        difference: calculated - allocated,
    }
}

pub fn staff_hours_total(staff_hours: f64, staff: &[StaffLineItem]) -> f64 {
    staff_hours + staff.iter().map(|item| item.hours).sum::<f64>()
}

/// One caption line per named staff allocation, then the unassigned hours.
pub fn staff_assignments(staff_hours: f64, staff: &[StaffLineItem]) -> Vec<String> {
    let mut lines: Vec<String> = staff
        .iter()
        .filter(|item| !item.description.trim().is_empty() && item.hours > 0.0)
        .map(|item| {
            let mut line = format!("{}: {:.1}h", item.description.trim(), item.hours);
            if !item.notes.trim().is_empty() {
                line.push_str(&format!(" ({})", item.notes.trim()));
            }
            line
        })
        .collect();
    if staff_hours > 0.0 {
        lines.push(format!("Unassigned: {staff_hours:.1}h (allocated)"));
    }
    lines
}

pub fn staff_caption(assignments: &[String]) -> Vec<String> {
    if assignments.is_empty() {
        return vec!["No staff assignments".to_string()];
    }
    assignments
        .iter()
        .map(|line| {
            if line.chars().count() > CAPTION_WIDTH {
                let cut: String = line.chars().take(CAPTION_WIDTH - 3).collect();
                format!("{cut}...")
            } else {
                line.clone()
            }
        })
        .collect()
}

/// Quick labor setups. A preset switches to single-crew mode and only fills
/// the rate when none has been entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaborPreset {
    RateA,
    RateB,
    Zeroed,
}

impl LaborPreset {
    pub fn hourly_rate(self) -> f64 {
        match self {
            LaborPreset::RateA => 25.0,
            LaborPreset::RateB => 125.0,
            LaborPreset::Zeroed => 0.0,
        }
    }
}

pub fn apply_labor_preset(preset: LaborPreset, mode: &mut LaborMode, inputs: &mut ProjectInputs) {
    *mode = LaborMode::Single;
    if inputs.hourly_rate == 0.0 {
        inputs.hourly_rate = preset.hourly_rate();
    }
}
