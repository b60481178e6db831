/// Every scalar field the calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputField {
    NumCables,
    AvgCableLength,
    TerminationsPerCable,
    TimePerTermination,
    WasteFactor,
    SpoolLength,
    NumTechnicians,
    HourlyRate,
    WorkHoursPerDay,
    StaffHours,
    TechACount,
    TechARate,
    TechAHours,
    TechBCount,
    TechBRate,
    TechBHours,
    CableRunTime,
    TestingTime,
    RackSetupTime,
    LabelingTime,
    CleanupTime,
    CutoverTime,
    DecommissioningTime,
}

impl InputField {
    pub const ALL: [InputField; 23] = [
        InputField::NumCables,
        InputField::AvgCableLength,
        InputField::TerminationsPerCable,
        InputField::TimePerTermination,
        InputField::WasteFactor,
        InputField::SpoolLength,
        InputField::NumTechnicians,
        InputField::HourlyRate,
        InputField::WorkHoursPerDay,
        InputField::StaffHours,
        InputField::TechACount,
        InputField::TechARate,
        InputField::TechAHours,
        InputField::TechBCount,
        InputField::TechBRate,
        InputField::TechBHours,
        InputField::CableRunTime,
        InputField::TestingTime,
        InputField::RackSetupTime,
        InputField::LabelingTime,
        InputField::CleanupTime,
        InputField::CutoverTime,
        InputField::DecommissioningTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputField::NumCables => "num_cables",
            InputField::AvgCableLength => "avg_cable_length",
            InputField::TerminationsPerCable => "terminations_per_cable",
            InputField::TimePerTermination => "time_per_termination",
            InputField::WasteFactor => "waste_factor",
            InputField::SpoolLength => "spool_length",
            InputField::NumTechnicians => "num_technicians",
            InputField::HourlyRate => "hourly_rate",
            InputField::WorkHoursPerDay => "work_hours_per_day",
            InputField::StaffHours => "staff_hours",
            InputField::TechACount => "tech_a_count",
            InputField::TechARate => "tech_a_rate",
            InputField::TechAHours => "tech_a_hours",
            InputField::TechBCount => "tech_b_count",
            InputField::TechBRate => "tech_b_rate",
            InputField::TechBHours => "tech_b_hours",
            InputField::CableRunTime => "cable_run_time",
            InputField::TestingTime => "testing_time",
            InputField::RackSetupTime => "rack_setup_time",
            InputField::LabelingTime => "labeling_time",
            InputField::CleanupTime => "cleanup_time",
            InputField::CutoverTime => "cutover_time",
            InputField::DecommissioningTime => "decommissioning_time",
        }
    }

    /// Accepts the snake_case name as well as the camelCase spelling used by
    /// older project files (`numCables`, `techAHours`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|field| {
            field.name().replace('_', "") == normalized
        })
    }
}

/// Raw scalar inputs of a project. Values are already clamped and defaulted
/// by the input reader, so every field is a plain non-negative number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInputs {
    pub num_cables: f64,
    pub avg_cable_length: f64,
    pub terminations_per_cable: f64,
    pub time_per_termination: f64,
    pub waste_factor: f64,
    pub spool_length: f64,
    pub num_technicians: f64,
    pub hourly_rate: f64,
    pub work_hours_per_day: f64,
    pub staff_hours: f64,
    pub tech_a_count: f64,
    pub tech_a_rate: f64,
    pub tech_a_hours: f64,
    pub tech_b_count: f64,
    pub tech_b_rate: f64,
    pub tech_b_hours: f64,
    pub cable_run_time: f64,
    pub testing_time: f64,
    pub rack_setup_time: f64,
    pub labeling_time: f64,
    pub cleanup_time: f64,
    pub cutover_time: f64,
    pub decommissioning_time: f64,
}

impl ProjectInputs {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::NumCables => self.num_cables,
            InputField::AvgCableLength => self.avg_cable_length,
            InputField::TerminationsPerCable => self.terminations_per_cable,
            InputField::TimePerTermination => self.time_per_termination,
            InputField::WasteFactor => self.waste_factor,
            InputField::SpoolLength => self.spool_length,
            InputField::NumTechnicians => self.num_technicians,
            InputField::HourlyRate => self.hourly_rate,
            InputField::WorkHoursPerDay => self.work_hours_per_day,
            InputField::StaffHours => self.staff_hours,
            InputField::TechACount => self.tech_a_count,
            InputField::TechARate => self.tech_a_rate,
            InputField::TechAHours => self.tech_a_hours,
            InputField::TechBCount => self.tech_b_count,
            InputField::TechBRate => self.tech_b_rate,
            InputField::TechBHours => self.tech_b_hours,
            InputField::CableRunTime => self.cable_run_time,
            InputField::TestingTime => self.testing_time,
            InputField::RackSetupTime => self.rack_setup_time,
            InputField::LabelingTime => self.labeling_time,
            InputField::CleanupTime => self.cleanup_time,
            InputField::CutoverTime => self.cutover_time,
            InputField::DecommissioningTime => self.decommissioning_time,
        }
    }

    pub fn set(&mut self, field: InputField, value: f64) {
        let slot = match field {
            InputField::NumCables => &mut self.num_cables,
            InputField::AvgCableLength => &mut self.avg_cable_length,
            InputField::TerminationsPerCable => &mut self.terminations_per_cable,
            InputField::TimePerTermination => &mut self.time_per_termination,
            InputField::WasteFactor => &mut self.waste_factor,
            InputField::SpoolLength => &mut self.spool_length,
            InputField::NumTechnicians => &mut self.num_technicians,
            InputField::HourlyRate => &mut self.hourly_rate,
            InputField::WorkHoursPerDay => &mut self.work_hours_per_day,
            InputField::StaffHours => &mut self.staff_hours,
            InputField::TechACount => &mut self.tech_a_count,
            InputField::TechARate => &mut self.tech_a_rate,
            InputField::TechAHours => &mut self.tech_a_hours,
            InputField::TechBCount => &mut self.tech_b_count,
            InputField::TechBRate => &mut self.tech_b_rate,
            InputField::TechBHours => &mut self.tech_b_hours,
            InputField::CableRunTime => &mut self.cable_run_time,
            InputField::TestingTime => &mut self.testing_time,
            InputField::RackSetupTime => &mut self.rack_setup_time,
            InputField::LabelingTime => &mut self.labeling_time,
            InputField::CleanupTime => &mut self.cleanup_time,
            InputField::CutoverTime => &mut self.cutover_time,
            InputField::DecommissioningTime => &mut self.decommissioning_time,
        };
        *slot = value;
    }

    pub fn to_fields(&self) -> Vec<(InputField, f64)> {
        InputField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .collect()
    }
}
