use crate::domain::cable::CableLengthMode;
use crate::domain::inputs::ProjectInputs;
use crate::domain::line_items::LineItems;
use crate::domain::vendor::VendorBook;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectHeader {
    pub project_name: String,
    pub project_number: String,
    pub customer_name: String,
    pub date: String,
}

impl ProjectHeader {
    pub fn display_name(&self) -> &str {
        if self.project_name.trim().is_empty() {
            "Unnamed Project"
        } else {
            &self.project_name
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LaborMode {
    #[default]
    Single,
    Dual,
}

impl LaborMode {
    pub fn code(self) -> &'static str {
        match self {
            LaborMode::Single => "single",
            LaborMode::Dual => "dual",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Some(LaborMode::Single),
            "dual" => Some(LaborMode::Dual),
            _ => None,
        }
    }
}

/// The whole working state of one project. This is the single source of
/// truth; everything shown to the user is derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectState {
    pub header: ProjectHeader,
    pub inputs: ProjectInputs,
    pub labor_mode: LaborMode,
    pub cable_length_mode: CableLengthMode,
    pub line_items: LineItems,
    pub vendors: VendorBook,
}

impl ProjectState {
    /// Empty project over the given (already defaulted) inputs.
    pub fn new(inputs: ProjectInputs) -> Self {
        Self {
            header: ProjectHeader::default(),
            inputs,
            labor_mode: LaborMode::default(),
            cable_length_mode: CableLengthMode::default(),
            line_items: LineItems::default(),
            vendors: VendorBook::new(),
        }
    }
}
