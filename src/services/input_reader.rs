use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::inputs::{InputField, ProjectInputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field: InputField,
    pub kind: FieldKind,
    pub default: f64,
    /// An entered zero is replaced by the default as well.
    pub zero_means_default: bool,
}

impl FieldSpec {
    const fn new(field: InputField, kind: FieldKind, default: f64) -> Self {
        Self {
            field,
            kind,
            default,
            zero_means_default: false,
        }
    }

    const fn nonzero(mut self) -> Self {
        self.zero_means_default = true;
        self
    }
}

/// Parse rules and fallback values for every input field.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTable {
    specs: Vec<FieldSpec>,
}

impl Default for DefaultTable {
    fn default() -> Self {
        Self::factory()
    }
}

impl DefaultTable {
    pub fn factory() -> Self {
        use FieldKind::{Float, Integer};
        use InputField::*;
        let specs = vec![
            FieldSpec::new(NumCables, Integer, 0.0),
            FieldSpec::new(AvgCableLength, Integer, 0.0),
            FieldSpec::new(TerminationsPerCable, Integer, 2.0).nonzero(),
            FieldSpec::new(TimePerTermination, Float, 1.5),
            FieldSpec::new(WasteFactor, Float, 7.5),
            FieldSpec::new(SpoolLength, Integer, 1000.0).nonzero(),
            FieldSpec::new(NumTechnicians, Integer, 1.0),
            FieldSpec::new(HourlyRate, Float, 25.0),
            FieldSpec::new(WorkHoursPerDay, Float, 0.0),
            FieldSpec::new(StaffHours, Float, 0.0),
            FieldSpec::new(TechACount, Integer, 1.0),
            FieldSpec::new(TechARate, Float, 25.0),
            FieldSpec::new(TechAHours, Float, 0.0),
            FieldSpec::new(TechBCount, Integer, 1.0),
            FieldSpec::new(TechBRate, Float, 125.0),
            FieldSpec::new(TechBHours, Float, 0.0),
            FieldSpec::new(CableRunTime, Float, 0.0),
            FieldSpec::new(TestingTime, Float, 0.0),
            FieldSpec::new(RackSetupTime, Float, 0.0),
            FieldSpec::new(LabelingTime, Float, 0.0),
            FieldSpec::new(CleanupTime, Float, 0.0),
            FieldSpec::new(CutoverTime, Float, 0.0),
            FieldSpec::new(DecommissioningTime, Float, 0.0),
        ];
        Self { specs }
    }

    /// Factory table with the configured default values replaced. Unknown
    /// field names are reported and skipped.
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Self {
        let mut table = Self::factory();
        for (name, value) in overrides {
            match InputField::from_name(name) {
                Some(field) => table.set_default(field, *value),
                None => warn!(field = %name, "ignoring default for unknown input field"),
            }
        }
        table
    }

    pub fn spec(&self, field: InputField) -> FieldSpec {
        self.specs
            .iter()
            .copied()
            .find(|spec| spec.field == field)
            .unwrap_or(FieldSpec::new(field, FieldKind::Float, 0.0))
    }

    pub fn set_default(&mut self, field: InputField, value: f64) {
        if let Some(spec) = self.specs.iter_mut().find(|spec| spec.field == field) {
            spec.default = value.max(0.0);
        }
    }

    pub fn default_inputs(&self) -> ProjectInputs {
        let mut inputs = ProjectInputs::default();
        for spec in &self.specs {
            inputs.set(spec.field, spec.default);
        }
        inputs
    }
}

/// Longest numeric prefix of `text`, the way form fields are read: `"12ft"`
/// gives 12 and `"1.5 min"` gives 1.5.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (index, c) in text.char_indices() {
        match c {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = index + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    text[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Non-negative amount from free text, zero when nothing numeric is found.
pub fn parse_amount(text: &str) -> f64 {
    leading_number(text)
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
        .max(0.0)
}

fn normalize(value: Option<f64>, spec: &FieldSpec) -> f64 {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return spec.default;
    };
    let value = match spec.kind {
        FieldKind::Integer => value.trunc(),
        FieldKind::Float => value,
    };
    let value = value.max(0.0);
    if spec.zero_means_default && value == 0.0 {
        spec.default
    } else {
        value
    }
}

/// Reads a raw text value. Missing, empty or unparsable text yields the
/// field default; this never fails.
pub fn parse_or_default(raw: Option<&str>, spec: &FieldSpec) -> f64 {
    normalize(raw.and_then(leading_number), spec)
}

/// Same as [`parse_or_default`] for values decoded from a JSON document,
/// which may hold numbers or numeric strings.
pub fn value_or_default(raw: Option<&Value>, spec: &FieldSpec) -> f64 {
    match raw {
        Some(Value::Number(number)) => normalize(number.as_f64(), spec),
        Some(Value::String(text)) => parse_or_default(Some(text), spec),
        _ => spec.default,
    }
}

/// Builds inputs from a field map, defaulting everything that is absent.
pub fn read_inputs(fields: &Map<String, Value>, table: &DefaultTable) -> ProjectInputs {
    let mut inputs = table.default_inputs();
    merge_inputs(&mut inputs, fields, table);
    inputs
}

/// Overwrites only the fields present in `fields`; unknown keys are ignored.
pub fn merge_inputs(inputs: &mut ProjectInputs, fields: &Map<String, Value>, table: &DefaultTable) {
    for (name, value) in fields {
        match InputField::from_name(name) {
            Some(field) => inputs.set(field, value_or_default(Some(value), &table.spec(field))),
            None => warn!(field = %name, "ignoring unknown input field"),
        }
    }
}

pub fn set_input(inputs: &mut ProjectInputs, field: InputField, raw: &str, table: &DefaultTable) {
    inputs.set(field, parse_or_default(Some(raw), &table.spec(field)));
}

pub fn inputs_to_fields(inputs: &ProjectInputs) -> Map<String, Value> {
    inputs
        .to_fields()
        .into_iter()
        .map(|(field, value)| (field.name().to_string(), number_value(value)))
        .collect()
}

/// Whole numbers are written without a fractional part so stored documents
/// stay readable and stable across round trips.
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::from(0))
    }
}
