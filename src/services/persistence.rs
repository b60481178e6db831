use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::domain::cable::{CableLengthMode, CableLineItem, CableType};
use crate::domain::inputs::{InputField, ProjectInputs};
use crate::domain::line_items::{CostCategory, CostLineItem, StaffLineItem};
use crate::domain::project::{LaborMode, ProjectHeader, ProjectState};
use crate::domain::vendor::{
    ItemCategory, QuoteStatus, VENDOR_SLOTS, Vendor, VendorBook, VendorItem, VendorQuote,
};
use crate::services::config::{PlaceholderConfig, PlaceholderPolicy};
use crate::services::input_reader::{
    DefaultTable, inputs_to_fields, merge_inputs, number_value, parse_amount, value_or_default,
};

/// Documents written by this crate carry this version. Unversioned documents
/// predate it and go through the legacy placeholder guard.
pub const FORMAT_VERSION: u64 = 2;

/// Storage keys used by the calculator.
pub mod keys {
    pub const PROJECT: &str = "project_calculator";
    pub const LEGACY_CABLE_ITEMS: &str = "cable_line_items";
    pub const AUTO_SAVE: &str = "auto_saved_project";
    pub const AUTO_SAVE_ENABLED: &str = "auto_save_enabled";
    pub const CURRENT_PROJECT: &str = "current_project";
    pub const PROJECT_HISTORY: &str = "project_history";
    pub const RECONCILIATION_HISTORY: &str = "reconciliation_history";
    pub const DEFAULT_SETTINGS: &str = "default_settings";
    pub const SAVED_PROJECT_PREFIX: &str = "saved_project_";

    pub fn saved_project(name: &str) -> String {
        format!("{SAVED_PROJECT_PREFIX}{name}")
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to serialize project: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct HeaderRecord {
    project_name: String,
    project_number: String,
    customer_name: String,
    date: String,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct CableLineItemRecord {
    #[serde(alias = "cableType", alias = "type")]
    cable_type: Option<String>,
    qty: Value,
    length: Value,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct CostLineItemRecord {
    description: String,
    qty: Value,
    #[serde(alias = "amount")]
    cost: Value,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct StaffLineItemRecord {
    description: String,
    hours: Value,
    notes: String,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct VendorItemRecord {
    id: Option<u64>,
    description: String,
    qty: Option<Value>,
    cost: Value,
    category: Option<String>,
}

/// Items stay raw on the way in so that one bad item is dropped on its own.
#[derive(Deserialize, Default)]
#[serde(default)]
struct VendorRecord {
    name: String,
    active: Option<bool>,
    items: Vec<Value>,
}

#[derive(Serialize)]
struct VendorSlotRecord {
    name: String,
    active: bool,
    items: Vec<VendorItemRecord>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct QuoteRecord {
    id: Option<u64>,
    #[serde(alias = "vendorName")]
    vendor_name: String,
    #[serde(alias = "itemDescription")]
    item_description: String,
    #[serde(alias = "partNumber")]
    part_number: String,
    #[serde(alias = "quoteNumber")]
    quote_number: String,
    amount: Value,
    status: Option<String>,
}

#[derive(Serialize)]
struct LineItemsRecord {
    cables: Vec<CableLineItemRecord>,
    supplies: Vec<CostLineItemRecord>,
    materials: Vec<CostLineItemRecord>,
    equipment: Vec<CostLineItemRecord>,
    shipping: Vec<CostLineItemRecord>,
    admin: Vec<CostLineItemRecord>,
    staff: Vec<StaffLineItemRecord>,
}

#[derive(Serialize)]
struct VendorBookRecord {
    current_vendor: usize,
    next_id: u64,
    slots: Vec<VendorSlotRecord>,
    quotes: Vec<QuoteRecord>,
}

#[derive(Serialize)]
struct ProjectRecord {
    version: u64,
    header: HeaderRecord,
    labor_mode: String,
    cable_length_mode: String,
    inputs: Map<String, Value>,
    line_items: LineItemsRecord,
    vendors: VendorBookRecord,
}

/// What the decoder needs besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions<'a> {
    pub table: &'a DefaultTable,
    pub placeholders: &'a PlaceholderConfig,
}

/// A decoded project together with every recovery the decoder made.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub state: ProjectState,
    pub warnings: Vec<String>,
}

struct Decoder<'a> {
    options: DecodeOptions<'a>,
    legacy: bool,
    warnings: Vec<String>,
}

impl Decoder<'_> {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    fn record<T: DeserializeOwned + Default>(&mut self, value: &Value, what: &str) -> T {
        match serde_json::from_value(value.clone()) {
            Ok(record) => record,
            Err(e) => {
                self.warn(format!("discarding malformed {what}: {e}"));
                T::default()
            }
        }
    }

    /// Decodes each element on its own so one bad entry does not take the
    /// whole list with it.
    fn list<T: DeserializeOwned>(&mut self, value: &Value, what: &str) -> Vec<T> {
        let Some(entries) = value.as_array() else {
            self.warn(format!("expected a list of {what}, found {value}"));
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    self.warn(format!("dropping malformed {what} entry: {e}"));
                    None
                }
            })
            .collect()
    }

    fn is_placeholder(&self, item: &CableLineItem) -> bool {
        self.options
            .placeholders
            .values
            .iter()
            .any(|value| *value == item.qty || *value == item.length)
    }

    fn cables(&mut self, value: &Value) -> Vec<CableLineItem> {
        let records: Vec<CableLineItemRecord> = self.list(value, "cable line item");
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let item = cable_from_record(record);
            if self.legacy && self.is_placeholder(&item) {
                match self.options.placeholders.policy {
                    PlaceholderPolicy::Discard => {
                        self.warn(format!(
                            "discarding cable line item with placeholder values (qty {}, length {})",
                            item.qty, item.length
                        ));
                        continue;
                    }
                    PlaceholderPolicy::Warn => self.warn(format!(
                        "cable line item matches a legacy placeholder (qty {}, length {})",
                        item.qty, item.length
                    )),
                }
            }
            items.push(item);
        }
        items
    }

    fn merge(&mut self, state: &mut ProjectState, root: &Map<String, Value>) {
        if let Some(value) = root.get("header") {
            let record: Map<String, Value> = self.record(value, "project header");
            merge_header(&mut state.header, &record);
        }
        if let Some(value) = root.get("inputs") {
            match value.as_object() {
                Some(fields) => merge_inputs(&mut state.inputs, fields, self.options.table),
                None => self.warn(format!("expected an input map, found {value}")),
            }
        }
        self.modes(state, root.get("labor_mode"), root.get("cable_length_mode"));

        if let Some(value) = root.get("line_items") {
            match value.as_object() {
                Some(items) => self.merge_line_items(state, items),
                None => self.warn(format!("expected a line item section, found {value}")),
            }
        }
        if let Some(value) = root.get("vendors") {
            match value.as_object() {
                Some(vendors) => self.merge_vendors(&mut state.vendors, vendors),
                None => self.warn(format!("expected a vendor section, found {value}")),
            }
        }

        if self.legacy {
            self.merge_legacy(state, root);
        }
        for key in root.keys() {
            if !is_known_key(key, self.legacy) {
                warn!(section = %key, "ignoring unknown project section");
            }
        }
    }

    fn modes(&mut self, state: &mut ProjectState, labor: Option<&Value>, cable: Option<&Value>) {
        if let Some(mode) = labor.and_then(Value::as_str) {
            match LaborMode::from_code(mode) {
                Some(mode) => state.labor_mode = mode,
                None => self.warn(format!("ignoring unknown labor mode {mode}")),
            }
        }
        if let Some(mode) = cable.and_then(Value::as_str) {
            match CableLengthMode::from_code(mode) {
                Some(mode) => state.cable_length_mode = mode,
                None => self.warn(format!("ignoring unknown cable length mode {mode}")),
            }
        }
    }

    fn costs(&mut self, value: &Value, category: CostCategory) -> Vec<CostLineItem> {
        let records: Vec<CostLineItemRecord> =
            self.list(value, &format!("{} line item", category.code()));
        records.into_iter().map(cost_from_record).collect()
    }

    fn staff(&mut self, value: &Value) -> Vec<StaffLineItem> {
        let records: Vec<StaffLineItemRecord> = self.list(value, "staff line item");
        records.into_iter().map(staff_from_record).collect()
    }

    fn merge_line_items(&mut self, state: &mut ProjectState, items: &Map<String, Value>) {
        if let Some(value) = items.get("cables") {
            state.line_items.cables = self.cables(value);
        }
        for category in CostCategory::ALL {
            if let Some(value) = items.get(category.code()) {
                *state.line_items.category_mut(category) = self.costs(value, category);
            }
        }
        if let Some(value) = items.get("staff") {
            state.line_items.staff = self.staff(value);
        }
    }

    /// Unversioned documents: form ids at the root, modes under `state`,
    /// rows under `lineItems`. Project files wrap all of that in
    /// `calculator` and keep the vendor book under `vendor`.
    fn merge_legacy(&mut self, state: &mut ProjectState, root: &Map<String, Value>) {
        merge_header(&mut state.header, root);
        for (name, value) in root {
            if let Some(field) = InputField::from_name(name) {
                let spec = self.options.table.spec(field);
                state.inputs.set(field, value_or_default(Some(value), &spec));
            }
        }
        if let Some(fields) = root.get("inputValues").and_then(Value::as_object) {
            merge_inputs(&mut state.inputs, fields, self.options.table);
        }
        if let Some(value) = root.get("state") {
            match value.as_object() {
                Some(modes) => {
                    self.modes(state, modes.get("laborMode"), modes.get("cableLengthMode"))
                }
                None => self.warn(format!("expected a calculator state, found {value}")),
            }
        }

        if let Some(value) = root.get("lineItems") {
            match value.as_object() {
                Some(items) => self.merge_legacy_line_items(state, items),
                None => self.warn(format!("expected a line item section, found {value}")),
            }
        } else if let Some(value) = root.get("cableLineItems") {
            state.line_items.cables = self.cables(value);
        }
        if let Some(value) = root.get("vendor") {
            match value.as_object() {
                Some(vendors) => self.merge_legacy_vendors(&mut state.vendors, vendors),
                None => self.warn(format!("expected a vendor section, found {value}")),
            }
        }
        if let Some(value) = root.get("calculator") {
            match value.as_object() {
                Some(calculator) => self.merge_legacy(state, calculator),
                None => self.warn(format!("expected a calculator section, found {value}")),
            }
        }
    }

    fn merge_legacy_line_items(&mut self, state: &mut ProjectState, items: &Map<String, Value>) {
        if let Some(value) = items.get("cableLineItems") {
            state.line_items.cables = self.cables(value);
        }
        for category in CostCategory::ALL {
            if let Some(value) = items.get(&format!("{}LineItems", category.code())) {
                *state.line_items.category_mut(category) = self.costs(value, category);
            }
        }
        if let Some(value) = items.get("staffLineItems") {
            state.line_items.staff = self.staff(value);
        }
        if let Some(value) = items.get("vendorQuotes") {
            match value.as_object() {
                Some(vendors) => self.merge_legacy_vendors(&mut state.vendors, vendors),
                None => self.warn(format!("expected a vendor section, found {value}")),
            }
        }
    }

    fn vendor_slot(&mut self, slot: &mut Vendor, record: VendorRecord) {
        let active = record.active.unwrap_or(slot.active);
        let items: Vec<VendorItemRecord> = self.list(&Value::Array(record.items), "vendor item");
        *slot = Vendor {
            name: record.name,
            active,
            items: items.into_iter().map(vendor_item_from_record).collect(),
        };
    }

    fn merge_vendors(&mut self, book: &mut VendorBook, root: &Map<String, Value>) {
        if let Some(value) = root.get("slots") {
            let records: Vec<VendorRecord> = self.list(value, "vendor");
            if records.len() > VENDOR_SLOTS {
                self.warn(format!(
                    "ignoring {} vendor slots beyond the first {VENDOR_SLOTS}",
                    records.len() - VENDOR_SLOTS
                ));
            }
            for (slot, record) in book.vendors.iter_mut().zip(records) {
                self.vendor_slot(slot, record);
            }
        }
        if let Some(value) = root.get("quotes") {
            let records: Vec<QuoteRecord> = self.list(value, "vendor quote");
            book.quotes = records.into_iter().map(quote_from_record).collect();
        }
        select_slot(book, root.get("current_vendor"));
        let stored_next = root.get("next_id").and_then(Value::as_u64).unwrap_or(1);
        assign_ids(book, stored_next);
    }

    /// Slots are keyed by their number (`"1"` to `"3"`).
    fn merge_legacy_vendors(&mut self, book: &mut VendorBook, root: &Map<String, Value>) {
        if let Some(value) = root.get("vendors") {
            match value.as_object() {
                Some(slots) => {
                    for (key, value) in slots {
                        let slot = key
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .filter(|slot| (1..=VENDOR_SLOTS).contains(slot));
                        match slot {
                            Some(slot) => {
                                let record: VendorRecord = self.record(value, "vendor");
                                self.vendor_slot(&mut book.vendors[slot - 1], record);
                            }
                            None => self.warn(format!("ignoring vendor slot {key}")),
                        }
                    }
                }
                None => self.warn(format!("expected vendor slots, found {value}")),
            }
        }
        if let Some(value) = root.get("vendorQuotes") {
            let records: Vec<QuoteRecord> = self.list(value, "vendor quote");
            book.quotes = records.into_iter().map(quote_from_record).collect();
        }
        select_slot(book, root.get("currentVendor"));
        let stored_next = book.next_id;
        assign_ids(book, stored_next);
    }
}

const CURRENT_KEYS: [&str; 7] = [
    "version",
    "header",
    "inputs",
    "labor_mode",
    "cable_length_mode",
    "line_items",
    "vendors",
];

const LEGACY_KEYS: [&str; 16] = [
    "state",
    "lineItems",
    "cableLineItems",
    "inputValues",
    "calculator",
    "vendor",
    "results",
    "settings",
    "summaryCards",
    "timestamp",
    "laborPreset",
    "projectName",
    "projectNumber",
    "customerName",
    "projectDate",
    "date",
];

fn is_known_key(key: &str, legacy: bool) -> bool {
    CURRENT_KEYS.contains(&key)
        || (legacy && (LEGACY_KEYS.contains(&key) || InputField::from_name(key).is_some()))
}

fn select_slot(book: &mut VendorBook, value: Option<&Value>) {
    let slot = match value {
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };
    if let Some(slot) = slot.map(|slot| slot as usize) {
        if (1..=VENDOR_SLOTS).contains(&slot) {
            book.current_vendor = slot;
        }
    }
}

fn lookup<'v>(map: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter().find_map(|key| map.get(*key))
}

fn merge_header(header: &mut ProjectHeader, fields: &Map<String, Value>) {
    let text = |keys: &[&str]| lookup(fields, keys).and_then(Value::as_str).map(str::to_string);
    if let Some(value) = text(&["project_name", "projectName"]) {
        header.project_name = value;
    }
    if let Some(value) = text(&["project_number", "projectNumber"]) {
        header.project_number = value;
    }
    if let Some(value) = text(&["customer_name", "customerName"]) {
        header.customer_name = value;
    }
    if let Some(value) = text(&["date", "projectDate"]) {
        header.date = value;
    }
}

/// Lenient number read for line item fields: numbers, numeric strings,
/// anything else is zero.
fn amount(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0).max(0.0),
        Value::String(text) => parse_amount(text),
        _ => 0.0,
    }
}

fn cable_from_record(record: CableLineItemRecord) -> CableLineItem {
    CableLineItem {
        cable_type: record
            .cable_type
            .as_deref()
            .and_then(|code| code.parse::<CableType>().ok()),
        qty: amount(&record.qty),
        length: amount(&record.length),
    }
}

fn cost_from_record(record: CostLineItemRecord) -> CostLineItem {
    CostLineItem {
        description: record.description,
        qty: amount(&record.qty),
        cost: amount(&record.cost),
    }
}

fn staff_from_record(record: StaffLineItemRecord) -> StaffLineItem {
    StaffLineItem {
        description: record.description,
        hours: amount(&record.hours),
        notes: record.notes,
    }
}

fn vendor_item_from_record(record: VendorItemRecord) -> VendorItem {
    VendorItem {
        id: record.id.unwrap_or(0),
        description: record.description,
        // An absent quantity means a single unit.
        qty: record.qty.as_ref().map(amount).unwrap_or(1.0),
        cost: amount(&record.cost),
        category: record.category.as_deref().and_then(ItemCategory::from_code),
    }
}

fn quote_from_record(record: QuoteRecord) -> VendorQuote {
    VendorQuote {
        id: record.id.unwrap_or(0),
        vendor_name: record.vendor_name,
        item_description: record.item_description,
        part_number: record.part_number,
        quote_number: record.quote_number,
        amount: amount(&record.amount),
        status: record
            .status
            .as_deref()
            .map(QuoteStatus::from_code)
            .unwrap_or_default(),
    }
}

/// Items and quotes loaded without an id (or with a duplicate one) get a
/// fresh id so that later lookups stay unambiguous.
fn assign_ids(book: &mut VendorBook, stored_next: u64) {
    let mut seen = std::collections::BTreeSet::new();
    let highest = book
        .vendors
        .iter()
        .flat_map(|vendor| vendor.items.iter().map(|item| item.id))
        .chain(book.quotes.iter().map(|quote| quote.id))
        .max()
        .unwrap_or(0);
    let mut next = stored_next.max(highest + 1);
    let ids = book
        .vendors
        .iter_mut()
        .flat_map(|vendor| vendor.items.iter_mut().map(|item| &mut item.id))
        .chain(book.quotes.iter_mut().map(|quote| &mut quote.id));
    for id in ids {
        if *id == 0 || !seen.insert(*id) {
            *id = next;
            seen.insert(next);
            next += 1;
        }
    }
    book.next_id = next;
}

fn cable_record(item: &CableLineItem) -> CableLineItemRecord {
    CableLineItemRecord {
        cable_type: item.cable_type.map(|cable_type| cable_type.code().to_string()),
        qty: number_value(item.qty),
        length: number_value(item.length),
    }
}

fn cost_record(item: &CostLineItem) -> CostLineItemRecord {
    CostLineItemRecord {
        description: item.description.clone(),
        qty: number_value(item.qty),
        cost: number_value(item.cost),
    }
}

fn project_record(state: &ProjectState) -> ProjectRecord {
    let items = &state.line_items;
    let costs = |category: CostCategory| -> Vec<CostLineItemRecord> {
        items.category(category).iter().map(cost_record).collect()
    };
    ProjectRecord {
        version: FORMAT_VERSION,
        header: HeaderRecord {
            project_name: state.header.project_name.clone(),
            project_number: state.header.project_number.clone(),
            customer_name: state.header.customer_name.clone(),
            date: state.header.date.clone(),
        },
        labor_mode: state.labor_mode.code().to_string(),
        cable_length_mode: state.cable_length_mode.code().to_string(),
        inputs: inputs_to_fields(&state.inputs),
        line_items: LineItemsRecord {
            cables: items.cables.iter().map(cable_record).collect(),
            supplies: costs(CostCategory::Supplies),
            materials: costs(CostCategory::Materials),
            equipment: costs(CostCategory::Equipment),
            shipping: costs(CostCategory::Shipping),
            admin: costs(CostCategory::Admin),
            staff: items
                .staff
                .iter()
                .map(|item| StaffLineItemRecord {
                    description: item.description.clone(),
                    hours: number_value(item.hours),
                    notes: item.notes.clone(),
                })
                .collect(),
        },
        vendors: VendorBookRecord {
            current_vendor: state.vendors.current_vendor,
            next_id: state.vendors.next_id,
            slots: state
                .vendors
                .vendors
                .iter()
                .map(|vendor| VendorSlotRecord {
                    name: vendor.name.clone(),
                    active: vendor.active,
                    items: vendor
                        .items
                        .iter()
                        .map(|item| VendorItemRecord {
                            id: Some(item.id),
                            description: item.description.clone(),
                            qty: Some(number_value(item.qty)),
                            cost: number_value(item.cost),
                            category: item.category.map(ItemCategory::code),
                        })
                        .collect(),
                })
                .collect(),
            quotes: state
                .vendors
                .quotes
                .iter()
                .map(|quote| QuoteRecord {
                    id: Some(quote.id),
                    vendor_name: quote.vendor_name.clone(),
                    item_description: quote.item_description.clone(),
                    part_number: quote.part_number.clone(),
                    quote_number: quote.quote_number.clone(),
                    amount: number_value(quote.amount),
                    status: Some(quote.status.code().to_string()),
                })
                .collect(),
        },
    }
}

pub fn project_to_value(state: &ProjectState) -> Result<Value, PersistenceError> {
    Ok(serde_json::to_value(project_record(state))?)
}

pub fn encode_project(state: &ProjectState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&project_record(state))?)
}

/// Cable rows alone, for the legacy duplicate key.
pub fn encode_cable_items(items: &[CableLineItem]) -> Result<String, PersistenceError> {
    let records: Vec<CableLineItemRecord> = items.iter().map(cable_record).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn decode_cable_items(
    input: &str,
    options: DecodeOptions<'_>,
) -> (Vec<CableLineItem>, Vec<String>) {
    let mut decoder = Decoder {
        options,
        legacy: true,
        warnings: Vec::new(),
    };
    let items = match serde_json::from_str::<Value>(input) {
        Ok(value) => decoder.cables(&value),
        Err(e) => {
            decoder.warn(format!("discarding malformed cable line items: {e}"));
            Vec::new()
        }
    };
    (items, decoder.warnings)
}

/// Whether a document carries cable rows of its own. Documents without them
/// fall back to the legacy duplicate key.
pub fn has_cable_items(value: &Value) -> bool {
    let legacy = |root: &Value| {
        root.get("lineItems")
            .and_then(|items| items.get("cableLineItems"))
            .or_else(|| root.get("cableLineItems"))
            .is_some()
    };
    value.pointer("/line_items/cables").is_some()
        || legacy(value)
        || value.get("calculator").is_some_and(legacy)
}

/// Applies the sections present in `value` on top of `state`, leaving
/// everything else untouched. Returns the recoveries made along the way.
pub fn merge_project(
    state: &mut ProjectState,
    value: &Value,
    options: DecodeOptions<'_>,
) -> Vec<String> {
    let mut decoder = Decoder {
        options,
        legacy: value.get("version").and_then(Value::as_u64).is_none(),
        warnings: Vec::new(),
    };
    match value.as_object() {
        Some(root) => decoder.merge(state, root),
        None => decoder.warn(format!("expected a project document, found {value}")),
    }
    decoder.warnings
}

pub fn decode_project_value(value: &Value, options: DecodeOptions<'_>) -> Decoded {
    let mut state = ProjectState::new(options.table.default_inputs());
    let warnings = merge_project(&mut state, value, options);
    Decoded { state, warnings }
}

/// Never fails: malformed JSON yields the default project and a warning.
pub fn decode_project(input: &str, options: DecodeOptions<'_>) -> Decoded {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => decode_project_value(&value, options),
        Err(e) => {
            let message = format!("discarding malformed project document: {e}");
            warn!("{message}");
            Decoded {
                state: ProjectState::new(options.table.default_inputs()),
                warnings: vec![message],
            }
        }
    }
}

/// Cable constants a user can keep as their own defaults.
pub const DEFAULT_SETTING_FIELDS: [InputField; 4] = [
    InputField::TerminationsPerCable,
    InputField::TimePerTermination,
    InputField::WasteFactor,
    InputField::SpoolLength,
];

pub fn encode_default_settings(inputs: &ProjectInputs) -> Result<String, PersistenceError> {
    let fields: Map<String, Value> = DEFAULT_SETTING_FIELDS
        .iter()
        .map(|field| (field.name().to_string(), number_value(inputs.get(*field))))
        .collect();
    Ok(serde_json::to_string_pretty(&fields)?)
}

/// Applies stored default settings to `inputs`. Returns false when the
/// stored document could not be read.
pub fn apply_default_settings(
    inputs: &mut ProjectInputs,
    input: &str,
    table: &DefaultTable,
) -> bool {
    let fields = match serde_json::from_str::<Map<String, Value>>(input) {
        Ok(fields) => fields,
        Err(e) => {
            warn!("discarding malformed default settings: {e}");
            return false;
        }
    };
    for field in DEFAULT_SETTING_FIELDS {
        if let Some(value) = fields.get(field.name()) {
            inputs.set(field, value_or_default(Some(value), &table.spec(field)));
        }
    }
    true
}

pub fn reset_default_settings(inputs: &mut ProjectInputs, table: &DefaultTable) {
    for field in DEFAULT_SETTING_FIELDS {
        inputs.set(field, table.spec(field).default);
    }
}
