use tracing::warn;

use crate::domain::cable::CableType;

pub const VENDOR_SLOTS: usize = 3;

/// Explicit reconciliation class of a vendor item. Items without one are
/// classified from their description when keyword inference is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Connector,
    Cable(CableType),
    Other,
}

impl ItemCategory {
    pub fn code(self) -> String {
        match self {
            ItemCategory::Connector => "connector".to_string(),
            ItemCategory::Cable(cable_type) => format!("cable:{}", cable_type.code()),
            ItemCategory::Other => "other".to_string(),
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "connector" => Some(ItemCategory::Connector),
            "other" => Some(ItemCategory::Other),
            "cable" => Some(ItemCategory::Cable(CableType::Other)),
            _ => value
                .strip_prefix("cable:")
                .and_then(|code| code.parse::<CableType>().ok())
                .map(ItemCategory::Cable),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorItem {
    pub id: u64,
    pub description: String,
    pub qty: f64,
    pub cost: f64,
    pub category: Option<ItemCategory>,
}

impl VendorItem {
    pub fn total(&self) -> f64 {
        self.qty * self.cost
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vendor {
    pub name: String,
    pub items: Vec<VendorItem>,
    pub active: bool,
}

impl Vendor {
    /// Name shown in reports, falling back to the slot label.
    pub fn display_name(&self, slot: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Vendor {slot}")
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
}

impl QuoteStatus {
    pub fn code(self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Approved => "approved",
        }
    }

    pub fn from_code(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("approved") {
            QuoteStatus::Approved
        } else {
            QuoteStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorQuote {
    pub id: u64,
    pub vendor_name: String,
    pub item_description: String,
    pub part_number: String,
    pub quote_number: String,
    pub amount: f64,
    pub status: QuoteStatus,
}

/// The three vendor slots together with the independent quote list.
///
/// Slots are addressed 1..=3. Every lookup that misses (bad slot, unknown
/// item or quote id) logs a warning and leaves the book untouched; the
/// returned `bool` tells the caller whether anything changed.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorBook {
    pub vendors: [Vendor; VENDOR_SLOTS],
    pub current_vendor: usize,
    pub quotes: Vec<VendorQuote>,
    pub next_id: u64,
}

impl Default for VendorBook {
    fn default() -> Self {
        Self {
            vendors: [
                Vendor {
                    active: true,
                    ..Vendor::default()
                },
                Vendor::default(),
                Vendor::default(),
            ],
            current_vendor: 1,
            quotes: Vec::new(),
            next_id: 1,
        }
    }
}

impl VendorBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vendor(&self, slot: usize) -> Option<&Vendor> {
        slot.checked_sub(1).and_then(|index| self.vendors.get(index))
    }

    fn vendor_mut(&mut self, slot: usize) -> Option<&mut Vendor> {
        let found = slot
            .checked_sub(1)
            .and_then(|index| self.vendors.get_mut(index));
        if found.is_none() {
            warn!(slot, "vendor slot not found");
        }
        found
    }

    /// Active slots in slot order, paired with their 1-based slot number.
    pub fn active_vendors(&self) -> impl Iterator<Item = (usize, &Vendor)> {
        self.vendors
            .iter()
            .enumerate()
            .filter(|(_, vendor)| vendor.active)
            .map(|(index, vendor)| (index + 1, vendor))
    }

    pub fn select(&mut self, slot: usize) -> bool {
        if self.vendor_mut(slot).is_none() {
            return false;
        }
        self.current_vendor = slot;
        true
    }

    pub fn toggle_active(&mut self, slot: usize) -> bool {
        match self.vendor_mut(slot) {
            Some(vendor) => {
                vendor.active = !vendor.active;
                true
            }
            None => false,
        }
    }

    pub fn set_active(&mut self, slot: usize, active: bool) -> bool {
        match self.vendor_mut(slot) {
            Some(vendor) => {
                vendor.active = active;
                true
            }
            None => false,
        }
    }

    pub fn set_name(&mut self, slot: usize, name: &str) -> bool {
        match self.vendor_mut(slot) {
            Some(vendor) => {
                vendor.name = name.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// Appends an item and returns its id.
    pub fn add_item(
        &mut self,
        slot: usize,
        description: &str,
        qty: f64,
        cost: f64,
        category: Option<ItemCategory>,
    ) -> Option<u64> {
        let id = self.next_id;
        let vendor = self.vendor_mut(slot)?;
        vendor.items.push(VendorItem {
            id,
            description: description.to_string(),
            qty,
            cost,
            category,
        });
        self.next_id += 1;
        Some(id)
    }

    pub fn remove_item(&mut self, slot: usize, item_id: u64) -> bool {
        let Some(vendor) = self.vendor_mut(slot) else {
            return false;
        };
        let before = vendor.items.len();
        vendor.items.retain(|item| item.id != item_id);
        if vendor.items.len() == before {
            warn!(slot, item_id, "vendor item not found");
            return false;
        }
        true
    }

    /// Applies `update` to one item in place.
    pub fn update_item<F>(&mut self, slot: usize, item_id: u64, update: F) -> bool
    where
        F: FnOnce(&mut VendorItem),
    {
        let Some(vendor) = self.vendor_mut(slot) else {
            return false;
        };
        match vendor.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                update(item);
                true
            }
            None => {
                warn!(slot, item_id, "vendor item not found");
                false
            }
        }
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut VendorItem> {
        self.vendors.iter_mut().flat_map(|vendor| vendor.items.iter_mut())
    }

    pub fn add_quote(&mut self, mut quote: VendorQuote) -> u64 {
        quote.id = self.next_id;
        self.next_id += 1;
        let id = quote.id;
        self.quotes.push(quote);
        id
    }

    pub fn remove_quote(&mut self, quote_id: u64) -> bool {
        let before = self.quotes.len();
        self.quotes.retain(|quote| quote.id != quote_id);
        if self.quotes.len() == before {
            warn!(quote_id, "vendor quote not found");
            return false;
        }
        true
    }

    pub fn set_quote_status(&mut self, quote_id: u64, status: QuoteStatus) -> bool {
        match self.quotes.iter_mut().find(|quote| quote.id == quote_id) {
            Some(quote) => {
                quote.status = status;
                true
            }
            None => {
                warn!(quote_id, "vendor quote not found");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
