use crate::domain::cable::CableLineItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CostCategory {
    Supplies,
    Materials,
    Equipment,
    Shipping,
    Admin,
}

impl CostCategory {
    pub const ALL: [CostCategory; 5] = [
        CostCategory::Supplies,
        CostCategory::Materials,
        CostCategory::Equipment,
        CostCategory::Shipping,
        CostCategory::Admin,
    ];

    pub fn code(self) -> &'static str {
        match self {
            CostCategory::Supplies => "supplies",
            CostCategory::Materials => "materials",
            CostCategory::Equipment => "equipment",
            CostCategory::Shipping => "shipping",
            CostCategory::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Supplies => "Supplies & Expendables",
            CostCategory::Materials => "Materials & Hardware",
            CostCategory::Equipment => "Equipment & Tools",
            CostCategory::Shipping => "Shipping & Logistics",
            CostCategory::Admin => "Documentation & Admin",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostLineItem {
    pub description: String,
    pub qty: f64,
    pub cost: f64,
}

impl CostLineItem {
    pub fn new(description: impl Into<String>, qty: f64, cost: f64) -> Self {
        Self {
            description: description.into(),
            qty,
            cost,
        }
    }

    pub fn total(&self) -> f64 {
        self.qty * self.cost
    }
}

/// Non-billable staff allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffLineItem {
    pub description: String,
    pub hours: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItems {
    pub cables: Vec<CableLineItem>,
    pub supplies: Vec<CostLineItem>,
    pub materials: Vec<CostLineItem>,
    pub equipment: Vec<CostLineItem>,
    pub shipping: Vec<CostLineItem>,
    pub admin: Vec<CostLineItem>,
    pub staff: Vec<StaffLineItem>,
}

impl LineItems {
    pub fn category(&self, category: CostCategory) -> &[CostLineItem] {
        match category {
            CostCategory::Supplies => &self.supplies,
            CostCategory::Materials => &self.materials,
            CostCategory::Equipment => &self.equipment,
            CostCategory::Shipping => &self.shipping,
            CostCategory::Admin => &self.admin,
        }
    }

    pub fn category_mut(&mut self, category: CostCategory) -> &mut Vec<CostLineItem> {
        match category {
            CostCategory::Supplies => &mut self.supplies,
            CostCategory::Materials => &mut self.materials,
            CostCategory::Equipment => &mut self.equipment,
            CostCategory::Shipping => &mut self.shipping,
            CostCategory::Admin => &mut self.admin,
        }
    }
}
