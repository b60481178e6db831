use crate::domain::line_items::CostLineItem;
use crate::domain::results::VendorOrderSummary;
use crate::domain::vendor::{QuoteStatus, Vendor, VendorBook, VendorQuote};

pub fn category_total(items: &[CostLineItem]) -> f64 {
    items.iter().map(CostLineItem::total).sum()
}

pub fn vendor_order_total(vendor: &Vendor) -> f64 {
    if !vendor.active {
        return 0.0;
    }
    vendor.items.iter().map(|item| item.total()).sum()
}

/// Orders of active vendors. Inactive slots contribute nothing, whatever
/// items they hold.
pub fn active_vendor_total(book: &VendorBook) -> f64 {
    book.vendors.iter().map(vendor_order_total).sum()
}

pub fn vendor_orders(book: &VendorBook) -> Vec<VendorOrderSummary> {
    book.active_vendors()
        .filter(|(_, vendor)| !vendor.items.is_empty())
        .map(|(slot, vendor)| VendorOrderSummary {
            slot,
            name: vendor.display_name(slot),
            total: vendor_order_total(vendor),
            order_count: vendor.items.len(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuoteTotals {
    pub pending: f64,
    pub approved: f64,
    pub total: f64,
}

/// Quotes are summed by status only. Vendor activity plays no part here.
pub fn quote_totals(quotes: &[VendorQuote]) -> QuoteTotals {
    let sum_for = |status: QuoteStatus| -> f64 {
        quotes
            .iter()
            .filter(|quote| quote.status == status)
            .map(|quote| quote.amount)
            .sum()
    };
    let pending = sum_for(QuoteStatus::Pending);
    let approved = sum_for(QuoteStatus::Approved);
    QuoteTotals {
        pending,
        approved,
        total: pending + approved,
    }
}

pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
