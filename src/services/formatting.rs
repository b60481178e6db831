use crate::domain::results::CalculationResult;

/// `$1,234.5`: grouped thousands, at most three decimals, no trailing zeros.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_number(amount.abs()))
}

/// Grouped number with up to three decimals.
pub fn format_number(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Hours below one are shown in minutes.
pub fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        format!("{:.1} minutes", hours * 60.0)
    } else {
        format!("{hours:.2} hours")
    }
}

/// Durations below one working day are shown in hours.
pub fn format_days(days: f64) -> String {
    if days < 1.0 {
        format!("{:.1} hours", days * 8.0)
    } else {
        format!("{days:.1} days")
    }
}

pub fn termination_details(total_terminations: f64, time_per_termination: f64) -> String {
    if total_terminations > 0.0 {
        format!("{total_terminations} connections × {time_per_termination:.1} min each")
    } else {
        "0.0 minutes".to_string()
    }
}

pub fn duration_details(total_hours: f64) -> String {
    if total_hours > 0.0 {
        format!("{total_hours:.1} total hours")
    } else {
        "0 total hours".to_string()
    }
}

/// Label and formatted value of every headline figure, in display order.
pub fn summary_cards(result: &CalculationResult) -> Vec<(&'static str, String)> {
    vec![
        ("Total Cables", result.total_cables.to_string()),
        ("Total Terminations", result.total_terminations.to_string()),
        ("Termination Time", format_hours(result.termination_hours)),
        ("Project Duration", format_days(result.project_days)),
        ("Labor Cost", format_currency(result.labor_cost)),
        ("Supplies & Expendables", format_currency(result.supplies_cost)),
        ("Materials & Hardware", format_currency(result.materials_cost)),
        ("Equipment & Tools", format_currency(result.equipment_cost)),
        ("Shipping & Logistics", format_currency(result.shipping_cost)),
        ("Documentation & Admin", format_currency(result.admin_cost)),
        ("Vendor Quotes", format_currency(result.vendor_quotes_total)),
        ("Active Orders", format_currency(result.active_vendor_total)),
        ("Staff Hours", format!("{:.1}", result.staff_hours_total)),
        ("Spools Required", result.spools_required.to_string()),
        ("Total Project Cost", format_currency(result.grand_total)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_grouped_and_trims_trailing_zeros() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(550.0), "$550");
        assert_eq!(format_currency(1234.5), "$1,234.5");
        assert_eq!(format_currency(1234567.891), "$1,234,567.891");
        assert_eq!(format_currency(999.9999), "$1,000");
        assert_eq!(format_currency(-20.0), "-$20");
    }

    #[test]
    fn short_durations_switch_units() {
        assert_eq!(format_hours(0.5), "30.0 minutes");
        assert_eq!(format_hours(2.0), "2.00 hours");
        assert_eq!(format_days(0.5), "4.0 hours");
        assert_eq!(format_days(1.5), "1.5 days");
    }

    #[test]
    fn details_describe_the_inputs_behind_a_total() {
        assert_eq!(
            termination_details(20.0, 1.5),
            "20 connections × 1.5 min each"
        );
        assert_eq!(termination_details(0.0, 1.5), "0.0 minutes");
        assert_eq!(duration_details(12.34), "12.3 total hours");
        assert_eq!(duration_details(0.0), "0 total hours");
    }
}
