use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::line_items::CostCategory;
use crate::domain::results::CalculationResult;
use crate::services::calculator::category_cost;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("nothing to chart: every {0} value is zero")]
    Empty(&'static str),
    #[error("failed to render chart: {0}")]
    Plot(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Time,
    Cost,
}

impl ChartKind {
    fn caption(self) -> &'static str {
        match self {
            ChartKind::Time => "Time Breakdown",
            ChartKind::Cost => "Cost Analysis",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            ChartKind::Time => "Hours",
            ChartKind::Cost => "Dollars",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            ChartKind::Time => "time",
            ChartKind::Cost => "cost",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
    /// `0xRRGGBB`
    pub color: u32,
}

impl ChartBar {
    fn rgb(&self) -> RGBColor {
        RGBColor((self.color >> 16) as u8, (self.color >> 8) as u8, self.color as u8)
    }
}

fn category_color(label: &str) -> u32 {
    match label {
        "Termination Work" | "Supplies & Expendables" => 0x3498db,
        "Cable Running" | "Labor Cost" => 0xe74c3c,
        "Testing" | "Materials & Hardware" => 0xf39c12,
        "Labeling" | "Equipment & Tools" => 0x9b59b6,
        "Cleanup" | "Shipping & Logistics" => 0x1abc9c,
        "Cutover" | "Documentation & Admin" => 0x34495e,
        "Decommissioning" => 0x8e44ad,
        "Rack Setup" | "Active Orders" => 0x27ae60,
        "Vendor Quotes" => 0xe67e22,
        _ => 0x95a5a6,
    }
}

/// Non-zero bars for the chosen chart, in display order.
pub fn chart_bars(kind: ChartKind, result: &CalculationResult) -> Vec<ChartBar> {
    let values: Vec<(&'static str, f64)> = match kind {
        ChartKind::Time => result.breakdown.activities().to_vec(),
        ChartKind::Cost => {
            let mut values = vec![("Labor Cost", result.labor_cost)];
            values.extend(
                CostCategory::ALL
                    .into_iter()
                    .map(|category| (category.label(), category_cost(result, category))),
            );
            values.push(("Vendor Quotes", result.vendor_quotes_total));
            values.push(("Active Orders", result.active_vendor_total));
            values
        }
    };
    values
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| ChartBar {
            label,
            value,
            color: category_color(label),
        })
        .collect()
}

pub fn render_chart_png(
    output_path: &Path,
    kind: ChartKind,
    result: &CalculationResult,
) -> Result<(), ChartError> {
    let bars = chart_bars(kind, result);
    if bars.is_empty() {
        return Err(ChartError::Empty(kind.noun()));
    }

    let max_value = bars.iter().map(|bar| bar.value).fold(0.0, f64::max);
    let max_y = max_value * 1.1;
    let max_x = bars.len() as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(kind.caption(), ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_desc(kind.unit())
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(bars.len())
        .x_label_formatter(&|index| {
            usize::try_from(*index)
                .ok()
                .and_then(|index| bars.get(index))
                .map(|bar| bar.label.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    chart
        .draw_series(bars.iter().enumerate().map(|(index, bar)| {
            let index = index as i32;
            Rectangle::new(
                [(index, 0.0), (index + 1, bar.value)],
                ShapeStyle::from(&bar.rgb()).filled(),
            )
        }))
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Plot(e.to_string()))?;
    Ok(())
}
