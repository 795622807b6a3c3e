//! Chart Plotter Module
//! Bar charts and health badges drawn with egui / egui_plot.

use crate::report::StationEntry;
use crate::stats::{HealthCategory, ValueCount};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot};

pub const DRAINAGE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const DATUM_COLOR: Color32 = Color32::from_rgb(26, 188, 156); // Teal
pub const COUNTS_COLOR: Color32 = Color32::from_rgb(155, 89, 182); // Purple

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Display color for a health category.
    pub fn category_color(category: HealthCategory) -> Color32 {
        match category {
            HealthCategory::VeryHealthy => Color32::from_rgb(0x00, 0xFF, 0x00),
            HealthCategory::ModeratelyHealthy => Color32::from_rgb(0xFF, 0xFF, 0x00),
            HealthCategory::AtRisk => Color32::from_rgb(0xFF, 0xA5, 0x00),
            HealthCategory::CriticallyUnhealthy => Color32::from_rgb(0xFF, 0x00, 0x00),
        }
    }

    pub fn category_icon(category: HealthCategory) -> &'static str {
        match category {
            HealthCategory::VeryHealthy => "🟢",
            HealthCategory::ModeratelyHealthy => "🟡",
            HealthCategory::AtRisk => "🟠",
            HealthCategory::CriticallyUnhealthy => "🔴",
        }
    }

    /// Bars for a per-record series, x = row position. Missing values leave a gap.
    pub fn series_bars(values: &[Option<f64>]) -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| Bar::new(i as f64, v).width(0.9)))
            .collect()
    }

    /// Draw one column of the filtered dataset as a bar per record.
    pub fn draw_series_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        y_label: &str,
        values: &[Option<f64>],
        color: Color32,
    ) {
        let bars = Self::series_bars(values);

        Plot::new(format!("series_{}", id))
            .height(220.0)
            .allow_scroll(false)
            .x_axis_label("Record")
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(y_label));
            });
    }

    /// Histogram of the most frequent values of a column.
    pub fn draw_value_counts_chart(ui: &mut egui::Ui, id: &str, counts: &[ValueCount], limit: usize) {
        let shown: Vec<&ValueCount> = counts.iter().take(limit).collect();
        let labels: Vec<String> = shown.iter().map(|c| c.value.clone()).collect();
        let bars: Vec<Bar> = shown
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(i as f64, c.count as f64).width(0.8).name(&c.value))
            .collect();

        Plot::new(format!("value_counts_{}", id))
            .height(240.0)
            .allow_scroll(false)
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx - mark.value).abs() < f64::EPSILON {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(COUNTS_COLOR));
            });
    }

    /// Colored card for one streamgage in a county tab.
    pub fn draw_station_entry(ui: &mut egui::Ui, entry: &StationEntry) {
        egui::Frame::none()
            .fill(Self::category_color(entry.category))
            .rounding(5.0)
            .inner_margin(10.0)
            .outer_margin(5.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&entry.name)
                            .strong()
                            .color(Color32::BLACK),
                    );
                    ui.label(
                        RichText::new(format!(
                            ": {} {}",
                            Self::category_icon(entry.category),
                            entry.category
                        ))
                        .color(Color32::BLACK),
                    );
                });
            });
    }
}
