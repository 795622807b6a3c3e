//! Report View Widget
//! Central scrollable panel: headline metrics, attribute charts, per-county
//! health panels and suggested actions.

use crate::charts::{ChartPlotter, DATUM_COLOR, DRAINAGE_COLOR};
use crate::pipeline::DashboardSnapshot;
use crate::report::{CountyReport, Guidance};
use crate::stats::{HealthCategory, Metrics};
use egui::{Color32, RichText, ScrollArea};
use std::collections::HashMap;

const SECTION_SPACING: f32 = 15.0;

/// Renders one [`DashboardSnapshot`].
#[derive(Default)]
pub struct ReportView {
    snapshot: Option<DashboardSnapshot>,
    /// Open tab of each county panel.
    open_tabs: HashMap<String, HealthCategory>,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    pub fn set_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.snapshot = Some(snapshot);
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(snapshot) = &self.snapshot else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };
        let open_tabs = &mut self.open_tabs;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("USGS Stream Health Dashboard").size(24.0).strong());
                ui.add_space(SECTION_SPACING);

                Self::draw_metrics(ui, &snapshot.metrics);
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Distribution of Streamgage Attributes").size(18.0).strong());
                ui.add_space(5.0);
                ui.label("Drainage Area (sq mi)");
                ChartPlotter::draw_series_bar_chart(
                    ui,
                    "drainage_area",
                    "drainage_area",
                    &snapshot.drainage_areas,
                    DRAINAGE_COLOR,
                );
                ui.label("Datum of Gage (ft)");
                ChartPlotter::draw_series_bar_chart(
                    ui,
                    "datum_of_gage",
                    "datum_of_gage",
                    &snapshot.datums_of_gage,
                    DATUM_COLOR,
                );
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Stream Health by County").size(18.0).strong());
                if let Some(t) = &snapshot.thresholds {
                    ui.label(
                        RichText::new(format!(
                            "Datum of gage quartiles: Q1 {:.2} ft, median {:.2} ft, Q3 {:.2} ft",
                            t.q1, t.median, t.q3
                        ))
                        .size(11.0)
                        .color(Color32::GRAY),
                    );
                }
                ui.add_space(5.0);
                if snapshot.report.counties.is_empty() {
                    ui.label(RichText::new("No streamgages in the current selection").color(Color32::GRAY));
                }
                for county in &snapshot.report.counties {
                    Self::draw_county_panel(ui, county, open_tabs);
                }
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Suggested Actions for At-Risk Streams").size(18.0).strong());
                ui.add_space(5.0);
                Self::draw_guidance(ui, &snapshot.report.guidance);
            });
    }

    fn draw_metrics(ui: &mut egui::Ui, metrics: &Metrics) {
        ui.label(RichText::new("Overview of Stream Health Indicators").size(18.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("metrics_grid")
                    .striped(true)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Average Drainage Area:").strong());
                        ui.label(format_mean(metrics.mean_drainage_area, "sq mi"));
                        ui.end_row();

                        ui.label(RichText::new("Average Datum of Gage:").strong());
                        ui.label(format_mean(metrics.mean_datum_of_gage, "ft"));
                        ui.end_row();

                        ui.label(RichText::new("Total Unique Hydrologic Units:").strong());
                        ui.label(metrics.hydrologic_units.to_string());
                        ui.end_row();

                        ui.label(RichText::new("Total Streamgages Monitored:").strong());
                        ui.label(metrics.streamgages.to_string());
                        ui.end_row();
                    });
            });
    }

    fn draw_county_panel(
        ui: &mut egui::Ui,
        county: &CountyReport,
        open_tabs: &mut HashMap<String, HealthCategory>,
    ) {
        egui::CollapsingHeader::new(format!("{} County", county.county))
            .id_salt(format!("county_{}", county.county))
            .default_open(false)
            .show(ui, |ui| {
                let active = open_tabs
                    .entry(county.county.clone())
                    .or_insert(HealthCategory::VeryHealthy);

                ui.horizontal(|ui| {
                    for category in HealthCategory::TAB_ORDER {
                        let title = format!(
                            "{} ({})",
                            category.tab_title(),
                            county.bucket(category).len()
                        );
                        ui.selectable_value(active, category, title);
                    }
                });
                ui.separator();

                let entries = county.bucket(*active);
                if entries.is_empty() {
                    ui.label(RichText::new("No streams in this category").color(Color32::GRAY));
                }
                for entry in entries {
                    ChartPlotter::draw_station_entry(ui, entry);
                }
            });
    }

    fn draw_guidance(ui: &mut egui::Ui, guidance: &Guidance) {
        match guidance {
            Guidance::Recommendations(lines) => {
                for line in lines {
                    ui.label(format!("• {}", line));
                }
            }
            Guidance::AllStable(message) => {
                ui.label(
                    RichText::new(format!("{} ✅", message)).color(Color32::from_rgb(40, 167, 69)),
                );
            }
        }
    }
}

/// "n/a" when the column had no values.
pub fn format_mean(mean: Option<f64>, unit: &str) -> String {
    match mean {
        Some(v) => format!("{:.2} {}", v, unit),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mean_handles_no_data() {
        assert_eq!(format_mean(Some(1234.5), "sq mi"), "1234.50 sq mi");
        assert_eq!(format_mean(None, "ft"), "n/a");
    }
}
