//! Control Panel Widget
//! Left side panel with the data source, county filter and progress.

use crate::data::CountySelection;
use egui::{Color32, RichText, ScrollArea};

/// Which page the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Health,
    Explorer,
}

/// Left side control panel.
pub struct ControlPanel {
    pub source_label: String,
    pub source_url: Option<String>,
    pub counties: Vec<String>,
    pub selection: CountySelection,
    pub county_search: String,
    pub view: DashboardView,
    pub progress: f32,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            source_label: String::new(),
            source_url: None,
            counties: Vec::new(),
            selection: CountySelection::default(),
            county_search: String::new(),
            view: DashboardView::default(),
            progress: 0.0,
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available counties after a load; stale selections are dropped.
    pub fn update_counties(&mut self, mut counties: Vec<String>) {
        counties.sort();
        self.selection.retain_available(&counties);
        self.counties = counties;
    }

    /// Counties matching the search box, case-insensitive.
    pub fn visible_counties(&self) -> Vec<&String> {
        let needle = self.county_search.trim().to_lowercase();
        self.counties
            .iter()
            .filter(|c| needle.is_empty() || c.to_lowercase().contains(&needle))
            .collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💧 Stream Health")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new(format!("App Version: {}", env!("CARGO_PKG_VERSION")))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.source_label).size(12.0));
                if let Some(url) = &self.source_url {
                    ui.hyperlink_to("United States Gauge Streams (Kaggle)", url);
                }
                ui.add_space(5.0);
                ui.add_enabled_ui(!self.is_loading, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("📂 Open Folder").clicked() {
                            action = ControlPanelAction::OpenFolder;
                        }
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== View Section =====
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.view, DashboardView::Health, "Health Report");
            ui.radio_value(&mut self.view, DashboardView::Explorer, "Dataset Explorer");
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== County Filter Section =====
        ui.label(RichText::new("🔧 Filter Data").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.county_search);
        });

        ui.add_space(5.0);
        let visible: Vec<String> = self.visible_counties().into_iter().cloned().collect();
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                    if visible.is_empty() {
                        ui.label(RichText::new("No counties").color(Color32::GRAY));
                    }
                    for county in &visible {
                        let mut checked = self.selection.contains(county);
                        if ui.checkbox(&mut checked, county).changed() {
                            self.selection.set(county, checked);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            let summary = if self.selection.is_empty() {
                "All counties".to_string()
            } else {
                format!("{} selected", self.selection.len())
            };
            ui.label(RichText::new(summary).size(11.0).color(Color32::GRAY));
            if ui.small_button("Clear All").clicked() && !self.selection.is_empty() {
                self.selection.clear();
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.is_loading),
        );

        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Dataset loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenFolder,
    Reload,
    SelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_counties_sorts_and_drops_stale_selection() {
        let mut panel = ControlPanel::new();
        panel.selection = CountySelection::new(["Peoria", "Cook"]);
        panel.update_counties(vec!["Tazewell".into(), "Peoria".into()]);

        assert_eq!(panel.counties, vec!["Peoria", "Tazewell"]);
        assert_eq!(panel.selection.iter().collect::<Vec<_>>(), vec!["Peoria"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut panel = ControlPanel::new();
        panel.update_counties(vec!["Peoria".into(), "Tazewell".into(), "Pike".into()]);
        panel.county_search = "p".to_string();

        let visible: Vec<&str> = panel.visible_counties().iter().map(|s| s.as_str()).collect();
        assert_eq!(visible, vec!["Peoria", "Pike"]);
    }
}
