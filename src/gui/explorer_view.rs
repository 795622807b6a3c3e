//! Explorer View Widget
//! Per-file preview, descriptive statistics and value counts.

use crate::charts::ChartPlotter;
use crate::data::{preview_rows, DataLoader};
use crate::stats::{ColumnSummary, StatsCalculator, ValueCount};
use egui::{ComboBox, RichText, ScrollArea};

const PREVIEW_ROWS: usize = 5;
const MAX_BARS: usize = 30;

/// Browse the raw dataset files.
#[derive(Default)]
pub struct ExplorerView {
    files: Vec<String>,
    selected_file: String,
    columns: Vec<String>,
    selected_column: String,
    preview: Vec<Vec<String>>,
    summary: Vec<ColumnSummary>,
    counts: Vec<ValueCount>,
}

impl ExplorerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset after a load and show the first file.
    pub fn set_files(&mut self, loader: &DataLoader) {
        *self = Self {
            files: loader.get_file_names(),
            ..Self::default()
        };
        if let Some(first) = self.files.first().cloned() {
            self.select_file(loader, &first);
        }
    }

    fn select_file(&mut self, loader: &DataLoader, file_name: &str) {
        self.selected_file = file_name.to_string();
        self.preview.clear();
        self.summary.clear();
        self.columns.clear();

        if let Some(table) = loader.get_table(file_name) {
            self.preview = preview_rows(&table.df, PREVIEW_ROWS);
            self.summary = StatsCalculator::describe(&table.df);
            self.columns = table
                .df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect();
        }

        let column = self.columns.first().cloned().unwrap_or_default();
        self.select_column(loader, &column);
    }

    fn select_column(&mut self, loader: &DataLoader, column: &str) {
        self.selected_column = column.to_string();
        self.counts = loader
            .get_table(&self.selected_file)
            .map(|t| StatsCalculator::value_counts(&t.df, column))
            .unwrap_or_default();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, loader: &DataLoader) {
        if self.files.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No CSV files found in the dataset.").size(20.0));
            });
            return;
        }

        let mut file_choice = None;
        let mut column_choice = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("USGS Streamgages Data Viewer").size(24.0).strong());
                ui.label(format!("Dataset files available: {}", self.files.len()));
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("Dataset file:");
                    ComboBox::from_id_salt("explorer_file")
                        .width(260.0)
                        .selected_text(&self.selected_file)
                        .show_ui(ui, |ui| {
                            for file in &self.files {
                                if ui.selectable_label(self.selected_file == *file, file).clicked() {
                                    file_choice = Some(file.clone());
                                }
                            }
                        });
                });
                ui.add_space(10.0);

                ui.label(RichText::new("Dataset Preview").size(18.0).strong());
                Self::draw_preview(ui, &self.preview);
                ui.add_space(15.0);

                ui.label(RichText::new("Basic Statistics").size(18.0).strong());
                Self::draw_summary(ui, &self.summary);
                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    ui.label("Column to visualize:");
                    ComboBox::from_id_salt("explorer_column")
                        .width(200.0)
                        .selected_text(&self.selected_column)
                        .show_ui(ui, |ui| {
                            for col in &self.columns {
                                if ui.selectable_label(self.selected_column == *col, col).clicked() {
                                    column_choice = Some(col.clone());
                                }
                            }
                        });
                });
                if !self.selected_column.is_empty() {
                    ui.label(
                        RichText::new(format!("Histogram of {}", self.selected_column))
                            .size(16.0)
                            .strong(),
                    );
                    ChartPlotter::draw_value_counts_chart(ui, &self.selected_column, &self.counts, MAX_BARS);
                }
            });

        if let Some(file) = file_choice {
            self.select_file(loader, &file);
        } else if let Some(column) = column_choice {
            self.select_column(loader, &column);
        }
    }

    fn draw_preview(ui: &mut egui::Ui, rows: &[Vec<String>]) {
        ScrollArea::horizontal().id_salt("preview_scroll").show(ui, |ui| {
            egui::Grid::new("preview_grid")
                .striped(true)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for (i, row) in rows.iter().enumerate() {
                        for cell in row {
                            if i == 0 {
                                ui.label(RichText::new(cell).strong().size(11.0));
                            } else {
                                ui.label(RichText::new(cell).size(11.0));
                            }
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &[ColumnSummary]) {
        if summary.is_empty() {
            ui.label("No numeric columns");
            return;
        }

        egui::Grid::new("summary_grid")
            .striped(true)
            .min_col_width(55.0)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for header in ["Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for s in summary {
                    ui.label(RichText::new(&s.column).size(11.0));
                    ui.label(RichText::new(s.count.to_string()).size(11.0));
                    ui.label(RichText::new(format!("{:.3}", s.mean)).size(11.0));
                    match s.std {
                        Some(std) => ui.label(RichText::new(format!("{:.3}", std)).size(11.0)),
                        None => ui.label(RichText::new("-").size(11.0)),
                    };
                    for v in [s.min, s.p25, s.p50, s.p75, s.max] {
                        ui.label(RichText::new(format!("{:.3}", v)).size(11.0));
                    }
                    ui.end_row();
                }
            });
    }
}
