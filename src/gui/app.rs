//! Stream Health Main Application
//! Main window with control panel and report / explorer views.

use crate::config::AppConfig;
use crate::data::{CountySelection, DataLoader, Dataset, DatasetSource};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView, ExplorerView, ReportView};
use crate::pipeline::{load_dataset, run_cycle};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

/// Dataset loading result from background thread
enum LoadResult {
    Progress(f32, String),
    Complete { loader: DataLoader, dataset: Dataset },
    Error(String),
}

/// Main application window.
pub struct HealthApp {
    source: DatasetSource,
    loader: DataLoader,
    /// `None` until a load succeeds, and again after a failed one.
    dataset: Option<Dataset>,
    control_panel: ControlPanel,
    report_view: ReportView,
    explorer_view: ExplorerView,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl HealthApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self::from_config(config);
        app.start_loading();
        app
    }

    fn from_config(config: AppConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.selection = CountySelection::new(config.initial_counties);

        Self {
            source: config.source,
            loader: DataLoader::new(),
            dataset: None,
            control_panel,
            report_view: ReportView::new(),
            explorer_view: ExplorerView::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Fetch and load the dataset on a background thread.
    fn start_loading(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        self.control_panel.source_label = self.source.describe();
        self.control_panel.source_url = self.source.web_url();
        self.control_panel.is_loading = true;
        self.control_panel.set_progress(0.0, "Fetching dataset...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let source = self.source.clone();

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(10.0, format!("Loading {}", source.describe())));

            match load_dataset(&source) {
                Ok((loader, dataset)) => {
                    let _ = tx.send(LoadResult::Complete { loader, dataset });
                }
                Err(e) => {
                    error!("Dataset load failed: {}", e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    LoadResult::Complete { loader, dataset } => {
                        self.control_panel.update_counties(dataset.counties());
                        self.control_panel.set_progress(
                            100.0,
                            &format!(
                                "Dataset loaded successfully! {} records from {} files",
                                dataset.len(),
                                loader.get_file_names().len()
                            ),
                        );
                        self.explorer_view.set_files(&loader);
                        self.loader = loader;
                        self.dataset = Some(dataset);
                        self.recompute();
                        self.finish_loading();
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.discard_dataset();
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.finish_loading();
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Drop everything from the previous load; the selection is kept for the next attempt.
    fn discard_dataset(&mut self) {
        self.dataset = None;
        self.loader = DataLoader::new();
        self.explorer_view = ExplorerView::new();
        self.report_view.clear();
        self.control_panel.counties.clear();
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.is_loading = false;
    }

    /// One full pipeline pass for the current filter.
    fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.report_view.clear();
            return;
        };
        let snapshot = run_cycle(dataset, &self.control_panel.selection);
        info!(
            "Report ready: {} records, {} counties",
            snapshot.metrics.record_count,
            snapshot.report.counties.len()
        );
        self.report_view.set_snapshot(snapshot);
    }

    /// Switch to a dataset folder on disk.
    fn handle_open_folder(&mut self) {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.source = DatasetSource::LocalDir(dir);
            self.start_loading();
        }
    }
}

impl eframe::App for HealthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::OpenFolder => self.handle_open_folder(),
                        ControlPanelAction::Reload => self.start_loading(),
                        ControlPanelAction::SelectionChanged => self.recompute(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report or Explorer
        egui::CentralPanel::default().show(ctx, |ui| match self.control_panel.view {
            DashboardView::Health => self.report_view.show(ui),
            DashboardView::Explorer => self.explorer_view.show(ui, &self.loader),
        });
    }
}
