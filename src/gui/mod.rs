//! GUI module - User interface components

mod app;
mod control_panel;
mod explorer_view;
mod report_view;

pub use app::HealthApp;
pub use control_panel::{ControlPanel, ControlPanelAction, DashboardView};
pub use explorer_view::ExplorerView;
pub use report_view::{format_mean, ReportView};
