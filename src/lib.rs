//! USGS Streamgage Health Dashboard
//!
//! Loads the USGS streamgage dataset, rates every gage against quartiles of
//! the currently filtered selection and groups the ratings by county.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::AppConfig;
pub use logging::init_logging;
pub use pipeline::{load_dataset, run_cycle, DashboardSnapshot};
