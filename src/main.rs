//! Stream Health Dashboard - USGS streamgage health by county
//!
//! Opens the interactive dashboard, or prints the report as JSON with `--report`.

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use streamgage_health::data::CountySelection;
use streamgage_health::gui::HealthApp;
use streamgage_health::{init_logging, load_dataset, run_cycle, AppConfig};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "streamgage-health")]
#[command(about = "USGS stream health dashboard", version)]
struct Cli {
    /// Read CSV files from this directory instead of downloading from Kaggle
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Kaggle dataset handle (owner/slug)
    #[arg(long)]
    dataset: Option<String>,

    /// Preselect a county in the filter (repeatable)
    #[arg(short, long = "county")]
    counties: Vec<String>,

    /// Print the health report as JSON and exit
    #[arg(long)]
    report: bool,
}

fn print_report(config: &AppConfig) -> Result<()> {
    let (_, dataset) = load_dataset(&config.source)?;
    let selection = CountySelection::new(config.initial_counties.iter().cloned());
    let snapshot = run_cycle(&dataset, &selection);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn main() -> Result<()> {
    // Also loads .env, where RUST_LOG and Kaggle credentials may live
    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_env(cli.data_dir, cli.dataset, cli.counties);
    info!("Dataset source: {}", config.source.describe());

    if cli.report {
        return print_report(&config);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("USGS Stream Health Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "USGS Stream Health Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(HealthApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard failed: {}", e))
}
