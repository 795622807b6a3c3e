//! One dashboard pass: filter, metrics, classification, report.

use crate::data::{CountySelection, DataLoader, DataProcessor, Dataset, DatasetSource, LoaderError};
use crate::report::{HealthReport, Reporter};
use crate::stats::{Classifier, Metrics, StatsCalculator, Thresholds};
use serde::Serialize;
use tracing::{debug, info};

/// Everything the dashboard renders for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub selected_counties: Vec<String>,
    pub metrics: Metrics,
    pub thresholds: Option<Thresholds>,
    pub report: HealthReport,
    #[serde(skip)]
    pub drainage_areas: Vec<Option<f64>>,
    #[serde(skip)]
    pub datums_of_gage: Vec<Option<f64>>,
}

/// Fetch and load the dataset. Any error here aborts the whole cycle.
pub fn load_dataset(source: &DatasetSource) -> Result<(DataLoader, Dataset), LoaderError> {
    let mut loader = DataLoader::new();
    let df = loader.load_source(source)?;
    let dataset = DataProcessor::to_dataset(df)?;
    info!(
        "Dataset loaded: {} records, {} counties",
        dataset.len(),
        dataset.counties().len()
    );
    Ok((loader, dataset))
}

/// Run the full pipeline over an immutable dataset.
///
/// Pure: the same dataset and selection always give the same snapshot.
pub fn run_cycle(dataset: &Dataset, selection: &CountySelection) -> DashboardSnapshot {
    let filtered = dataset.filter_counties(selection);
    debug!(
        "Pipeline pass: {} of {} records, {} counties selected",
        filtered.len(),
        dataset.len(),
        selection.len()
    );

    let metrics = StatsCalculator::compute_metrics(&filtered);
    let classified = Classifier::classify(&filtered);
    let report = Reporter::build(&classified);

    DashboardSnapshot {
        selected_counties: selection.iter().map(str::to_string).collect(),
        metrics,
        thresholds: classified.thresholds,
        report,
        drainage_areas: filtered.drainage_areas(),
        datums_of_gage: filtered.datums_of_gage(),
    }
}
