//! Stats module - metrics, quantiles and health classification

mod calculator;
mod classifier;

pub use calculator::{ColumnSummary, Metrics, StatsCalculator, ValueCount};
pub use classifier::{ClassifiedDataset, ClassifiedRecord, Classifier, HealthCategory, Thresholds};
