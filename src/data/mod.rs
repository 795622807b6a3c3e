//! Data module - dataset acquisition, CSV loading and record conversion

mod dataset;
pub mod loader;
mod processor;
mod source;

pub use dataset::{CountySelection, Dataset, Record};
pub use loader::{preview_rows, DataLoader, LoaderError, SourceTable, REQUIRED_COLUMNS};
pub use processor::{DataProcessor, ProcessorError};
pub use source::{extract_archive, DatasetSource, FetchedDataset, KaggleCredentials, KAGGLE_DATASET};
