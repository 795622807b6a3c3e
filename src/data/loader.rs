//! CSV Data Loader Module
//! Reads every CSV file of the dataset with Polars and stacks them into one table.

use crate::data::{DatasetSource, FetchedDataset, ProcessorError};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const COL_COUNTY: &str = "county";
pub const COL_NAME: &str = "name";
pub const COL_DRAINAGE_AREA: &str = "drainage_area";
pub const COL_DATUM_OF_GAGE: &str = "datum_of_gage";
pub const COL_HYDROLOGIC_UNIT: &str = "hydrologic_unit";
pub const COL_LOCATION_ID: &str = "location_id";

/// Columns every dataset file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_COUNTY,
    COL_NAME,
    COL_DRAINAGE_AREA,
    COL_DATUM_OF_GAGE,
    COL_HYDROLOGIC_UNIT,
    COL_LOCATION_ID,
];

const NUMERIC_COLUMNS: [&str; 2] = [COL_DRAINAGE_AREA, COL_DATUM_OF_GAGE];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Missing column '{column}' in {file}")]
    SchemaMismatch { file: String, column: String },
    #[error("No CSV files found in {0}")]
    NoCsvFiles(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProcessorError> for LoaderError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::PolarsError(e) => LoaderError::CsvError(e),
        }
    }
}

/// One dataset file as read from disk, every column as text.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub file_name: String,
    pub df: DataFrame,
}

/// Loads the dataset files and keeps both the raw tables and the unified table.
#[derive(Debug)]
pub struct DataLoader {
    tables: Vec<SourceTable>,
    unified: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            unified: None,
        }
    }

    /// Fetch `source` and load it. Temporary download files are gone when this returns.
    pub fn load_source(&mut self, source: &DatasetSource) -> Result<&DataFrame, LoaderError> {
        let fetched = source.fetch()?;
        self.load_fetched(fetched)
    }

    /// Load fetched files, then release them whether or not loading succeeded.
    pub(crate) fn load_fetched(&mut self, fetched: FetchedDataset) -> Result<&DataFrame, LoaderError> {
        let root = fetched.path().to_path_buf();
        let loaded = self.load_dir(&root).map(|_| ());
        if fetched.is_temporary() {
            debug!("Removing scratch directory {}", root.display());
        }
        drop(fetched);

        loaded?;
        self.unified.as_ref().ok_or(LoaderError::NoCsvFiles(root))
    }

    /// Load every CSV under `dir` and concatenate them.
    pub fn load_dir(&mut self, dir: &Path) -> Result<&DataFrame, LoaderError> {
        let files = Self::list_csv_files(dir)?;
        if files.is_empty() {
            return Err(LoaderError::NoCsvFiles(dir.to_path_buf()));
        }
        info!("Loading {} CSV files from {}", files.len(), dir.display());

        let mut tables = Vec::with_capacity(files.len());
        let mut unified: Option<DataFrame> = None;

        for path in &files {
            let file_name = path
                .strip_prefix(dir)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();
            let df = Self::read_csv(path)?;
            debug!("{}: {} rows, {} columns", file_name, df.height(), df.width());

            let normalized = Self::normalize(&file_name, &df)?;
            match unified.as_mut() {
                Some(acc) => {
                    acc.vstack_mut(&normalized)?;
                }
                None => unified = Some(normalized),
            }

            tables.push(SourceTable { file_name, df });
        }

        self.tables = tables;
        self.unified = unified;

        info!("Unified table has {} rows", self.get_row_count());
        self.unified
            .as_ref()
            .ok_or_else(|| LoaderError::NoCsvFiles(dir.to_path_buf()))
    }

    /// All `*.csv` files under `dir`, sorted by path.
    pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, LoaderError> {
        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read a CSV file with every column as text.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let path_str = path.to_string_lossy().to_string();

        // Schema inference disabled: identifiers keep their leading zeros
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Check the required columns and give them their fixed types.
    fn normalize(file_name: &str, df: &DataFrame) -> Result<DataFrame, LoaderError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for column in REQUIRED_COLUMNS {
            if !present.iter().any(|c| c == column) {
                return Err(LoaderError::SchemaMismatch {
                    file: file_name.to_string(),
                    column: column.to_string(),
                });
            }
        }

        let columns = REQUIRED_COLUMNS
            .iter()
            .map(|&name| {
                let dtype = if NUMERIC_COLUMNS.contains(&name) {
                    DataType::Float64
                } else {
                    DataType::String
                };
                df.column(name)?.cast(&dtype)
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        Ok(DataFrame::new(columns)?)
    }

    /// Names of the loaded files.
    pub fn get_file_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.file_name.clone()).collect()
    }

    /// Raw table for one file.
    pub fn get_table(&self, file_name: &str) -> Option<&SourceTable> {
        self.tables.iter().find(|t| t.file_name == file_name)
    }

    /// Get the number of rows in the unified table.
    pub fn get_row_count(&self) -> usize {
        self.unified.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the unified table.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.unified.as_ref()
    }
}

/// First `rows` rows of `df` rendered as text, with the header row first.
pub fn preview_rows(df: &DataFrame, rows: usize) -> Vec<Vec<String>> {
    let head = df.head(Some(rows));
    let mut out = vec![head
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()];

    for i in 0..head.height() {
        let row = head
            .get_columns()
            .iter()
            .map(|col| match col.get(i) {
                Ok(AnyValue::Null) | Err(_) => String::new(),
                Ok(v) => v
                    .get_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| v.to_string()),
            })
            .collect();
        out.push(row);
    }

    out
}
