//! Data Processor Module
//! Converts the unified Polars table into typed streamgage records.

use crate::data::loader::{
    COL_COUNTY, COL_DATUM_OF_GAGE, COL_DRAINAGE_AREA, COL_HYDROLOGIC_UNIT, COL_LOCATION_ID,
    COL_NAME,
};
use crate::data::{Dataset, Record};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles conversion from the tabular form to records.
pub struct DataProcessor;

impl DataProcessor {
    /// Build a [`Dataset`] from a table holding the required columns.
    ///
    /// Blank text becomes `None`; unparsable or NaN numbers become `None`.
    pub fn to_dataset(df: &DataFrame) -> Result<Dataset, ProcessorError> {
        let county = df.column(COL_COUNTY)?.cast(&DataType::String)?;
        let name = df.column(COL_NAME)?.cast(&DataType::String)?;
        let drainage = df.column(COL_DRAINAGE_AREA)?.cast(&DataType::Float64)?;
        let datum = df.column(COL_DATUM_OF_GAGE)?.cast(&DataType::Float64)?;
        let huc = df.column(COL_HYDROLOGIC_UNIT)?.cast(&DataType::String)?;
        let location = df.column(COL_LOCATION_ID)?.cast(&DataType::String)?;

        let county = county.str()?;
        let name = name.str()?;
        let drainage = drainage.f64()?;
        let datum = datum.f64()?;
        let huc = huc.str()?;
        let location = location.str()?;

        let records = (0..df.height())
            .map(|i| Record {
                county: Self::text(county.get(i)),
                name: name.get(i).unwrap_or_default().to_string(),
                drainage_area: Self::number(drainage.get(i)),
                datum_of_gage: Self::number(datum.get(i)),
                hydrologic_unit: Self::text(huc.get(i)),
                location_id: Self::text(location.get(i)),
            })
            .collect();

        Ok(records)
    }

    /// Blank or whitespace-only text is missing.
    fn text(value: Option<&str>) -> Option<String> {
        value
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    }

    fn number(value: Option<f64>) -> Option<f64> {
        value.filter(|v| !v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_rows_with_missing_values() {
        let df = df!(
            COL_COUNTY => [Some("Peoria"), Some("  "), None],
            COL_NAME => ["A", "B", "C"],
            COL_DRAINAGE_AREA => [Some(10.0), None, Some(f64::NAN)],
            COL_DATUM_OF_GAGE => [Some(440.0), Some(450.5), None],
            COL_HYDROLOGIC_UNIT => [Some("07130003"), None, Some("07130003")],
            COL_LOCATION_ID => ["05568500", "05567500", "05568000"]
        )
        .unwrap();

        let dataset = DataProcessor::to_dataset(&df).unwrap();
        let records = dataset.records();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].county.as_deref(), Some("Peoria"));
        assert_eq!(records[1].county, None);
        assert_eq!(records[2].county, None);
        assert_eq!(records[0].drainage_area, Some(10.0));
        assert_eq!(records[2].drainage_area, None);
        assert_eq!(records[1].datum_of_gage, Some(450.5));
        assert_eq!(records[2].datum_of_gage, None);
        assert_eq!(records[0].hydrologic_unit.as_deref(), Some("07130003"));
        assert_eq!(records[1].hydrologic_unit, None);
        assert_eq!(records[2].location_id.as_deref(), Some("05568000"));
    }

    #[test]
    fn integer_columns_are_accepted() {
        let df = df!(
            COL_COUNTY => ["Peoria"],
            COL_NAME => ["A"],
            COL_DRAINAGE_AREA => [15819i64],
            COL_DATUM_OF_GAGE => [429i64],
            COL_HYDROLOGIC_UNIT => [7130003i64],
            COL_LOCATION_ID => [5568500i64]
        )
        .unwrap();

        let dataset = DataProcessor::to_dataset(&df).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.drainage_area, Some(15819.0));
        assert_eq!(record.datum_of_gage, Some(429.0));
        assert_eq!(record.location_id.as_deref(), Some("5568500"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let df = df!(COL_COUNTY => ["Peoria"]).unwrap();
        assert!(DataProcessor::to_dataset(&df).is_err());
    }
}
