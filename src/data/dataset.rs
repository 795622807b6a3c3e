//! Typed streamgage records and the county filter.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// One monitoring-station observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub county: Option<String>,
    pub name: String,
    pub drainage_area: Option<f64>,
    pub datum_of_gage: Option<f64>,
    pub hydrologic_unit: Option<String>,
    pub location_id: Option<String>,
}

#[cfg(test)]
impl Record {
    /// Record with only the fields the classifier cares about.
    pub fn station(county: &str, name: &str, datum_of_gage: Option<f64>) -> Self {
        Self {
            county: Some(county.to_string()),
            name: name.to_string(),
            drainage_area: None,
            datum_of_gage,
            hydrologic_unit: None,
            location_id: None,
        }
    }
}

/// Immutable snapshot of records for one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Distinct counties in first-seen order.
    pub fn counties(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.county.as_deref())
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect()
    }

    /// Keep only records whose county is selected. An empty selection keeps everything.
    pub fn filter_counties(&self, selection: &CountySelection) -> Dataset {
        if selection.is_empty() {
            return self.clone();
        }

        self.records
            .iter()
            .filter(|r| {
                r.county
                    .as_deref()
                    .is_some_and(|county| selection.contains(county))
            })
            .cloned()
            .collect()
    }

    pub fn drainage_areas(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.drainage_area).collect()
    }

    pub fn datums_of_gage(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.datum_of_gage).collect()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// User-selected set of county names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountySelection {
    counties: BTreeSet<String>,
}

impl CountySelection {
    pub fn new<I, S>(counties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counties: counties.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn contains(&self, county: &str) -> bool {
        self.counties.contains(county)
    }

    pub fn set(&mut self, county: &str, selected: bool) {
        if selected {
            self.counties.insert(county.to_string());
        } else {
            self.counties.remove(county);
        }
    }

    pub fn clear(&mut self) {
        self.counties.clear();
    }

    /// Selected counties, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.counties.iter().map(String::as_str)
    }

    /// Drop selections that no longer exist in `available`.
    pub fn retain_available(&mut self, available: &[String]) {
        self.counties.retain(|c| available.contains(c));
    }
}
