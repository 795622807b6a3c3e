//! Stream health classification.
//!
//! Ratings are relative: the quartile thresholds come from whatever dataset
//! snapshot is passed in, so they move with the county filter.

use crate::data::{Dataset, Record};
use crate::stats::StatsCalculator;
use serde::Serialize;
use std::fmt;

/// Health rating of a streamgage, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    CriticallyUnhealthy,
    AtRisk,
    ModeratelyHealthy,
    VeryHealthy,
}

impl HealthCategory {
    /// Order of the per-county tabs.
    pub const TAB_ORDER: [HealthCategory; 4] = [
        HealthCategory::VeryHealthy,
        HealthCategory::ModeratelyHealthy,
        HealthCategory::AtRisk,
        HealthCategory::CriticallyUnhealthy,
    ];

    /// Stable identifier for presentation layers to key off.
    pub fn id(self) -> &'static str {
        match self {
            HealthCategory::VeryHealthy => "very_healthy",
            HealthCategory::ModeratelyHealthy => "moderately_healthy",
            HealthCategory::AtRisk => "at_risk",
            HealthCategory::CriticallyUnhealthy => "critically_unhealthy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthCategory::VeryHealthy => "Very Healthy",
            HealthCategory::ModeratelyHealthy => "Moderately Healthy",
            HealthCategory::AtRisk => "At Risk",
            HealthCategory::CriticallyUnhealthy => "Critically Unhealthy",
        }
    }

    pub fn tab_title(self) -> &'static str {
        match self {
            HealthCategory::VeryHealthy => "Healthy Streams",
            HealthCategory::ModeratelyHealthy => "Moderate Streams",
            HealthCategory::AtRisk => "At-Risk Streams",
            HealthCategory::CriticallyUnhealthy => "Critical Streams",
        }
    }

    /// At risk or worse.
    pub fn needs_attention(self) -> bool {
        matches!(
            self,
            HealthCategory::AtRisk | HealthCategory::CriticallyUnhealthy
        )
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quartiles of `datum_of_gage` over one dataset snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Thresholds {
    /// `None` when there are no values to rank against.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = StatsCalculator::sorted(values);
        Some(Self {
            q1: StatsCalculator::quantile(&sorted, 0.25)?,
            median: StatsCalculator::quantile(&sorted, 0.50)?,
            q3: StatsCalculator::quantile(&sorted, 0.75)?,
        })
    }

    /// Inclusive lower bounds, checked from the top down.
    pub fn rate(&self, value: f64) -> HealthCategory {
        if value >= self.q3 {
            HealthCategory::VeryHealthy
        } else if value >= self.median {
            HealthCategory::ModeratelyHealthy
        } else if value >= self.q1 {
            HealthCategory::AtRisk
        } else {
            HealthCategory::CriticallyUnhealthy
        }
    }
}

/// A record together with its rating.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub category: HealthCategory,
}

/// Output of one classification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedDataset {
    pub thresholds: Option<Thresholds>,
    pub records: Vec<ClassifiedRecord>,
}

impl ClassifiedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn categories(&self) -> Vec<HealthCategory> {
        self.records.iter().map(|r| r.category).collect()
    }
}

pub struct Classifier;

impl Classifier {
    /// Rating for one value. A missing value (or no thresholds at all) fails
    /// every comparison and rates critically unhealthy.
    pub fn rate(value: Option<f64>, thresholds: Option<&Thresholds>) -> HealthCategory {
        match (value, thresholds) {
            (Some(v), Some(t)) => t.rate(v),
            _ => HealthCategory::CriticallyUnhealthy,
        }
    }

    /// Rate every record against quartiles of this dataset's own values.
    pub fn classify(dataset: &Dataset) -> ClassifiedDataset {
        let values: Vec<f64> = dataset.iter().filter_map(|r| r.datum_of_gage).collect();
        let thresholds = Thresholds::from_values(&values);

        let records = dataset
            .iter()
            .map(|record| ClassifiedRecord {
                category: Self::rate(record.datum_of_gage, thresholds.as_ref()),
                record: record.clone(),
            })
            .collect();

        ClassifiedDataset {
            thresholds,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HealthCategory::*;

    fn dataset(values: &[Option<f64>]) -> Dataset {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::station("Peoria", &format!("gage {i}"), *v))
            .collect()
    }

    #[test]
    fn four_distinct_values_cover_every_category() {
        let classified =
            Classifier::classify(&dataset(&[Some(10.0), Some(20.0), Some(30.0), Some(40.0)]));

        assert_eq!(
            classified.thresholds,
            Some(Thresholds {
                q1: 17.5,
                median: 25.0,
                q3: 32.5
            })
        );
        assert_eq!(
            classified.categories(),
            vec![CriticallyUnhealthy, AtRisk, ModeratelyHealthy, VeryHealthy]
        );
    }

    #[test]
    fn constant_column_is_all_very_healthy() {
        let classified = Classifier::classify(&dataset(&[Some(50.0); 4]));
        let t = classified.thresholds.unwrap();
        assert_eq!((t.q1, t.median, t.q3), (50.0, 50.0, 50.0));
        assert!(classified.categories().iter().all(|&c| c == VeryHealthy));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let t = Thresholds {
            q1: 1.0,
            median: 2.0,
            q3: 3.0,
        };
        assert_eq!(t.rate(3.0), VeryHealthy);
        assert_eq!(t.rate(2.0), ModeratelyHealthy);
        assert_eq!(t.rate(1.0), AtRisk);
        assert_eq!(t.rate(0.999), CriticallyUnhealthy);
    }

    #[test]
    fn missing_values_are_excluded_from_quartiles_and_rated_critical() {
        let classified = Classifier::classify(&dataset(&[
            Some(10.0),
            None,
            Some(20.0),
            Some(30.0),
            Some(40.0),
        ]));

        assert_eq!(classified.thresholds.unwrap().median, 25.0);
        assert_eq!(classified.records[1].category, CriticallyUnhealthy);
        assert_eq!(classified.len(), 5);
    }

    #[test]
    fn single_record_is_very_healthy() {
        let classified = Classifier::classify(&dataset(&[Some(-3.2)]));
        assert_eq!(classified.categories(), vec![VeryHealthy]);
    }

    #[test]
    fn empty_dataset_has_no_thresholds() {
        let classified = Classifier::classify(&Dataset::default());
        assert!(classified.thresholds.is_none());
        assert!(classified.is_empty());
    }

    #[test]
    fn all_missing_rates_everything_critical() {
        let classified = Classifier::classify(&dataset(&[None, None]));
        assert!(classified.thresholds.is_none());
        assert_eq!(classified.categories(), vec![CriticallyUnhealthy; 2]);
    }

    #[test]
    fn quartiles_are_monotonic() {
        let values = [5.0, -1.0, 3.3, 3.3, 100.0, 0.0, 42.0];
        let t = Thresholds::from_values(&values).unwrap();
        assert!(t.q1 <= t.median && t.median <= t.q3);
    }

    #[test]
    fn thresholds_follow_the_snapshot() {
        let wide = Classifier::classify(&dataset(&[Some(10.0), Some(20.0), Some(30.0), Some(40.0)]));
        let narrow = Classifier::classify(&dataset(&[Some(10.0), Some(20.0)]));
        assert_eq!(wide.records[1].category, AtRisk);
        assert_eq!(narrow.records[1].category, VeryHealthy);
    }

    #[test]
    fn identifiers_are_stable() {
        let ids: Vec<&str> = HealthCategory::TAB_ORDER.iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec!["very_healthy", "moderately_healthy", "at_risk", "critically_unhealthy"]
        );
        assert_eq!(
            serde_json::to_string(&AtRisk).unwrap(),
            "\"at_risk\""
        );
        assert!(CriticallyUnhealthy < VeryHealthy);
    }
}
