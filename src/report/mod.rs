//! Report module - per-county health grouping and suggested actions

use crate::stats::{ClassifiedDataset, HealthCategory};
use serde::Serialize;
use std::collections::HashMap;

/// Suggested actions shown whenever any stream is at risk or worse.
pub const RECOMMENDATIONS: [&str; 3] = [
    "Investigate low datum of gage levels to ensure stability against extreme water events.",
    "Improve drainage management to ensure healthy watershed function.",
    "Monitor hydrologic units for changes that may affect water quality.",
];

pub const ALL_STABLE_MESSAGE: &str = "All monitored streams are within stable levels!";

/// One streamgage line inside a county panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationEntry {
    pub name: String,
    pub location_id: Option<String>,
    pub datum_of_gage: Option<f64>,
    pub category: HealthCategory,
}

/// Streamgages of one county split by health category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyReport {
    pub county: String,
    very_healthy: Vec<StationEntry>,
    moderately_healthy: Vec<StationEntry>,
    at_risk: Vec<StationEntry>,
    critically_unhealthy: Vec<StationEntry>,
}

impl CountyReport {
    pub fn new(county: impl Into<String>) -> Self {
        Self {
            county: county.into(),
            very_healthy: Vec::new(),
            moderately_healthy: Vec::new(),
            at_risk: Vec::new(),
            critically_unhealthy: Vec::new(),
        }
    }

    pub fn bucket(&self, category: HealthCategory) -> &[StationEntry] {
        match category {
            HealthCategory::VeryHealthy => &self.very_healthy,
            HealthCategory::ModeratelyHealthy => &self.moderately_healthy,
            HealthCategory::AtRisk => &self.at_risk,
            HealthCategory::CriticallyUnhealthy => &self.critically_unhealthy,
        }
    }

    fn bucket_mut(&mut self, category: HealthCategory) -> &mut Vec<StationEntry> {
        match category {
            HealthCategory::VeryHealthy => &mut self.very_healthy,
            HealthCategory::ModeratelyHealthy => &mut self.moderately_healthy,
            HealthCategory::AtRisk => &mut self.at_risk,
            HealthCategory::CriticallyUnhealthy => &mut self.critically_unhealthy,
        }
    }

    pub fn push(&mut self, entry: StationEntry) {
        self.bucket_mut(entry.category).push(entry);
    }

    pub fn total(&self) -> usize {
        HealthCategory::TAB_ORDER
            .iter()
            .map(|&c| self.bucket(c).len())
            .sum()
    }
}

/// What to tell the user below the county panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "lines", rename_all = "snake_case")]
pub enum Guidance {
    Recommendations(Vec<&'static str>),
    AllStable(&'static str),
}

impl Guidance {
    pub fn lines(&self) -> Vec<&'static str> {
        match self {
            Guidance::Recommendations(lines) => lines.clone(),
            Guidance::AllStable(message) => vec![*message],
        }
    }
}

/// Everything the county section of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub counties: Vec<CountyReport>,
    /// Rated records that have no county and therefore no panel.
    pub without_county: usize,
    pub needs_attention: bool,
    pub guidance: Guidance,
}

pub struct Reporter;

impl Reporter {
    /// Group rated records by county (first-seen order) and derive the guidance.
    pub fn build(classified: &ClassifiedDataset) -> HealthReport {
        let mut counties: Vec<CountyReport> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut without_county = 0;

        for rated in &classified.records {
            let Some(county) = rated.record.county.as_deref() else {
                without_county += 1;
                continue;
            };

            let slot = *index.entry(county).or_insert_with(|| {
                counties.push(CountyReport::new(county));
                counties.len() - 1
            });

            counties[slot].push(StationEntry {
                name: rated.record.name.clone(),
                location_id: rated.record.location_id.clone(),
                datum_of_gage: rated.record.datum_of_gage,
                category: rated.category,
            });
        }

        let needs_attention = classified
            .records
            .iter()
            .any(|r| r.category.needs_attention());

        HealthReport {
            counties,
            without_county,
            needs_attention,
            guidance: Self::guidance(needs_attention),
        }
    }

    pub fn guidance(needs_attention: bool) -> Guidance {
        if needs_attention {
            Guidance::Recommendations(RECOMMENDATIONS.to_vec())
        } else {
            Guidance::AllStable(ALL_STABLE_MESSAGE)
        }
    }
}
