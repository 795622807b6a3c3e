//! Application configuration resolved from the command line and environment.

use crate::data::{DatasetSource, KaggleCredentials, KAGGLE_DATASET};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: DatasetSource,
    /// Counties preselected in the filter.
    pub initial_counties: Vec<String>,
}

impl AppConfig {
    /// A local `data_dir` wins over a Kaggle download.
    pub fn new(
        data_dir: Option<PathBuf>,
        dataset: Option<String>,
        credentials: Option<KaggleCredentials>,
        counties: Vec<String>,
    ) -> Self {
        let source = match data_dir {
            Some(dir) => DatasetSource::LocalDir(dir),
            None => DatasetSource::Kaggle {
                handle: dataset.unwrap_or_else(|| KAGGLE_DATASET.to_string()),
                credentials,
            },
        };

        let initial_counties = counties
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            source,
            initial_counties,
        }
    }

    /// Same as [`AppConfig::new`], with Kaggle credentials taken from the environment.
    pub fn from_env(data_dir: Option<PathBuf>, dataset: Option<String>, counties: Vec<String>) -> Self {
        Self::new(data_dir, dataset, KaggleCredentials::from_env(), counties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_kaggle_dataset() {
        let config = AppConfig::new(None, None, None, Vec::new());
        assert_eq!(config.source, DatasetSource::default());
        assert!(config.initial_counties.is_empty());
    }

    #[test]
    fn local_directory_overrides_download() {
        let config = AppConfig::new(
            Some(PathBuf::from("/data/usgs")),
            Some("someone/else".to_string()),
            None,
            Vec::new(),
        );
        assert_eq!(config.source, DatasetSource::LocalDir(PathBuf::from("/data/usgs")));
    }

    #[test]
    fn custom_handle_keeps_credentials() {
        let creds = KaggleCredentials {
            username: "river".to_string(),
            key: "secret".to_string(),
        };
        let config = AppConfig::new(None, Some("owner/slug".to_string()), Some(creds.clone()), Vec::new());
        assert_eq!(
            config.source,
            DatasetSource::Kaggle {
                handle: "owner/slug".to_string(),
                credentials: Some(creds),
            }
        );
    }

    #[test]
    fn blank_counties_are_dropped() {
        let config = AppConfig::new(
            None,
            None,
            None,
            vec![" Peoria ".to_string(), "  ".to_string()],
        );
        assert_eq!(config.initial_counties, vec!["Peoria"]);
    }
}
