//! Dataset Source Module
//! Resolves where the streamgage CSV files come from: a Kaggle download or a local folder.

use crate::data::LoaderError;
use std::env;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};
use zip::ZipArchive;

/// Public USGS streamgage dataset (all 50 states).
pub const KAGGLE_DATASET: &str = "protobioengineering/usgs-streamgages-all-50-states";

const KAGGLE_API_URL: &str = "https://www.kaggle.com/api/v1/datasets/download";
const KAGGLE_WEB_URL: &str = "https://www.kaggle.com/datasets";

/// Kaggle API credentials, read from `KAGGLE_USERNAME` / `KAGGLE_KEY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    pub fn from_env() -> Option<Self> {
        let username = env::var("KAGGLE_USERNAME").ok()?;
        let key = env::var("KAGGLE_KEY").ok()?;
        if username.trim().is_empty() || key.trim().is_empty() {
            return None;
        }
        Some(Self { username, key })
    }
}

/// Where a load cycle reads its CSV files from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Download `owner/slug` from the Kaggle dataset API.
    Kaggle {
        handle: String,
        credentials: Option<KaggleCredentials>,
    },
    /// Read CSV files already on disk.
    LocalDir(PathBuf),
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Kaggle {
            handle: KAGGLE_DATASET.to_string(),
            credentials: None,
        }
    }
}

impl DatasetSource {
    /// Short human readable description for the status line.
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Kaggle { handle, .. } => format!("Kaggle: {}", handle),
            DatasetSource::LocalDir(dir) => format!("Folder: {}", dir.display()),
        }
    }

    /// Dataset landing page, for attribution.
    pub fn web_url(&self) -> Option<String> {
        match self {
            DatasetSource::Kaggle { handle, .. } => Some(format!("{}/{}", KAGGLE_WEB_URL, handle)),
            DatasetSource::LocalDir(_) => None,
        }
    }

    /// Make the dataset's CSV files available on disk.
    ///
    /// For Kaggle the archive is extracted into a temporary directory that is
    /// removed when the returned [`FetchedDataset`] is dropped.
    pub fn fetch(&self) -> Result<FetchedDataset, LoaderError> {
        match self {
            DatasetSource::Kaggle {
                handle,
                credentials,
            } => download_kaggle(handle, credentials.as_ref()),
            DatasetSource::LocalDir(dir) => {
                if !dir.is_dir() {
                    return Err(LoaderError::SourceUnavailable(format!(
                        "{} is not a directory",
                        dir.display()
                    )));
                }
                Ok(FetchedDataset {
                    root: dir.clone(),
                    scratch: None,
                })
            }
        }
    }
}

/// Dataset files on disk for the duration of one load.
#[derive(Debug)]
pub struct FetchedDataset {
    root: PathBuf,
    scratch: Option<TempDir>,
}

impl FetchedDataset {
    /// Unpack a zip archive into a scratch directory owned by the handle.
    pub(crate) fn from_archive(bytes: &[u8]) -> Result<Self, LoaderError> {
        let scratch = tempfile::tempdir()?;
        let entries = extract_archive(bytes, scratch.path())?;
        info!("Extracted {} archive entries", entries);

        Ok(Self {
            root: scratch.path().to_path_buf(),
            scratch: Some(scratch),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// True when the files live in a scratch directory owned by this handle.
    pub fn is_temporary(&self) -> bool {
        self.scratch.is_some()
    }
}

fn download_url(handle: &str) -> String {
    format!("{}/{}", KAGGLE_API_URL, handle.trim_matches('/'))
}

fn download_kaggle(
    handle: &str,
    credentials: Option<&KaggleCredentials>,
) -> Result<FetchedDataset, LoaderError> {
    let url = download_url(handle);
    info!("Downloading dataset {} from {}", handle, url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("streamgage-health/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LoaderError::SourceUnavailable(e.to_string()))?;

    let mut request = client.get(&url);
    if let Some(creds) = credentials {
        request = request.basic_auth(&creds.username, Some(&creds.key));
    }

    let response = request
        .send()
        .map_err(|e| LoaderError::SourceUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LoaderError::SourceUnavailable(format!(
            "Kaggle API error: {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| LoaderError::SourceUnavailable(e.to_string()))?;
    debug!("Downloaded {} bytes", bytes.len());

    FetchedDataset::from_archive(&bytes)
}

/// Unpack a zip archive into `dest`, returning the number of entries.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<usize, LoaderError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| LoaderError::SourceUnavailable(format!("Corrupt dataset archive: {}", e)))?;
    archive
        .extract(dest)
        .map_err(|e| LoaderError::SourceUnavailable(format!("Corrupt dataset archive: {}", e)))?;
    Ok(archive.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn archive_with(files: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = archive_with(&[("a.csv", "county\nPeoria\n"), ("b.csv", "county\nTazewell\n")]);

        let count = extract_archive(&bytes, dir.path()).unwrap();

        assert_eq!(count, 2);
        assert!(dir.path().join("a.csv").exists());
        assert!(dir.path().join("b.csv").exists());
    }

    #[test]
    fn garbage_archive_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_archive(b"definitely not a zip", dir.path()).unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable(_)));
    }

    #[test]
    fn local_dir_is_not_temporary() {
        let dir = tempfile::tempdir().unwrap();
        let fetched = DatasetSource::LocalDir(dir.path().to_path_buf())
            .fetch()
            .unwrap();
        assert_eq!(fetched.path(), dir.path());
        assert!(!fetched.is_temporary());
    }

    #[test]
    fn archive_lands_in_scratch_dir() {
        let bytes = archive_with(&[("gages/il.csv", "county\nPeoria\n")]);
        let fetched = FetchedDataset::from_archive(&bytes).unwrap();
        let root = fetched.path().to_path_buf();

        assert!(fetched.is_temporary());
        assert!(root.join("gages/il.csv").exists());

        drop(fetched);
        assert!(!root.exists());
    }

    #[test]
    fn missing_local_dir_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = DatasetSource::LocalDir(missing).fetch().unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable(_)));
    }

    #[test]
    fn download_url_joins_handle() {
        assert_eq!(
            download_url("/protobioengineering/usgs-streamgages-all-50-states/"),
            "https://www.kaggle.com/api/v1/datasets/download/protobioengineering/usgs-streamgages-all-50-states"
        );
    }

    #[test]
    fn web_url_only_for_kaggle() {
        assert_eq!(
            DatasetSource::default().web_url().as_deref(),
            Some("https://www.kaggle.com/datasets/protobioengineering/usgs-streamgages-all-50-states")
        );
        assert!(DatasetSource::LocalDir(PathBuf::from("/tmp")).web_url().is_none());
    }
}
