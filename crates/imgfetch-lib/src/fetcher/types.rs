use super::FetchError;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source_url: String,
    pub destination_dir: PathBuf,
}

impl DownloadRequest {
    pub fn new(source_url: impl Into<String>, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            destination_dir: destination_dir.into(),
        }
    }
}

/// Local path of the saved file, or why it could not be saved.
pub type DownloadResult = Result<PathBuf, FetchError>;
