use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while fetching a single image.
///
/// Each variant is terminal for the URL being processed; nothing is retried.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to parse URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to unescape file name {file_name}: {reason}")]
    InvalidFileName { file_name: String, reason: String },

    #[error("Failed to create download folder {path}: {reason}")]
    DirectoryCreate { path: PathBuf, reason: String },

    #[error("Failed to download image from {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Failed to download image from {url}: {status}")]
    HttpStatus { url: String, status: String },

    #[error("Failed to create file {path}: {reason}")]
    FileCreate { path: PathBuf, reason: String },

    #[error("Failed to save image to {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },
}

/// Render an error together with its chain of sources, `outer: inner: root`.
pub(crate) fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // reqwest and hyper sometimes repeat the inner message verbatim
        if !description.ends_with(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}
