use crate::fetcher::FetchError;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImgFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Failed to read URL list from {path}: {reason}")]
    UrlListRead { path: PathBuf, reason: String },

    #[error("Failed to bind web server to {address}: {reason}")]
    ServerBind { address: SocketAddr, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
