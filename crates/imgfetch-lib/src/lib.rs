pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod web;

pub use config::Config;
pub use error::ImgFetchError;
pub use fetcher::{FetchError, ImageFetcher};
