mod pages;
mod routes;
mod server;

use crate::fetcher::ImageFetcher;
use std::path::PathBuf;

pub use pages::{index_page, result_page, saved_file_url};
pub use routes::{DownloadForm, routes};
pub use server::WebServer;

/// Path prefix under which the download folder is served.
pub const SAVED_FILES_ROUTE: &str = "downloaded_images";

/// Shared, read-only state handed to every request.
#[derive(Debug)]
pub struct WebState {
    pub fetcher: ImageFetcher,
    pub download_dir: PathBuf,
}
