use crate::batch::fetch_batch;
use crate::cli::FetchParams;
use crate::error::ImgFetchError;
use crate::fetcher::ImageFetcher;
use std::path::PathBuf;

/// Download every URL in order, printing each saved path; stops at the first failure.
pub async fn run_fetch(params: FetchParams) -> Result<Vec<PathBuf>, ImgFetchError> {
    let fetcher = ImageFetcher::with_reqwest()?;
    run_fetch_with(&fetcher, params).await
}

pub async fn run_fetch_with(
    fetcher: &ImageFetcher,
    params: FetchParams,
) -> Result<Vec<PathBuf>, ImgFetchError> {
    let FetchParams { urls, download_dir } = params;

    tracing::info!("Downloading {} images...", urls.len());
    let saved = fetch_batch(fetcher, urls, &download_dir).await?;

    for path in &saved {
        println!("{}", path.display());
    }

    tracing::info!("Download completed successfully");
    Ok(saved)
}
