use crate::fetcher::{DownloadRequest, DownloadResult, FetchError, ImageFetcher};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};

/// Split newline-separated text into URLs, trimming each line and dropping blank ones.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lazily fetch `urls` one after another.
///
/// A URL is only fetched once the result for the previous one has been consumed, so the
/// caller decides whether to keep going after a failure.
pub fn fetch_each<'a>(
    fetcher: &'a ImageFetcher,
    urls: Vec<String>,
    destination_dir: &'a Path,
) -> impl Stream<Item = DownloadResult> + Send + 'a {
    stream::iter(urls).then(move |url| {
        let request = DownloadRequest::new(url, destination_dir);
        async move { fetcher.fetch_request(&request).await }
    })
}

/// Fetch every URL in order, stopping at the first failure.
///
/// Files saved before the failure stay on disk.
pub async fn fetch_batch(
    fetcher: &ImageFetcher,
    urls: Vec<String>,
    destination_dir: &Path,
) -> Result<Vec<PathBuf>, FetchError> {
    tracing::info!(count = urls.len(), dir = %destination_dir.display(), "Downloading batch");
    let saved: Vec<PathBuf> = fetch_each(fetcher, urls, destination_dir)
        .try_collect()
        .await?;
    tracing::info!(count = saved.len(), "Batch finished");
    Ok(saved)
}
