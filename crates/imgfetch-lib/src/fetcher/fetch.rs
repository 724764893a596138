use super::error::describe_error;
use super::file_name::file_name_from_url;
use super::sharing_link::rewrite_dropbox_share_link;
use super::transport::{HttpTransport, ReqwestTransport};
use super::types::{DownloadRequest, DownloadResult};
use super::FetchError;
use futures::StreamExt;
use reqwest::StatusCode;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Downloads one image per call and saves it into a destination folder.
///
/// The fetcher owns its transport; it keeps no other state between calls.
#[derive(Clone)]
pub struct ImageFetcher {
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFetcher").finish_non_exhaustive()
    }
}

impl ImageFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub fn with_reqwest() -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(ReqwestTransport::new()?)))
    }

    pub async fn fetch_request(&self, request: &DownloadRequest) -> DownloadResult {
        self.fetch(&request.source_url, &request.destination_dir)
            .await
    }

    /// Fetch `source_url` and save the body as `destination_dir/<decoded last path segment>`.
    ///
    /// An existing file with the same name is overwritten. If the body fails midway the
    /// bytes received so far are flushed and the partial file is left in place.
    pub async fn fetch(&self, source_url: &str, destination_dir: &Path) -> DownloadResult {
        let parsed_url = Url::parse(source_url).map_err(|e| FetchError::InvalidUrl {
            url: source_url.to_string(),
            reason: e.to_string(),
        })?;
        let file_name = file_name_from_url(&parsed_url)?;

        let request_url = match rewrite_dropbox_share_link(source_url) {
            Cow::Borrowed(_) => parsed_url,
            Cow::Owned(rewritten) => {
                tracing::debug!(from = %source_url, to = %rewritten, "Rewrote share link");
                Url::parse(&rewritten).map_err(|e| FetchError::InvalidUrl {
                    url: rewritten.clone(),
                    reason: e.to_string(),
                })?
            }
        };

        ensure_directory(destination_dir).await?;

        tracing::debug!(url = %request_url, "Downloading");
        let response = self
            .transport
            .get(&request_url)
            .await
            .map_err(|e| FetchError::Network {
                url: request_url.to_string(),
                reason: describe_error(&e),
            })?;

        if response.status != StatusCode::OK {
            return Err(FetchError::HttpStatus {
                url: request_url.to_string(),
                status: response.status_text(),
            });
        }

        let output_path = destination_dir.join(&file_name);
        let file = tokio::fs::File::create(&output_path)
            .await
            .map_err(|e| FetchError::FileCreate {
                path: output_path.clone(),
                reason: e.to_string(),
            })?;
        let mut writer = tokio::io::BufWriter::new(file);

        let mut body = response.body;
        let mut written: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    // keep what was already received on disk
                    let _ = writer.flush().await;
                    return Err(FetchError::FileWrite {
                        path: output_path,
                        reason: describe_error(&e),
                    });
                }
            };
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| write_error(&output_path, e))?;
            written += chunk.len() as u64;
        }
        writer
            .flush()
            .await
            .map_err(|e| write_error(&output_path, e))?;

        tracing::info!(url = %request_url, output = %output_path.display(), bytes = written, "Saved image");
        Ok(output_path)
    }
}

fn write_error(path: &Path, err: std::io::Error) -> FetchError {
    FetchError::FileWrite {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

async fn ensure_directory(path: &Path) -> Result<(), FetchError> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o777);

    builder
        .create(path)
        .await
        .map_err(|e| FetchError::DirectoryCreate {
            path: PathBuf::from(path),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::transport::fake::FakeTransport;

    fn fetcher_with(transport: FakeTransport) -> (ImageFetcher, Arc<FakeTransport>) {
        let transport = Arc::new(transport);
        (ImageFetcher::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_fetch_saves_body_byte_for_byte() {
        let body: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_chunked_response(
            "https://example.com/a%20b.png",
            StatusCode::OK,
            body.chunks(1024).map(<[u8]>::to_vec).collect(),
        ));
        let temp_dir = tempfile::tempdir().unwrap();

        let saved = fetcher
            .fetch("https://example.com/a%20b.png", temp_dir.path())
            .await
            .expect("fetch should succeed");

        assert_eq!(saved, temp_dir.path().join("a b.png"));
        assert_eq!(std::fs::read(&saved).unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_creates_missing_directory_and_is_repeatable() {
        let (fetcher, _) = fetcher_with(
            FakeTransport::new()
                .with_response("https://example.com/one.png", StatusCode::OK, b"one")
                .with_response("https://example.com/two.png", StatusCode::OK, b"two"),
        );
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("deep").join("er").join("images");

        fetcher
            .fetch("https://example.com/one.png", &nested)
            .await
            .expect("first fetch should create the directory");
        assert!(nested.is_dir());

        fetcher
            .fetch("https://example.com/two.png", &nested)
            .await
            .expect("second fetch should reuse the directory");

        assert_eq!(std::fs::read(nested.join("one.png")).unwrap(), b"one");
        assert_eq!(std::fs::read(nested.join("two.png")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_fetch_overwrites_existing_file() {
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_response(
            "https://example.com/c.jpg",
            StatusCode::OK,
            b"new",
        ));
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("c.jpg"), b"old and longer").unwrap();

        fetcher
            .fetch("https://example.com/c.jpg", temp_dir.path())
            .await
            .unwrap();

        assert_eq!(std::fs::read(temp_dir.path().join("c.jpg")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_dropbox_link_is_rewritten_before_request() {
        let (fetcher, transport) = fetcher_with(FakeTransport::new().with_response(
            "https://www.dropbox.com/s/abc/cat.png?raw=1",
            StatusCode::OK,
            b"meow",
        ));
        let temp_dir = tempfile::tempdir().unwrap();

        let saved = fetcher
            .fetch("https://www.dropbox.com/s/abc/cat.png?dl=0", temp_dir.path())
            .await
            .unwrap();

        assert_eq!(
            transport.requests(),
            vec!["https://www.dropbox.com/s/abc/cat.png?raw=1".to_string()]
        );
        assert_eq!(saved, temp_dir.path().join("cat.png"));
    }

    #[tokio::test]
    async fn test_regular_link_is_requested_unchanged() {
        let (fetcher, transport) = fetcher_with(FakeTransport::new().with_response(
            "https://example.com/cat.png?dl=0",
            StatusCode::OK,
            b"meow",
        ));
        let temp_dir = tempfile::tempdir().unwrap();

        fetcher
            .fetch("https://example.com/cat.png?dl=0", temp_dir.path())
            .await
            .unwrap();

        assert_eq!(
            transport.requests(),
            vec!["https://example.com/cat.png?dl=0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_non_ok_status_fails_without_touching_destination() {
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_response(
            "https://example.com/missing.png",
            StatusCode::NOT_FOUND,
            b"<html>not here</html>",
        ));
        let temp_dir = tempfile::tempdir().unwrap();

        let err = fetcher
            .fetch("https://example.com/missing.png", temp_dir.path())
            .await
            .unwrap_err();

        assert!(
            matches!(err, FetchError::HttpStatus { ref status, .. } if status == "404 Not Found"),
            "unexpected error: {err:?}"
        );
        assert!(!temp_dir.path().join("missing.png").exists());
    }

    #[tokio::test]
    async fn test_non_ok_status_keeps_previous_file() {
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_response(
            "https://example.com/keep.png",
            StatusCode::INTERNAL_SERVER_ERROR,
            b"",
        ));
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("keep.png"), b"original").unwrap();

        let result = fetcher
            .fetch("https://example.com/keep.png", temp_dir.path())
            .await;

        assert!(matches!(result, Err(FetchError::HttpStatus { .. })));
        assert_eq!(
            std::fs::read(temp_dir.path().join("keep.png")).unwrap(),
            b"original"
        );
    }

    #[tokio::test]
    async fn test_malformed_file_name_makes_no_request() {
        let (fetcher, transport) = fetcher_with(FakeTransport::new());
        let temp_dir = tempfile::tempdir().unwrap();

        let result = fetcher
            .fetch("https://example.com/broken%G1.png", temp_dir.path())
            .await;

        assert!(matches!(result, Err(FetchError::InvalidFileName { .. })));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_url_is_invalid_url() {
        let (fetcher, transport) = fetcher_with(FakeTransport::new());
        let temp_dir = tempfile::tempdir().unwrap();

        let result = fetcher.fetch("not a url", temp_dir.path()).await;

        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let (fetcher, _) = fetcher_with(
            FakeTransport::new().with_failure("https://example.com/x.png", "connection refused"),
        );
        let temp_dir = tempfile::tempdir().unwrap();

        let err = fetcher
            .fetch("https://example.com/x.png", temp_dir.path())
            .await
            .unwrap_err();

        assert!(
            matches!(err, FetchError::Network { ref reason, .. } if reason == "connection refused"),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_body_failure_is_write_error_and_keeps_partial_file() {
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_broken_body(
            "https://example.com/p.png",
            vec![b"partial".to_vec()],
            "connection reset",
        ));
        let temp_dir = tempfile::tempdir().unwrap();

        let err = fetcher
            .fetch("https://example.com/p.png", temp_dir.path())
            .await
            .unwrap_err();

        assert!(
            matches!(err, FetchError::FileWrite { ref path, ref reason }
                if path == &temp_dir.path().join("p.png") && reason == "connection reset"),
            "unexpected error: {err:?}"
        );
        assert_eq!(
            std::fs::read(temp_dir.path().join("p.png")).unwrap(),
            b"partial"
        );
    }

    #[tokio::test]
    async fn test_directory_blocked_by_file_is_directory_error() {
        let (fetcher, transport) = fetcher_with(FakeTransport::new());
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let result = fetcher
            .fetch("https://example.com/x.png", &blocker.join("images"))
            .await;

        assert!(matches!(result, Err(FetchError::DirectoryCreate { .. })));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_name_cannot_be_created() {
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_response(
            "https://example.com/",
            StatusCode::OK,
            b"index",
        ));
        let temp_dir = tempfile::tempdir().unwrap();

        let result = fetcher
            .fetch("https://example.com/", temp_dir.path())
            .await;

        assert!(matches!(result, Err(FetchError::FileCreate { .. })));
    }

    #[tokio::test]
    async fn test_fetch_request_uses_request_fields() {
        let (fetcher, _) = fetcher_with(FakeTransport::new().with_response(
            "https://example.com/req.png",
            StatusCode::OK,
            b"req",
        ));
        let temp_dir = tempfile::tempdir().unwrap();
        let request = DownloadRequest::new("https://example.com/req.png", temp_dir.path());

        let saved = fetcher.fetch_request(&request).await.unwrap();

        assert_eq!(saved, temp_dir.path().join("req.png"));
    }
}
