use eyre::Result;
use imgfetch_lib::config::{Config, DownloadConfig, ServerConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::oneshot;
use warp::http::StatusCode;
use warp::{Filter, Reply};

/// Name of a file served by [image_routes] whose URL segment needs decoding.
pub const SPACED_IMAGE_SEGMENT: &str = "a%20b.png";
pub const PLAIN_IMAGE_SEGMENT: &str = "c.jpg";
pub const LARGE_IMAGE_SEGMENT: &str = "large.bin";

/// A warp server bound to an ephemeral local port, shut down on drop.
pub struct TestServer {
    address: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.address, path.trim_start_matches('/'))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawn a [TestServer] serving the given filters. Must be called from a tokio runtime.
pub fn spawn_test_server<F>(filters: F) -> TestServer
where
    F: Filter + Clone + Send + Sync + 'static,
    F::Extract: Reply,
{
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let (address, server) =
        warp::serve(filters).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
            shutdown_rx.await.ok();
        });
    tokio::spawn(server);
    tracing::debug!(address = %address, "Test server started");

    TestServer {
        address,
        shutdown_tx: Some(shutdown_tx),
    }
}

/// Bytes served for `/images/<segment>`, or `None` for a 404.
pub fn image_bytes(segment: &str) -> Option<Vec<u8>> {
    match segment {
        SPACED_IMAGE_SEGMENT => Some(b"\x89PNG\r\n\x1a\nspaced image".to_vec()),
        PLAIN_IMAGE_SEGMENT => Some(b"\xff\xd8\xff\xe0plain jpeg".to_vec()),
        LARGE_IMAGE_SEGMENT => Some((0..=255u8).cycle().take(3 * 1024 * 1024 + 17).collect()),
        _ => None,
    }
}

/// GET /images/{segment}: canned image bodies, 404 for anything unknown.
pub fn image_routes() -> impl Filter<Extract = (Box<dyn Reply>,), Error = warp::Rejection> + Clone
{
    warp::path!("images" / String)
        .and(warp::get())
        .map(|segment: String| -> Box<dyn Reply> {
            match image_bytes(&segment) {
                Some(bytes) => Box::new(warp::reply::with_header(
                    bytes,
                    "content-type",
                    "application/octet-stream",
                )),
                None => Box::new(warp::reply::with_status(
                    "no such image",
                    StatusCode::NOT_FOUND,
                )),
            }
        })
}

pub fn create_test_config(download_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            listen_address: ([127, 0, 0, 1], 0).into(),
        },
        download: DownloadConfig {
            directory: download_dir.to_path_buf(),
        },
    }
}

/// Temp dir holding a `config.json` whose download folder is `<temp>/downloaded_images`.
pub fn setup_test_environment() -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;

    let config = create_test_config(&download_dir_of(&temp_dir));
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    Ok(temp_dir)
}

pub fn download_dir_of(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("downloaded_images")
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("imgfetch_lib=debug,imgfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
