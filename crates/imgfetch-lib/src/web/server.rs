use super::WebState;
use super::routes::routes;
use crate::error::ImgFetchError;
use crate::fetcher::ImageFetcher;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Web front end: the URL form, the download handler and the saved files.
pub struct WebServer {
    state: Arc<WebState>,
}

impl WebServer {
    pub fn new(fetcher: ImageFetcher, download_dir: PathBuf) -> Self {
        Self {
            state: Arc::new(WebState {
                fetcher,
                download_dir,
            }),
        }
    }

    /// Bind the listening socket. The returned future serves requests until `shutdown`
    /// resolves; port `0` picks a free port, reported in the returned address.
    pub fn bind<S>(
        self,
        address: SocketAddr,
        shutdown: S,
    ) -> Result<(SocketAddr, impl Future<Output = ()> + 'static), ImgFetchError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let (bound_address, server) = warp::serve(routes(self.state))
            .try_bind_with_graceful_shutdown(address, shutdown)
            .map_err(|e| ImgFetchError::ServerBind {
                address,
                reason: e.to_string(),
            })?;

        Ok((bound_address, server))
    }

    pub async fn run<S>(self, address: SocketAddr, shutdown: S) -> Result<(), ImgFetchError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let download_dir = self.state.download_dir.clone();
        let (bound_address, server) = self.bind(address, shutdown)?;
        tracing::info!(
            address = %bound_address,
            download_dir = %download_dir.display(),
            "Web server listening"
        );

        server.await;

        tracing::info!("Web server stopped");
        Ok(())
    }
}
