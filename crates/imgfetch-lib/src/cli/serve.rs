use crate::cli::ServeParams;
use crate::error::ImgFetchError;
use crate::fetcher::ImageFetcher;
use crate::web::WebServer;

pub async fn run_serve(params: ServeParams) -> Result<(), ImgFetchError> {
    let ServeParams {
        listen_address,
        download_dir,
    } = params;

    let fetcher = ImageFetcher::with_reqwest()?;
    let server = WebServer::new(fetcher, download_dir);

    server
        .run(listen_address, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", err);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown requested");
        })
        .await
}
