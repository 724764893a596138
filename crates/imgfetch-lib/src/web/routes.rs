use super::{SAVED_FILES_ROUTE, WebState};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// Largest accepted form body.
const MAX_FORM_LENGTH: u64 = 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub urls: String,
}

pub fn routes(
    state: Arc<WebState>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    index()
        .or(download(state.clone()))
        .or(saved_files(state))
        .with(warp::trace::request())
}

/// GET /
fn index() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(super::pages::index_page()))
}

/// POST /download
fn download(
    state: Arc<WebState>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("download")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_LENGTH))
        .and(warp::body::form())
        .and(with_state(state))
        .and_then(handlers::download)
}

/// GET /downloaded_images/{file}
fn saved_files(
    state: Arc<WebState>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path(SAVED_FILES_ROUTE).and(warp::fs::dir(state.download_dir.clone()))
}

fn with_state(
    state: Arc<WebState>,
) -> impl Filter<Extract = (Arc<WebState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

mod handlers {
    use super::DownloadForm;
    use crate::batch::{fetch_batch, parse_url_list};
    use crate::web::WebState;
    use crate::web::pages::result_page;
    use std::convert::Infallible;
    use std::sync::Arc;
    use warp::http::StatusCode;

    pub async fn download(
        form: DownloadForm,
        state: Arc<WebState>,
    ) -> Result<Box<dyn warp::Reply>, Infallible> {
        let urls = parse_url_list(&form.urls);
        tracing::debug!(count = urls.len(), "⇄ HTTP SERVER: download");

        match fetch_batch(&state.fetcher, urls, &state.download_dir).await {
            Ok(files) => Ok(Box::new(warp::reply::html(result_page(&files)))),
            Err(err) => {
                tracing::warn!(error = %err, "Download failed");
                Ok(Box::new(warp::reply::with_status(
                    format!("Failed to download image: {err}"),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )))
            }
        }
    }
}
