mod error;
mod fetch;
mod file_name;
mod sharing_link;
mod transport;
mod types;

pub use error::FetchError;
pub use fetch::ImageFetcher;
pub use file_name::file_name_from_url;
pub use sharing_link::rewrite_dropbox_share_link;
pub use transport::{
    BodyStream, HttpTransport, ReqwestTransport, TransportError, TransportResponse,
};
pub use types::{DownloadRequest, DownloadResult};

#[cfg(test)]
pub(crate) use transport::fake::FakeTransport;
