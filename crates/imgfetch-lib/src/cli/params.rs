use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServeParams {
    pub listen_address: SocketAddr,
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub urls: Vec<String>,
    pub download_dir: PathBuf,
}
