use crate::batch::parse_url_list;
use crate::cli::args::Command;
use crate::cli::params::{FetchParams, ServeParams};
use crate::config::{Config, load_config};
use crate::error::ImgFetchError;
use std::path::PathBuf;

/// Reading URLs from this "file" reads standard input instead.
const STDIN_PATH: &str = "-";

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Serve(ServeParams),
    Fetch(FetchParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, ImgFetchError> {
    match command {
        Command::Serve {
            config_path,
            listen_address,
            download_dir,
        } => {
            let app_config = load_config(config_path.as_deref())?;

            Ok(ResolvedCommand::Serve(ServeParams {
                listen_address: listen_address.unwrap_or(app_config.server.listen_address),
                download_dir: resolve_download_dir(download_dir, &app_config),
            }))
        }
        Command::Fetch {
            config_path,
            download_dir,
            input_path,
            urls,
        } => {
            let app_config = load_config(config_path.as_deref())?;

            let mut resolved_urls: Vec<String> = urls
                .iter()
                .map(|url| url.trim())
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect();

            if let Some(input_path) = input_path {
                let text = read_url_list(&input_path)?;
                resolved_urls.extend(parse_url_list(&text));
            }

            if resolved_urls.is_empty() {
                return Err(ImgFetchError::CliArgumentValidation {
                    details: "No URLs provided. Pass URLs as arguments or use --input."
                        .to_string(),
                });
            }

            Ok(ResolvedCommand::Fetch(FetchParams {
                urls: resolved_urls,
                download_dir: resolve_download_dir(download_dir, &app_config),
            }))
        }
    }
}

fn resolve_download_dir(download_dir: Option<String>, app_config: &Config) -> PathBuf {
    download_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| app_config.download.directory.clone())
}

fn read_url_list(input_path: &str) -> Result<String, ImgFetchError> {
    let result = if input_path == STDIN_PATH {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(input_path)
    };

    result.map_err(|e| ImgFetchError::UrlListRead {
        path: PathBuf::from(input_path),
        reason: e.to_string(),
    })
}
