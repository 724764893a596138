use super::Config;
use crate::error::ImgFetchError;
use config::Config as ConfigBuilder;

pub const ENV_PREFIX: &str = "IMGFETCH";

/// Load configuration from an optional file, then `IMGFETCH_*` environment overrides
/// (`IMGFETCH_DOWNLOAD__DIRECTORY=/srv/images`). Missing values fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> Result<Config, ImgFetchError> {
    let mut builder = ConfigBuilder::builder();
    if let Some(config_path) = config_path {
        tracing::debug!("Loading configuration from {}", config_path);
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let config_builder = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).expect("defaults should load");

        assert_eq!(config, Config::default());
        assert_eq!(config.server.listen_address.port(), 8080);
        assert_eq!(config.download.directory, PathBuf::from("downloaded_images"));
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("imgfetch.yaml");
        std::fs::write(
            &config_path,
            "server:\n  listen_address: \"127.0.0.1:9090\"\ndownload:\n  directory: /srv/images\n",
        )
        .unwrap();

        let config = load_config(Some(config_path.to_str().unwrap())).unwrap();

        assert_eq!(
            config.server.listen_address,
            "127.0.0.1:9090".parse().unwrap()
        );
        assert_eq!(config.download.directory, PathBuf::from("/srv/images"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("imgfetch.toml");
        std::fs::write(&config_path, "[download]\ndirectory = \"pics\"\n").unwrap();

        let config = load_config(Some(config_path.to_str().unwrap())).unwrap();

        assert_eq!(config.download.directory, PathBuf::from("pics"));
        assert_eq!(config.server, Default::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("imgfetch.toml");
        std::fs::write(&config_path, "[download]\nfolder = \"pics\"\n").unwrap();

        let result = load_config(Some(config_path.to_str().unwrap()));

        assert!(matches!(result, Err(ImgFetchError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("absent.yaml");

        assert!(load_config(Some(config_path.to_str().unwrap())).is_err());
    }
}
