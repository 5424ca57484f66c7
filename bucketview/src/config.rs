//! Configuration management
//!
//! Settings load from an optional YAML profile under `config/` selected by
//! the `ENV` variable, with `BUCKETVIEW`-prefixed environment variables
//! layered on top (`BUCKETVIEW_AWS__ACCESS_KEY` sets `aws.access_key`).

use std::path::PathBuf;

use serde::Deserialize;

use bucketview_s3::StoreConfig;

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    pub aws: StoreConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct DownloadConfig {
    /// Root directory for download scratch files; the OS temp directory
    /// when unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

impl Config {
    /// Load the named profile from `config/{env}` plus environment
    /// overrides. Missing credentials are a hard failure.
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BUCKETVIEW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize::<Config>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8081);
    }

    #[test]
    fn test_profile_deserializes_from_yaml() {
        let raw = r#"
server:
  port: 9090
aws:
  access_key: test
  secret_key: test
  endpoint_url: http://localhost:4566
"#;
        let config: Config = serde_yaml_like(raw);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.aws.access_key, "test");
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(config.aws.region, "us-east-1");
        assert!(config.download.scratch_dir.is_none());
    }

    fn serde_yaml_like(raw: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
