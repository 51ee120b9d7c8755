use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// JSON catalog export
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Directory for per-user state
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Served under /static (fish icons and shadows)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// 0 disables periodic catalog reloads
    #[serde(default)]
    pub catalog_reload_interval_minutes: u64,

    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_catalog_path() -> String {
    "data/fish.json".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_enable_cors() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            catalog_path: default_catalog_path(),
            data_dir: default_data_dir(),
            static_dir: default_static_dir(),
            catalog_reload_interval_minutes: 0,
            enable_cors: default_enable_cors(),
        }
    }
}

impl BackendConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: BackendConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Like `from_file`, but a missing file yields the defaults.
    ///
    /// Runs before logging is set up, so the fallback is reported by the caller.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BackendConfig = toml::from_str(
            r#"
            port = 9000
            catalog_path = "/srv/finder/fish.json"
            catalog_reload_interval_minutes = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.catalog_path, "/srv/finder/fish.json");
        assert_eq!(config.catalog_reload_interval_minutes, 30);
        assert_eq!(config.log_level, "info");
        assert!(config.enable_cors);
        assert_eq!(config.server_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let (config, found) =
            BackendConfig::load_or_default(temp_dir.path().join("config.toml")).unwrap();
        assert!(!found);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(BackendConfig::load_or_default(&path).is_err());
    }
}
