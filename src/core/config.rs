use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.currencyapi.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Owner whose records the CLI aggregates.
    pub owner: String,
    /// Currency every total is normalized into.
    pub pivot_currency: String,
    /// YAML file holding the record list.
    pub records_path: String,
    pub provider: Option<RateProviderConfig>,
    /// When true the rate provider is never called; the cached snapshot
    /// or the built-in fallback table is used at any age.
    #[serde(default)]
    pub offline: bool,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "tallyfx", "tallyfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "tallyfx", "tallyfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
owner: "alice"
pivot_currency: "USD"
records_path: "/home/alice/records.yaml"
provider:
  base_url: "https://api.currencyapi.com"
  api_key: "secret"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.owner, "alice");
        assert_eq!(config.pivot_currency, "USD");
        assert_eq!(config.records_path, "/home/alice/records.yaml");
        let provider = config.provider.expect("Expected provider config");
        assert_eq!(provider.base_url, "https://api.currencyapi.com");
        assert_eq!(provider.api_key, "secret");
        assert!(!config.offline);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_offline_config_without_provider() {
        let yaml_str = r#"
owner: "alice"
pivot_currency: "EUR"
records_path: "records.yaml"
offline: true
data_path: "/tmp/tallyfx"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert!(config.offline);
        assert!(config.provider.is_none());
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/tallyfx")
        );
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let yaml_str = r#"
pivot_currency: "USD"
records_path: "records.yaml"
"#;
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }
}
