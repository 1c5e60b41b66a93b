//! Service configuration from the environment.
//!
//! - `UTM_ADDR` listen address, default `0.0.0.0:8787`
//! - `UTM_DATA_DIR` directory holding `store.json`, default `./data`
//! - `UTM_FIELDS_PATH` optional YAML field catalog
use std::path::PathBuf;
use utm_core::{FieldCatalog, UtmError};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const STORE_FILE: &str = "store.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub addr: String,
    pub data_dir: PathBuf,
    pub fields_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fields_path: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            addr: get("UTM_ADDR").unwrap_or(defaults.addr),
            data_dir: get("UTM_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            fields_path: get("UTM_FIELDS_PATH"),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn load_catalog(&self) -> Result<FieldCatalog, UtmError> {
        match &self.fields_path {
            Some(path) => FieldCatalog::load(path),
            None => Ok(FieldCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(|_| None);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.store_path(), PathBuf::from("./data/store.json"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("UTM_ADDR", "127.0.0.1:9000"),
            ("UTM_DATA_DIR", "/var/lib/utm"),
            ("UTM_FIELDS_PATH", " "),
        ]
        .into_iter()
        .collect();

        let config = ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/utm"));
        assert_eq!(config.fields_path, None);
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = ApiConfig {
            fields_path: Some("/nonexistent/fields.yaml".to_string()),
            ..ApiConfig::default()
        };
        assert!(config.load_catalog().is_err());
    }
}
