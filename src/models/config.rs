use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// How pictogram updates are gated on ownership.
///
/// Category updates always refuse callers editing another user's private
/// category. Pictogram updates historically had no such gate; `Open` keeps
/// that behaviour and `OwnerGated` applies the category rule instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PictogramUpdatePolicy {
    #[default]
    Open,
    OwnerGated,
}

/// Runtime configuration of the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub pictogram_update_policy: PictogramUpdatePolicy,
}

fn default_database_url() -> String {
    "picto-catalog.sqlite3".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pictogram_update_policy: PictogramUpdatePolicy::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from an optional YAML file overlaid with `PICTO_*`
    /// environment variables (e.g. `PICTO_DATABASE_URL`).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PICTO"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "database_url: /tmp/catalog.sqlite3").unwrap();
        writeln!(file, "pictogram_update_policy: owner_gated").unwrap();

        let config = CatalogConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.database_url, "/tmp/catalog.sqlite3");
        assert_eq!(
            config.pictogram_update_policy,
            PictogramUpdatePolicy::OwnerGated
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = CatalogConfig::load("does-not-exist/catalog").unwrap();
        assert_eq!(config.pictogram_update_policy, PictogramUpdatePolicy::Open);
        assert!(!config.database_url.is_empty());
    }
}
