use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration, validated once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Record store connection settings
    pub store: StoreConfig,
    /// Port the HTTP server binds to
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Connection settings for the hosted record store
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Base URL of the store's REST endpoint, e.g. https://xyz.supabase.co
    pub url: String,
    /// Access key sent with every request
    pub key: String,
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__STORE__URL
    pub fn load() -> Result<Self, AppError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPES__STORE__KEY
            .add_source(
                Environment::with_prefix("RECIPES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a store URL that does not parse or is not http(s).
    ///
    /// A common misconfiguration is pasting the access key into the URL
    /// field; catching it here keeps it a startup error rather than a
    /// failure on every request.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = reqwest::Url::parse(&self.store.url).map_err(|e| {
            AppError::Config(ConfigError::Message(format!(
                "invalid store.url `{}`: {}",
                self.store.url, e
            )))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(ConfigError::Message(format!(
                "store.url must start with http:// or https://, got `{}`",
                self.store.url
            ))));
        }

        if self.store.key.trim().is_empty() {
            return Err(AppError::Config(ConfigError::Message(
                "store.key must not be empty".to_string(),
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(url: &str, key: &str) -> AppConfig {
        AppConfig {
            store: StoreConfig {
                url: url.to_string(),
                key: key.to_string(),
            },
            port: default_port(),
        }
    }

    #[test]
    fn test_valid_https_url() {
        let config = config_with("https://abc.supabase.co", "anon-key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_key_pasted_as_url() {
        // the key pasted into the URL field, the usual misconfiguration
        let config = config_with("eyJhbGciOiJIUzI1NiIs", "anon-key");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = config_with("ftp://abc.supabase.co", "anon-key");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_key() {
        let config = config_with("https://abc.supabase.co", "   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_port() {
        assert_eq!(default_port(), 3000);
    }
}
