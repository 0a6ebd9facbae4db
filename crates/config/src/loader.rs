use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use crate::ConfigError;
use std::path::Path;
use std::sync::Arc;

impl Config {
    /// Parses configuration text without touching the environment
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    ///
    /// Environment overrides are applied and the result is validated.
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<upgate_events::EventBus>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        // Migrate config if needed
        migrate_config_if_needed(path, events).await?;

        // Read and parse config
        let content = tokio::fs::read_to_string(path).await?;
        let mut config = Config::from_toml_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_created_from_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::from_file(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_from_toml_str_reports_parse_errors() {
        let err = Config::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError(_)));
    }

    #[tokio::test]
    async fn test_existing_file_is_migrated_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "# mine\n[server]\nhost = \"127.0.0.1\"\nport = 9000\n")
            .await
            .unwrap();

        let config = Config::from_file(&path).await.unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.upload.default_folder, "uploads");

        let rewritten = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(rewritten.starts_with("# mine"));
        assert!(rewritten.contains("max_file_size_mb = 50"));
        assert!(rewritten.contains("[upload]"));
    }
}
