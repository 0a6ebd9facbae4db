use crate::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default = "super::defaults::upload_settings")]
    pub upload: UploadSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::max_file_size_mb")]
    pub max_file_size_mb: usize,
    #[serde(default = "super::defaults::max_request_size_mb")]
    pub max_request_size_mb: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
}

impl ServerSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn max_request_size_bytes(&self) -> usize {
        self.max_request_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "super::defaults::default_folder")]
    pub default_folder: String,
    #[serde(default = "super::defaults::max_width")]
    pub max_width: u32,
    #[serde(default = "super::defaults::max_height")]
    pub max_height: u32,
    #[serde(default = "super::defaults::webp_quality")]
    pub webp_quality: u8,
    #[serde(default = "super::defaults::near_lossless")]
    pub near_lossless: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "super::defaults::storage_backend")]
    pub backend: StorageBackend,
    #[serde(default = "super::defaults::local_settings")]
    pub local: LocalSettings,
    #[serde(default = "super::defaults::s3_settings")]
    pub s3: S3Settings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalSettings {
    #[serde(default = "super::defaults::local_root")]
    pub root: String,
    #[serde(default = "super::defaults::local_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub bucket_name: String,
    #[serde(default = "super::defaults::s3_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    /// Empty means the regular AWS endpoint
    #[serde(default)]
    pub endpoint_url: String,
    /// Empty means `https://{bucket}.s3.{region}.amazonaws.com`
    #[serde(default)]
    pub public_url: String,
}

impl S3Settings {
    pub fn endpoint(&self) -> Option<&str> {
        Some(self.endpoint_url.as_str()).filter(|e| !e.is_empty())
    }

    pub fn resolved_public_url(&self) -> String {
        if self.public_url.is_empty() {
            format!("https://{}.s3.{}.amazonaws.com", self.bucket_name, self.region)
        } else {
            self.public_url.trim_end_matches('/').to_string()
        }
    }
}

impl Config {
    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_file_size_mb == 0 {
            return Err(ConfigError::InvalidConfig("server.max_file_size_mb must be greater than 0".to_string()));
        }
        if self.server.max_request_size_mb < self.server.max_file_size_mb {
            return Err(ConfigError::InvalidConfig(
                "server.max_request_size_mb must be at least server.max_file_size_mb".to_string(),
            ));
        }
        if self.upload.default_folder.trim_matches('/').trim().is_empty() {
            return Err(ConfigError::InvalidConfig("upload.default_folder must not be empty".to_string()));
        }
        if self.upload.max_width == 0 || self.upload.max_height == 0 {
            return Err(ConfigError::InvalidConfig("upload.max_width and upload.max_height must be greater than 0".to_string()));
        }
        if self.upload.webp_quality > 100 {
            return Err(ConfigError::InvalidConfig("upload.webp_quality must be between 0 and 100".to_string()));
        }
        if self.storage.backend == StorageBackend::S3 {
            if self.storage.s3.bucket_name.is_empty() {
                return Err(ConfigError::InvalidConfig("storage.s3.bucket_name is required for the s3 backend".to_string()));
            }
            if self.storage.s3.region.is_empty() {
                return Err(ConfigError::InvalidConfig("storage.s3.region is required for the s3 backend".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Config {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_template_parses_with_defaults() {
        let config = parse(crate::DEFAULT_CONFIG_TEMPLATE);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_file_size_mb, 50);
        assert_eq!(config.server.max_file_size_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.upload.default_folder, "uploads");
        assert_eq!((config.upload.max_width, config.upload.max_height), (1920, 1080));
        assert_eq!(config.upload.webp_quality, 75);
        assert!(config.upload.near_lossless);
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse("[server]\nhost = \"127.0.0.1\"\nport = 3000\n");

        assert_eq!(config.server.timeout_secs, 60);
        assert_eq!(config.server.allowed_origins, vec!["*"]);
        assert_eq!(config.storage.s3.region, "us-east-1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_s3_requires_bucket() {
        let config = parse("[server]\nhost = \"0.0.0.0\"\nport = 80\n[storage]\nbackend = \"s3\"\n");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_s3_public_url() {
        let mut s3 = crate::defaults::s3_settings();
        s3.bucket_name = "photos".to_string();
        s3.region = "eu-west-3".to_string();
        assert_eq!(s3.resolved_public_url(), "https://photos.s3.eu-west-3.amazonaws.com");
        assert_eq!(s3.endpoint(), None);

        s3.public_url = "https://cdn.example.com/".to_string();
        assert_eq!(s3.resolved_public_url(), "https://cdn.example.com");
    }

    #[test]
    fn test_zero_file_limit_rejected() {
        let mut config = parse(crate::DEFAULT_CONFIG_TEMPLATE);
        config.server.max_file_size_mb = 0;
        assert!(config.validate().is_err());
    }
}
