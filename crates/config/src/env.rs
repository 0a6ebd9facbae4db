use super::models::{Config, StorageBackend};

/// Environment variables that override `[storage.s3]`.
pub const ENV_BUCKET_NAME: &str = "BUCKET_NAME";
pub const ENV_REGION: &str = "REGION";
pub const ENV_ACCESS_KEY: &str = "AWS_IAM_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_KEY";

impl Config {
    /// Applies S3 credentials and bucket from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    /// A bucket name selects the s3 backend.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(bucket) = get(ENV_BUCKET_NAME) {
            self.storage.s3.bucket_name = bucket;
            if self.storage.backend != StorageBackend::S3 {
                tracing::info!("{} is set, using the s3 storage backend", ENV_BUCKET_NAME);
                self.storage.backend = StorageBackend::S3;
            }
        }
        let s3 = &mut self.storage.s3;
        if let Some(region) = get(ENV_REGION) {
            s3.region = region;
        }
        if let Some(key) = get(ENV_ACCESS_KEY) {
            s3.access_key_id = key;
        }
        if let Some(secret) = get(ENV_SECRET_KEY) {
            s3.secret_access_key = secret;
        }
    }
}
