use crate::backend::StorageBackend;
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use bytes::Bytes;

/// Connection settings for [`S3Backend`].
#[derive(Debug, Clone)]
pub struct S3Options {
    pub bucket_name: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...); path-style addressing is used
    pub endpoint_url: Option<String>,
    /// Overrides the default `https://{bucket}.s3.{region}.amazonaws.com`
    pub public_url: Option<String>,
}

/// S3-compatible storage backend
/// Compatible with: AWS S3, Cloudflare R2, MinIO, DigitalOcean Spaces, etc.
pub struct S3Backend {
    client: Client,
    bucket_name: String,
    public_url: String,
}

impl S3Backend {
    pub async fn new(options: S3Options) -> Result<Self, StorageError> {
        if options.bucket_name.is_empty() {
            return Err(StorageError::ConfigError("bucket_name is empty".to_string()));
        }

        let credentials = Credentials::new(
            options.access_key_id,
            options.secret_access_key,
            None,
            None,
            "upgate-s3",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(options.region.clone()));
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.endpoint_url.is_some())
            .build();
        let client = Client::from_conf(s3_config);

        let public_url = options
            .public_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| default_public_url(&options.bucket_name, &options.region));

        Ok(Self {
            client,
            bucket_name: options.bucket_name,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Virtual-hosted AWS URL for a bucket.
pub(crate) fn default_public_url(bucket: &str, region: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com", bucket, region)
}

#[async_trait::async_trait]
impl StorageBackend for S3Backend {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StorageError> {
        let size = data.len();
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket_name,
                    key = %key,
                    size_bytes = size,
                    "S3 upload failed"
                );
                StorageError::UploadError(key.to_string(), e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket_name,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload complete"
        );
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StorageError::ListError(prefix.to_string(), e.to_string()))?;
            keys.extend(page.contents().iter().filter_map(|obj| obj.key().map(str::to_string)));
        }

        tracing::debug!(bucket = %self.bucket_name, prefix = %prefix, count = keys.len(), "Listed S3 objects");
        Ok(keys)
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        tracing::info!("Deleting {} from S3 bucket {}", key, self.bucket_name);

        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteError(key.to_string(), e.to_string()))?;

        tracing::info!("Delete complete: {}", key);
        Ok(())
    }

    fn public_url(&self) -> &str {
        &self.public_url
    }

    fn is_remote(&self) -> bool {
        true
    }
}
