use upgate_config::{Config, StorageBackend as StorageBackendType};
use upgate_storage::{LocalBackend, StorageBackend};
#[cfg(feature = "s3")]
use upgate_storage::{S3Backend, S3Options};
use upgate_events::{AppEvent, EventBus};
use anyhow::Result;
use std::sync::Arc;

pub async fn initialize(config: &Config, events: &Arc<EventBus>) -> Result<Arc<dyn StorageBackend>> {
    let backend = create_backend(config).await?;

    events.emit(AppEvent::StorageReady {
        backend: config.storage.backend.to_string(),
        public_url: backend.public_url().to_string(),
    });

    Ok(backend)
}

async fn create_backend(config: &Config) -> Result<Arc<dyn StorageBackend>> {
    match config.storage.backend {
        StorageBackendType::Local => {
            let backend = LocalBackend::new(
                std::path::PathBuf::from(&config.storage.local.root),
                config.storage.local.public_url.clone(),
            );
            tracing::info!(
                "Initialized local storage backend: root={}",
                config.storage.local.root
            );
            Ok(Arc::new(backend) as Arc<dyn StorageBackend>)
        }
        #[cfg(feature = "s3")]
        StorageBackendType::S3 => {
            let s3 = &config.storage.s3;
            let backend = S3Backend::new(S3Options {
                bucket_name: s3.bucket_name.clone(),
                region: s3.region.clone(),
                access_key_id: s3.access_key_id.clone(),
                secret_access_key: s3.secret_access_key.clone(),
                endpoint_url: s3.endpoint().map(str::to_string),
                public_url: Some(s3.resolved_public_url()),
            })
            .await?;

            tracing::info!(
                "Initialized S3 storage backend: bucket={}, region={}",
                s3.bucket_name,
                s3.region
            );

            Ok(Arc::new(backend) as Arc<dyn StorageBackend>)
        }
        #[cfg(not(feature = "s3"))]
        StorageBackendType::S3 => {
            anyhow::bail!(
                "S3 backend selected but not compiled. Rebuild with --features s3 to enable S3 support.\n\
                Note: S3 support requires cmake to be installed on your system."
            )
        }
    }
}
