use upgate_api::{routes_with_timeout, AppState};
use upgate_config::{Config, StorageBackend};
use axum::{extract::DefaultBodyLimit, http::StatusCode, Router};
use std::time::Duration;
use tower::{limit::ConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
};

/// Route local-backend objects are served from; matches the default `storage.local.public_url`.
const LOCAL_FILES_ROUTE: &str = "/files";

pub fn build(config: &Config, app_state: AppState) -> Router {
    let max_body_size = config.server.max_request_size_bytes();
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    // Timeouts are per route: batch uploads are never cut off
    let mut router = routes_with_timeout(timeout);

    if config.storage.backend == StorageBackend::Local {
        let files = ServiceBuilder::new()
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
            .service(ServeDir::new(&config.storage.local.root));
        router = router.nest_service(LOCAL_FILES_ROUTE, files);
    }

    let mut router = router
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(RequestBodyLimitLayer::new(max_body_size));

    // Optionally enable compression based on config
    if config.server.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    router
        .layer(build_cors_layer(&config.server.allowed_origins))
        .with_state(app_state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use bytes::Bytes;
    use std::sync::Arc;
    use tower::ServiceExt;
    use upgate_imaging::Transcoder;
    use upgate_storage::{StorageBackend as Backend, StorageError};
    use upgate_uploader::Uploader;

    const BOUNDARY: &str = "----upgate-router-boundary";

    /// Every call takes longer than the configured one second timeout.
    struct SlowBackend;

    #[async_trait::async_trait]
    impl Backend for SlowBackend {
        async fn put_object(&self, _key: &str, _data: Bytes, _content_type: &str) -> Result<(), StorageError> {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            Ok(())
        }

        async fn list_objects(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            Ok(Vec::new())
        }

        async fn delete_object(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn public_url(&self) -> &str {
            "https://bucket.s3.us-east-1.amazonaws.com"
        }

        fn is_remote(&self) -> bool {
            true
        }
    }

    fn slow_app() -> Router {
        let mut config = Config::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            timeout_secs = 1

            [storage]
            backend = "s3"

            [storage.s3]
            bucket_name = "bucket"
            region = "us-east-1"
            "#,
        )
        .unwrap();
        config.server.enable_compression = false;

        let uploader = Arc::new(Uploader::new(Arc::new(SlowBackend), Transcoder::default(), "uploads"));
        build(&config, AppState::new(uploader, config.server.max_file_size_mb))
    }

    fn upload_request() -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"a.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nhello\r\n--{b}--\r\n",
            b = BOUNDARY
        );
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_slow_batch_upload_runs_to_completion() {
        let response = slow_app().oneshot(upload_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let results: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(results[0]["filename"], "a.txt");
        assert_eq!(results[0]["success"], true);
    }

    #[tokio::test]
    async fn test_slow_listing_times_out() {
        let request = Request::builder().uri("/api/upload").body(Body::empty()).unwrap();
        let response = slow_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
