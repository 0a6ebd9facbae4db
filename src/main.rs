mod bootstrap;

use upgate_api::AppState;
use upgate_events::{AppEvent, EventBus};
use upgate_imaging::{TranscodeSettings, Transcoder};
use upgate_uploader::Uploader;
use crate::bootstrap::{config, logging, router, server, storage};
use anyhow::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("UPGATE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = match config::load(&config_path, &events).await {
        Ok(config) => config,
        Err(e) => {
            events.emit(AppEvent::Error {
                context: "Failed to load configuration".to_string(),
                error: e.to_string(),
            });
            return Err(e);
        }
    };

    let storage = storage::initialize(&config, &events).await?;

    let transcoder = Transcoder::new(TranscodeSettings {
        max_width: config.upload.max_width,
        max_height: config.upload.max_height,
        quality: config.upload.webp_quality,
        near_lossless: config.upload.near_lossless,
    });
    let uploader = Arc::new(Uploader::new(
        storage,
        transcoder,
        config.upload.default_folder.clone(),
    ));

    let app_state = AppState::new(uploader, config.server.max_file_size_mb);
    let app = router::build(&config, app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = server::bind(&addr).await?;

    events.emit(AppEvent::Ready { addr: addr.clone() });

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}
