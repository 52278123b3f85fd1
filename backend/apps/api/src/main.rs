//! API Server Entry Point
//!
//! Loads configuration, prepares storage and the database, then serves.
//! Startup failures are reported through `anyhow`.

mod app;
mod config;

use capture::{TextWatermarkRenderer, discover_font};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,capture=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(app_name = %config.app_name, api_prefix = %config.api_prefix, "Starting");

    if config.uses_dev_secret() {
        tracing::warn!("SECRET_KEY not set, using the development secret");
    }

    // Storage
    tokio::fs::create_dir_all(&config.storage_dir).await?;
    tracing::info!(storage_dir = %config.storage_dir.display(), "Storage ready");

    // Database connection
    if let Some(parent) = config
        .database_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let pool = platform::database::connect(&config.database_path, MAX_DB_CONNECTIONS).await?;

    tracing::info!(path = %config.database_path.display(), "Connected to database");

    // Run migrations
    platform::database::run_migrations(&pool).await?;

    tracing::info!("Migrations completed");

    // Watermark font
    let renderer = if config.enable_watermark {
        match discover_font(config.watermark_font.as_deref()) {
            Some((path, font)) => {
                tracing::info!(font = %path.display(), "Watermark font loaded");
                TextWatermarkRenderer::new(Some(font))
            }
            None => {
                tracing::warn!("No watermark font found, uploads will keep the original image");
                TextWatermarkRenderer::without_font()
            }
        }
    } else {
        tracing::info!("Watermarking disabled");
        TextWatermarkRenderer::without_font()
    };

    // Build router
    let app = app::build_router(&config, pool, renderer);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
