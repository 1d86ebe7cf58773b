// Taksa API server
// Decision: Without database settings the server runs in dev mode on seeded in-memory storage

use anyhow::{Context, Result};
use taksa_api::{auth::AuthConfig, auth::AuthState, build_app, config::ServerConfig};
use taksa_core::telemetry::{init_telemetry, TelemetryConfig};
use taksa_storage::StorageBackend;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let mut telemetry = TelemetryConfig::from_env();
    if telemetry.log_filter.is_none() {
        telemetry.log_filter = Some("taksa_api=debug,tower_http=debug".to_string());
    }
    telemetry.service_name = "taksa-api".to_string();
    telemetry.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry);

    tracing::info!("taksa-api starting...");

    let config = ServerConfig::from_env();

    let storage = match &config.database_url {
        Some(url) => {
            let storage = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            storage
        }
        None => {
            tracing::warn!("No database configured, running in dev mode with in-memory storage");
            StorageBackend::in_memory()
        }
    };

    if storage.is_dev_mode() || config.seed_reference_data {
        let report = storage
            .seed_reference_data()
            .await
            .context("Failed to seed reference data")?;
        tracing::info!(
            drivers = report.drivers,
            houses = report.houses,
            "Reference data ready"
        );
    }

    let auth_config = AuthConfig::from_env(storage.is_dev_mode())?;
    tracing::info!(
        algorithm = ?auth_config.jwt.algorithm,
        token_lifetime_secs = auth_config.jwt.access_token_lifetime.as_secs(),
        min_password_length = auth_config.min_password_length,
        "Authentication configured"
    );

    if config.api_prefix.is_empty() {
        tracing::info!("API prefix disabled");
    } else {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let auth_state = AuthState::new(auth_config, storage);
    let app = build_app(auth_state, &config.api_prefix, config.cors_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
