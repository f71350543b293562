mod config;
mod dashboard;
mod db;
mod errors;
mod extract;
mod jobs;
mod models;
mod profile;
mod resumes;
mod retry;
mod routes;
mod session;
mod state;
mod storage;
mod store;
mod validation;

#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::retry::RetryPolicy;
use crate::routes::build_router;
use crate::session::HttpIdentityProvider;
use crate::state::AppState;
use crate::storage::S3ObjectStore;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing required env vars
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerAI API v{}", env!("CARGO_PKG_VERSION"));

    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(pool));

    let objects = Arc::new(S3ObjectStore::from_config(&config).await);

    let identity = Arc::new(HttpIdentityProvider::new(
        config.identity_userinfo_url.clone(),
    )?);
    info!("Identity provider: {}", config.identity_userinfo_url);

    let upload_retry = RetryPolicy::storage_upload();
    info!(
        "Resume uploads retry up to {} attempts",
        upload_retry.max_attempts()
    );

    let state = AppState {
        users: store.clone(),
        resumes: store.clone(),
        jobs: store,
        objects,
        identity,
        upload_retry,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the deployed front end

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
