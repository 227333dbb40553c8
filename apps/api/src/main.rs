mod config;
mod dashboard;
mod db;
mod errors;
mod events;
mod listing;
mod llm_client;
mod models;
mod outreach;
mod reporters;
mod routes;
mod state;
mod store;
mod themes;
mod uploads;
mod validation;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, S3Config};
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reporter Desk API v{}", env!("CARGO_PKG_VERSION"));

    // Postgres when configured, otherwise the seeded demo store
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(create_pool(url).await?)),
        None => {
            info!("DATABASE_URL not set; using the seeded in-memory store");
            Arc::new(MemoryStore::seeded())
        }
    };

    let s3 = match &config.s3 {
        Some(s3_config) => {
            let client = build_s3_client(s3_config).await;
            info!("S3 client initialized (bucket: {})", s3_config.bucket);
            Some(client)
        }
        None => {
            info!("S3 not configured; uploads are kept as database records only");
            None
        }
    };

    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        store,
        llm,
        s3,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(s3_config: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &s3_config.access_key_id,
        &s3_config.secret_access_key,
        None,
        None,
        "reporter-desk-static",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&s3_config.endpoint)
        .load()
        .await;

    // MinIO serves buckets under the path, not as subdomains
    let config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(config)
}
