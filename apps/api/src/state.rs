use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres or the seeded in-memory store, chosen at startup.
    pub store: Arc<dyn Store>,
    pub llm: LlmClient,
    /// Present only when all S3 settings are configured.
    pub s3: Option<S3Client>,
    pub config: Config,
}
