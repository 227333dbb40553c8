use anyhow::{bail, Context, Result};

/// S3 / MinIO settings for storing uploaded theme source documents.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs the service on the seeded in-memory store.
    pub database_url: Option<String>,
    pub s3: Option<S3Config>,
    pub openai_api_key: String,
    pub upload_max_mb: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            s3: s3_from_env()?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            upload_max_mb: optional_env("UPLOAD_MAX_MB")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("UPLOAD_MAX_MB must be a whole number of megabytes")?
                .unwrap_or(10),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn upload_max_bytes(&self) -> u64 {
        self.upload_max_mb * 1024 * 1024
    }
}

/// All four S3 variables or none of them.
fn s3_from_env() -> Result<Option<S3Config>> {
    let vars = [
        optional_env("S3_BUCKET"),
        optional_env("S3_ENDPOINT"),
        optional_env("AWS_ACCESS_KEY_ID"),
        optional_env("AWS_SECRET_ACCESS_KEY"),
    ];
    match vars {
        [Some(bucket), Some(endpoint), Some(access_key_id), Some(secret_access_key)] => {
            Ok(Some(S3Config {
                bucket,
                endpoint,
                access_key_id,
                secret_access_key,
            }))
        }
        [None, None, None, None] => Ok(None),
        _ => bail!(
            "S3 is partially configured: set all of S3_BUCKET, S3_ENDPOINT, \
             AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY, or none of them"
        ),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    /// Config used by router tests: in-memory store, no S3, 1 MB uploads.
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            s3: None,
            openai_api_key: "test-key".to_string(),
            upload_max_mb: 1,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
