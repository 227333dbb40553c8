use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document uploaded as source material for a theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub id: Uuid,
    /// Sanitised name the file is stored under.
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    /// Object-storage URL; absent when no storage backend is configured.
    pub url: Option<String>,
    pub extracted_text: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
