use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reporter::non_blank;
use crate::errors::AppError;
use crate::validation::{normalize_tags, optional_url, require_text};

const TITLE_MAX: usize = 200;

/// An article written by a reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: Option<String>,
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("title", &self.title, Some(TITLE_MAX))?;
        optional_url("url", self.url.as_deref())
    }

    pub fn into_article(self, reporter_id: Uuid, now: DateTime<Utc>) -> Article {
        Article {
            id: Uuid::new_v4(),
            reporter_id,
            title: self.title.trim().to_string(),
            content: non_blank(self.content),
            url: non_blank(self.url),
            published_at: self.published_at,
            tags: normalize_tags(self.tags),
            summary: non_blank(self.summary),
            created_at: now,
        }
    }
}
