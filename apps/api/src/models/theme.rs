use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reporter::non_blank;
use super::text_enum;
use crate::errors::AppError;
use crate::validation::{normalize_tags, optional_url, require_text};

const TITLE_MAX: usize = 100;

text_enum! {
    #[derive(Default)]
    pub enum Priority {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
    }
}

impl Priority {
    /// Ordering weight: low < medium < high.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

/// A pitch topic, either seeded or created by PR staff (possibly from an upload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub category: Option<String>,
    pub priority: Priority,
    pub source_url: Option<String>,
    pub upload_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTheme {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub source_url: Option<String>,
    pub upload_id: Option<Uuid>,
}

impl NewTheme {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("title", &self.title, Some(TITLE_MAX))?;
        require_text("description", &self.description, None)?;
        optional_url("source_url", self.source_url.as_deref())
    }

    pub fn into_theme(self, now: DateTime<Utc>) -> Theme {
        Theme {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            keywords: normalize_tags(self.keywords),
            category: non_blank(self.category),
            priority: self.priority,
            source_url: non_blank(self.source_url),
            upload_id: self.upload_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub source_url: Option<String>,
}

impl ThemePatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            require_text("title", title, Some(TITLE_MAX))?;
        }
        if let Some(description) = &self.description {
            require_text("description", description, None)?;
        }
        optional_url("source_url", self.source_url.as_deref())
    }

    pub fn apply(self, theme: &mut Theme, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            theme.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            theme.description = description.trim().to_string();
        }
        if let Some(keywords) = self.keywords {
            theme.keywords = normalize_tags(keywords);
        }
        if self.category.is_some() {
            theme.category = non_blank(self.category);
        }
        if let Some(priority) = self.priority {
            theme.priority = priority;
        }
        if self.source_url.is_some() {
            theme.source_url = non_blank(self.source_url);
        }
        theme.updated_at = now;
    }
}
