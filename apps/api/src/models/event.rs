use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reporter::non_blank;
use super::text_enum;
use crate::errors::AppError;
use crate::validation::{normalize_tags, optional_url, require_text, sanitize_input};

const TITLE_MAX: usize = 200;

text_enum! {
    #[derive(Default)]
    pub enum EventStatus {
        #[default]
        Planned => "planned",
        Ongoing => "ongoing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    #[derive(Default)]
    pub enum EventType {
        Conference => "conference",
        Seminar => "seminar",
        Workshop => "workshop",
        PressEvent => "press_event",
        #[default]
        Other => "other",
    }
}

text_enum! {
    /// Coverage outcome for a reporter who attended an event.
    #[derive(Default)]
    pub enum ExposureStatus {
        Published => "published",
        Planned => "planned",
        Declined => "declined",
        #[default]
        Pending => "pending",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub status: EventStatus,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, rename = "type")]
    pub event_type: EventType,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("title", &self.title, Some(TITLE_MAX))
    }

    pub fn into_event(self, now: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            event_date: self.event_date,
            location: non_blank(self.location),
            tags: normalize_tags(self.tags),
            status: self.status,
            event_type: self.event_type,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<EventStatus>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
}

impl EventPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            Some(title) => require_text("title", title, Some(TITLE_MAX)),
            None => Ok(()),
        }
    }

    pub fn apply(self, event: &mut Event, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            event.description = description.trim().to_string();
        }
        if let Some(date) = self.event_date {
            event.event_date = date;
        }
        if self.location.is_some() {
            event.location = non_blank(self.location);
        }
        if let Some(tags) = self.tags {
            event.tags = normalize_tags(tags);
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        event.updated_at = now;
    }
}

/// A reporter's attendance at an event and the resulting coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventParticipant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub reporter_id: Uuid,
    pub exposure_status: ExposureStatus,
    pub article_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EventParticipant {
    pub fn is_exposure(&self) -> bool {
        self.exposure_status == ExposureStatus::Published
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewParticipant {
    pub reporter_id: Uuid,
    #[serde(default)]
    pub exposure_status: ExposureStatus,
    pub article_url: Option<String>,
    pub notes: Option<String>,
}

impl NewParticipant {
    pub fn validate(&self) -> Result<(), AppError> {
        optional_url("article_url", self.article_url.as_deref())
    }

    pub fn into_participant(self, event_id: Uuid, now: DateTime<Utc>) -> EventParticipant {
        EventParticipant {
            id: Uuid::new_v4(),
            event_id,
            reporter_id: self.reporter_id,
            exposure_status: self.exposure_status,
            article_url: non_blank(self.article_url),
            notes: non_blank(self.notes.map(|n| sanitize_input(&n))),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_defaults() {
        let json = serde_json::json!({
            "title": "サステナビリティ経営セミナー",
            "event_date": "2024-10-05T00:00:00Z"
        });
        let event: NewEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.status, EventStatus::Planned);
        assert_eq!(event.event_type, EventType::Other);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_event_type_serializes_as_type() {
        let event = NewEvent {
            title: "AI & Tech Summit 2024".to_string(),
            description: String::new(),
            event_date: Utc::now(),
            location: None,
            tags: vec![],
            status: EventStatus::Completed,
            event_type: EventType::PressEvent,
        }
        .into_event(Utc::now());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "press_event");
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_only_published_counts_as_exposure() {
        let mut participant = NewParticipant {
            reporter_id: Uuid::new_v4(),
            exposure_status: ExposureStatus::Planned,
            article_url: None,
            notes: None,
        }
        .into_participant(Uuid::new_v4(), Utc::now());
        assert!(!participant.is_exposure());
        participant.exposure_status = ExposureStatus::Published;
        assert!(participant.is_exposure());
    }
}
