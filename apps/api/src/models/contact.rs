use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text_enum;
use crate::errors::AppError;
use crate::validation::{require_text, sanitize_input};

const SUBJECT_MAX: usize = 200;

text_enum! {
    /// Channel used for an outreach attempt.
    pub enum ContactType {
        Email => "email",
        Phone => "phone",
        Meeting => "meeting",
        Other => "other",
    }
}

text_enum! {
    pub enum ContactOutcome {
        Successful => "successful",
        NoResponse => "no_response",
        Interested => "interested",
        NotInterested => "not_interested",
        FollowUpNeeded => "follow_up_needed",
    }
}

impl ContactOutcome {
    /// Outcomes counted towards the dashboard success rate.
    pub fn is_positive(&self) -> bool {
        matches!(self, ContactOutcome::Successful | ContactOutcome::Interested)
    }

    /// Outcomes that still expect a next action from PR staff.
    pub fn awaits_follow_up(&self) -> bool {
        matches!(
            self,
            ContactOutcome::FollowUpNeeded | ContactOutcome::Interested
        )
    }
}

/// One logged outreach attempt and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactHistory {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub subject: String,
    pub content: String,
    pub outcome: ContactOutcome,
    pub next_action_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub subject: String,
    pub content: String,
    pub outcome: ContactOutcome,
    pub next_action_date: Option<DateTime<Utc>>,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("subject", &self.subject, Some(SUBJECT_MAX))?;
        require_text("content", &self.content, None)?;
        if let Some(next) = self.next_action_date {
            if next < self.date {
                return Err(AppError::Validation(
                    "next_action_date must not be before the contact date".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn into_contact(self, reporter_id: Uuid, now: DateTime<Utc>) -> ContactHistory {
        ContactHistory {
            id: Uuid::new_v4(),
            reporter_id,
            date: self.date,
            contact_type: self.contact_type,
            subject: self.subject.trim().to_string(),
            content: sanitize_input(&self.content),
            outcome: self.outcome,
            next_action_date: self.next_action_date,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_contact() -> NewContact {
        NewContact {
            date: Utc::now(),
            contact_type: ContactType::Email,
            subject: "新フィンテックサービス「PayFast」のご紹介".to_string(),
            content: "この度、弊社では新しいフィンテックサービスをリリースいたします".to_string(),
            outcome: ContactOutcome::Interested,
            next_action_date: None,
        }
    }

    #[test]
    fn test_contact_requires_content() {
        let mut c = new_contact();
        c.content = " ".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_next_action_cannot_precede_contact() {
        let mut c = new_contact();
        c.next_action_date = Some(c.date - Duration::days(1));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_type_field_uses_wire_name() {
        let json = serde_json::json!({
            "date": "2024-06-01T00:00:00Z",
            "type": "meeting",
            "subject": "AIチャットボットサービスの取材について",
            "content": "デモンストレーションを実施",
            "outcome": "successful"
        });
        let c: NewContact = serde_json::from_value(json).unwrap();
        assert_eq!(c.contact_type, ContactType::Meeting);
        assert!(c.outcome.is_positive());
    }

    #[test]
    fn test_follow_up_outcomes() {
        assert!(ContactOutcome::FollowUpNeeded.awaits_follow_up());
        assert!(!ContactOutcome::NoResponse.awaits_follow_up());
    }
}
