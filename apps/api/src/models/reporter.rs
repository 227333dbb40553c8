use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::text_enum;
use crate::errors::AppError;
use crate::validation::{
    normalize_tags, optional_phone, require_email, require_text, sanitize_input,
};

const NAME_MAX: usize = 100;
const COMPANY_MAX: usize = 100;

text_enum! {
    /// How the reporter prefers to be reached.
    #[derive(Default)]
    pub enum ContactPreference {
        #[default]
        Email => "email",
        Phone => "phone",
        Both => "both",
    }
}

/// A journalist contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reporter {
    pub id: Uuid,
    pub name: String,
    /// Outlet the reporter writes for.
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub interests: Vec<String>,
    pub specialties: Vec<String>,
    pub contact_preference: ContactPreference,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reporter {
    /// Interests followed by specialties, the word list used for theme affinity.
    pub fn interest_words(&self) -> impl Iterator<Item = &str> {
        self.interests
            .iter()
            .chain(self.specialties.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReporter {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub contact_preference: ContactPreference,
    pub notes: Option<String>,
}

impl NewReporter {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, Some(NAME_MAX))?;
        require_text("company", &self.company, Some(COMPANY_MAX))?;
        require_email("email", &self.email)?;
        optional_phone("phone", self.phone.as_deref())
    }

    pub fn into_reporter(self, now: DateTime<Utc>) -> Reporter {
        Reporter {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            position: non_blank(self.position),
            interests: normalize_tags(self.interests),
            specialties: normalize_tags(self.specialties),
            contact_preference: self.contact_preference,
            notes: non_blank(self.notes.map(|n| sanitize_input(&n))),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; only the fields present in the request body change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReporterPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub interests: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    pub contact_preference: Option<ContactPreference>,
    pub notes: Option<String>,
}

impl ReporterPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            require_text("name", name, Some(NAME_MAX))?;
        }
        if let Some(company) = &self.company {
            require_text("company", company, Some(COMPANY_MAX))?;
        }
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        optional_phone("phone", self.phone.as_deref())
    }

    pub fn apply(self, reporter: &mut Reporter, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            reporter.name = name.trim().to_string();
        }
        if let Some(company) = self.company {
            reporter.company = company.trim().to_string();
        }
        if let Some(email) = self.email {
            reporter.email = email.trim().to_string();
        }
        if self.phone.is_some() {
            reporter.phone = non_blank(self.phone);
        }
        if self.position.is_some() {
            reporter.position = non_blank(self.position);
        }
        if let Some(interests) = self.interests {
            reporter.interests = normalize_tags(interests);
        }
        if let Some(specialties) = self.specialties {
            reporter.specialties = normalize_tags(specialties);
        }
        if let Some(pref) = self.contact_preference {
            reporter.contact_preference = pref;
        }
        if let Some(notes) = self.notes {
            reporter.notes = non_blank(Some(sanitize_input(&notes)));
        }
        reporter.updated_at = now;
    }
}

/// Empty strings from HTML forms are treated as "not provided".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_reporter() -> NewReporter {
        NewReporter {
            name: " 田中 太郎 ".to_string(),
            company: "日本経済新聞".to_string(),
            email: "tanaka@nikkei.com".to_string(),
            phone: Some("03-1234-5678".to_string()),
            position: Some("".to_string()),
            interests: vec!["フィンテック".to_string(), "DX".to_string()],
            specialties: vec!["金融".to_string()],
            contact_preference: ContactPreference::Email,
            notes: Some("<b>返信は早い</b>".to_string()),
        }
    }

    #[test]
    fn test_new_reporter_validates() {
        assert!(new_reporter().validate().is_ok());
    }

    #[test]
    fn test_new_reporter_rejects_bad_email() {
        let mut r = new_reporter();
        r.email = "not-an-email".to_string();
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_into_reporter_normalizes_fields() {
        let now = Utc::now();
        let reporter = new_reporter().into_reporter(now);
        assert_eq!(reporter.name, "田中 太郎");
        assert!(reporter.position.is_none());
        assert_eq!(reporter.notes.as_deref(), Some("b返信は早い/b"));
        assert_eq!(reporter.created_at, now);
        assert_eq!(reporter.updated_at, now);
    }

    #[test]
    fn test_interest_words_chain_interests_then_specialties() {
        let reporter = new_reporter().into_reporter(Utc::now());
        let words: Vec<&str> = reporter.interest_words().collect();
        assert_eq!(words, vec!["フィンテック", "DX", "金融"]);
    }

    #[test]
    fn test_patch_only_touches_provided_fields() {
        let created = Utc::now();
        let mut reporter = new_reporter().into_reporter(created);
        let later = created + chrono::Duration::minutes(5);
        let patch = ReporterPatch {
            company: Some("TechCrunch Japan".to_string()),
            ..Default::default()
        };
        patch.apply(&mut reporter, later);
        assert_eq!(reporter.company, "TechCrunch Japan");
        assert_eq!(reporter.name, "田中 太郎");
        assert_eq!(reporter.updated_at, later);
        assert_eq!(reporter.created_at, created);
    }

    #[test]
    fn test_contact_preference_defaults_to_email() {
        let json = serde_json::json!({
            "name": "佐藤 花子",
            "company": "TechCrunch Japan",
            "email": "sato@techcrunch.jp"
        });
        let r: NewReporter = serde_json::from_value(json).unwrap();
        assert_eq!(r.contact_preference, ContactPreference::Email);
        assert!(r.interests.is_empty());
    }
}
