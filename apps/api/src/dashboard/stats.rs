//! Dashboard figures, computed in one pass over the full record set.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ContactHistory, Event, EventStatus, Reporter, Theme};

const RECENT_CONTACT_DAYS: i64 = 30;
const FOLLOW_UP_WINDOW_DAYS: i64 = 7;
const UPCOMING_EVENT_LIMIT: usize = 5;
const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Contact,
    Event,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub id: Uuid,
    pub title: String,
    /// Contact outcome or event status.
    pub detail: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUp {
    pub contact_id: Uuid,
    pub reporter_id: Uuid,
    pub reporter_name: Option<String>,
    pub subject: String,
    pub next_action_date: DateTime<Utc>,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_reporters: usize,
    pub total_events: usize,
    pub total_themes: usize,
    pub total_contacts: usize,
    pub recent_contacts: usize,
    /// Percentage of contacts that ended `successful` or `interested`.
    pub success_rate: u32,
    pub upcoming_events: Vec<Event>,
    pub follow_ups_due: Vec<FollowUp>,
    pub recent_activity: Vec<ActivityItem>,
}

pub fn compute_dashboard(
    reporters: &[Reporter],
    contacts: &[ContactHistory],
    themes: &[Theme],
    events: &[Event],
    now: DateTime<Utc>,
) -> DashboardStats {
    let recent_cutoff = now - Duration::days(RECENT_CONTACT_DAYS);
    let recent_contacts = contacts.iter().filter(|c| c.date >= recent_cutoff).count();

    let positive = contacts.iter().filter(|c| c.outcome.is_positive()).count();
    let success_rate = if contacts.is_empty() {
        0
    } else {
        (positive as f64 * 100.0 / contacts.len() as f64).round() as u32
    };

    let mut upcoming_events: Vec<Event> = events
        .iter()
        .filter(|e| e.status == EventStatus::Planned && e.event_date >= now)
        .cloned()
        .collect();
    upcoming_events.sort_by_key(|e| e.event_date);
    upcoming_events.truncate(UPCOMING_EVENT_LIMIT);

    let follow_up_horizon = now + Duration::days(FOLLOW_UP_WINDOW_DAYS);
    let mut follow_ups_due: Vec<FollowUp> = contacts
        .iter()
        .filter(|c| c.outcome.awaits_follow_up())
        .filter_map(|c| {
            let due = c.next_action_date.filter(|d| *d <= follow_up_horizon)?;
            Some(FollowUp {
                contact_id: c.id,
                reporter_id: c.reporter_id,
                reporter_name: reporters
                    .iter()
                    .find(|r| r.id == c.reporter_id)
                    .map(|r| r.name.clone()),
                subject: c.subject.clone(),
                next_action_date: due,
                overdue: due < now,
            })
        })
        .collect();
    follow_ups_due.sort_by_key(|f| f.next_action_date);

    let mut recent_activity: Vec<ActivityItem> = contacts
        .iter()
        .map(|c| ActivityItem {
            kind: ActivityKind::Contact,
            id: c.id,
            title: c.subject.clone(),
            detail: c.outcome.to_string(),
            date: c.date,
        })
        .chain(events.iter().map(|e| ActivityItem {
            kind: ActivityKind::Event,
            id: e.id,
            title: e.title.clone(),
            detail: e.status.to_string(),
            date: e.event_date,
        }))
        .collect();
    recent_activity.sort_by(|a, b| b.date.cmp(&a.date));
    recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

    DashboardStats {
        total_reporters: reporters.len(),
        total_events: events.len(),
        total_themes: themes.len(),
        total_contacts: contacts.len(),
        recent_contacts,
        success_rate,
        upcoming_events,
        follow_ups_due,
        recent_activity,
    }
}
