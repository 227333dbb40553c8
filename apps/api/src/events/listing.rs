use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{matches_search, SortDirection, SortState};
use crate::models::{Event, EventParticipant, EventStatus, EventType};

/// An event with its participation counters.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub participant_count: usize,
    pub exposure_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSortKey {
    #[default]
    EventDate,
    Title,
    Type,
    ParticipantCount,
    ExposureCount,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub sort: EventSortKey,
    pub direction: Option<SortDirection>,
    pub toggle: Option<EventSortKey>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl EventListQuery {
    pub fn sort_state(&self) -> SortState<EventSortKey> {
        let direction = self.direction.unwrap_or(match self.sort {
            EventSortKey::EventDate => SortDirection::Desc,
            _ => SortDirection::Asc,
        });
        SortState::resolve(self.sort, direction, self.toggle)
    }
}

pub fn summarize(events: Vec<Event>, participants: &[EventParticipant]) -> Vec<EventSummary> {
    let mut counts: HashMap<Uuid, (usize, usize)> = HashMap::new();
    for p in participants {
        let entry = counts.entry(p.event_id).or_default();
        entry.0 += 1;
        if p.is_exposure() {
            entry.1 += 1;
        }
    }
    events
        .into_iter()
        .map(|event| {
            let (participant_count, exposure_count) =
                counts.get(&event.id).copied().unwrap_or_default();
            EventSummary {
                event,
                participant_count,
                exposure_count,
            }
        })
        .collect()
}

pub fn filter_and_sort_events(
    mut rows: Vec<EventSummary>,
    query: &EventListQuery,
) -> Vec<EventSummary> {
    rows.retain(|row| {
        let e = &row.event;
        query.event_type.map_or(true, |t| e.event_type == t)
            && query.status.map_or(true, |s| e.status == s)
            && matches_search(
                query.search.as_deref(),
                [e.title.as_str(), e.description.as_str()]
                    .into_iter()
                    .chain(e.tags.iter().map(String::as_str)),
            )
    });

    let SortState { sort, direction } = query.sort_state();
    rows.sort_by(|a, b| {
        let ordering = match sort {
            EventSortKey::EventDate => a.event.event_date.cmp(&b.event.event_date),
            EventSortKey::Title => a.event.title.cmp(&b.event.title),
            EventSortKey::Type => a.event.event_type.as_str().cmp(b.event.event_type.as_str()),
            EventSortKey::ParticipantCount => a.participant_count.cmp(&b.participant_count),
            EventSortKey::ExposureCount => a.exposure_count.cmp(&b.exposure_count),
        };
        direction.apply(ordering)
    });
    rows
}

/// Distinct types and statuses present in `events`, sorted by wire name, for
/// the filter dropdowns.
#[derive(Debug, Clone, Serialize)]
pub struct EventFilterOptions {
    pub types: Vec<EventType>,
    pub statuses: Vec<EventStatus>,
}

pub fn filter_options(events: &[Event]) -> EventFilterOptions {
    let types: BTreeMap<&'static str, EventType> = events
        .iter()
        .map(|e| (e.event_type.as_str(), e.event_type))
        .collect();
    let statuses: BTreeMap<&'static str, EventStatus> =
        events.iter().map(|e| (e.status.as_str(), e.status)).collect();
    EventFilterOptions {
        types: types.into_values().collect(),
        statuses: statuses.into_values().collect(),
    }
}

/// Share of participants whose coverage was published, as a whole percentage.
pub fn exposure_rate(participant_count: usize, exposure_count: usize) -> u32 {
    if participant_count == 0 {
        return 0;
    }
    (exposure_count as f64 * 100.0 / participant_count as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::SeedData;

    fn seeded_rows() -> Vec<EventSummary> {
        let seed = SeedData::build();
        summarize(seed.events, &seed.participants)
    }

    #[test]
    fn test_summary_counts_participants_and_exposures() {
        let rows = seeded_rows();
        let summit = rows
            .iter()
            .find(|r| r.event.title == "AI & Tech Summit 2024")
            .unwrap();
        assert_eq!(summit.participant_count, 2);
        assert_eq!(summit.exposure_count, 2);
    }

    #[test]
    fn test_default_sort_is_newest_event_first() {
        let rows = filter_and_sort_events(seeded_rows(), &EventListQuery::default());
        for pair in rows.windows(2) {
            assert!(pair[0].event.event_date >= pair[1].event.event_date);
        }
    }

    #[test]
    fn test_filter_by_type_and_status() {
        let query = EventListQuery {
            event_type: Some(EventType::Seminar),
            status: Some(EventStatus::Planned),
            ..Default::default()
        };
        let rows = filter_and_sort_events(seeded_rows(), &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event.title, "サステナビリティ経営セミナー");
    }

    #[test]
    fn test_search_covers_tags() {
        let query = EventListQuery {
            search: Some("勉強会".to_string()),
            ..Default::default()
        };
        let rows = filter_and_sort_events(seeded_rows(), &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event.event_type, EventType::Seminar);
    }

    #[test]
    fn test_type_query_param_uses_wire_name() {
        let json = serde_json::json!({"type": "press_event", "sort": "exposure_count"});
        let query: EventListQuery = serde_json::from_value(json).unwrap();
        assert_eq!(query.event_type, Some(EventType::PressEvent));
        assert_eq!(query.sort, EventSortKey::ExposureCount);
    }

    #[test]
    fn test_filter_options_are_distinct_and_sorted() {
        let options = filter_options(&SeedData::build().events);
        assert_eq!(options.types, vec![EventType::Conference, EventType::Seminar]);
        assert_eq!(
            options.statuses,
            vec![EventStatus::Completed, EventStatus::Planned]
        );

        let mut events = SeedData::build().events;
        events[0].event_type = EventType::Seminar;
        events[1].event_type = EventType::Other;
        events[2].event_type = EventType::Seminar;
        let options = filter_options(&events);
        assert_eq!(options.types, vec![EventType::Other, EventType::Seminar]);
    }

    #[test]
    fn test_toggle_flips_default_event_date_direction() {
        let query = EventListQuery {
            toggle: Some(EventSortKey::EventDate),
            ..Default::default()
        };
        let rows = filter_and_sort_events(seeded_rows(), &query);
        for pair in rows.windows(2) {
            assert!(pair[0].event.event_date <= pair[1].event.event_date);
        }
    }

    #[test]
    fn test_exposure_rate() {
        assert_eq!(exposure_rate(0, 0), 0);
        assert_eq!(exposure_rate(3, 2), 67);
        assert_eq!(exposure_rate(2, 2), 100);
    }
}
