use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::events::listing::{
    exposure_rate, filter_and_sort_events, filter_options, summarize, EventFilterOptions,
    EventListQuery, EventSortKey, EventSummary,
};
use crate::listing::{Page, SortState};
use crate::models::{Event, EventParticipant, EventPatch, NewEvent, NewParticipant};
use crate::state::AppState;

#[derive(Serialize)]
pub struct EventListResponse {
    #[serde(flatten)]
    pub page: Page<EventSummary>,
    pub sort: SortState<EventSortKey>,
    pub filters: EventFilterOptions,
}

/// A participant row joined with the reporter's name and outlet.
#[derive(Serialize)]
pub struct ParticipantView {
    #[serde(flatten)]
    pub participant: EventParticipant,
    pub reporter_name: Option<String>,
    pub reporter_company: Option<String>,
}

#[derive(Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub summary: EventSummary,
    pub participants: Vec<ParticipantView>,
    pub exposure_rate: u32,
}

/// GET /api/v1/events
pub async fn handle_list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = state.store.list_events().await?;
    let participants = state.store.list_participants(None).await?;

    let filters = filter_options(&events);
    let rows = filter_and_sort_events(summarize(events, &participants), &query);
    Ok(Json(EventListResponse {
        page: Page::paginate(rows, query.page, query.limit),
        sort: query.sort_state(),
        filters,
    }))
}

/// POST /api/v1/events
pub async fn handle_create_event(
    State(state): State<AppState>,
    Json(req): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    req.validate()?;
    let event = req.into_event(Utc::now());
    state.store.insert_event(&event).await?;
    info!("Created event {} ({})", event.id, event.title);
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events/:id
pub async fn handle_get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDetail>, AppError> {
    let event = load_event(&state, id).await?;
    let participants = state.store.list_participants(Some(id)).await?;
    let views = participant_views(&state, participants.clone()).await?;

    let summary = summarize(vec![event], &participants)
        .pop()
        .ok_or_else(|| AppError::not_found("Event", id))?;
    let rate = exposure_rate(summary.participant_count, summary.exposure_count);
    Ok(Json(EventDetail {
        summary,
        participants: views,
        exposure_rate: rate,
    }))
}

/// PATCH /api/v1/events/:id
pub async fn handle_update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, AppError> {
    patch.validate()?;
    let mut event = load_event(&state, id).await?;
    patch.apply(&mut event, Utc::now());
    if !state.store.update_event(&event).await? {
        return Err(AppError::not_found("Event", id));
    }
    Ok(Json(event))
}

/// DELETE /api/v1/events/:id
pub async fn handle_delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_event(id).await? {
        return Err(AppError::not_found("Event", id));
    }
    info!("Deleted event {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Participants
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/events/:id/participants
pub async fn handle_list_participants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ParticipantView>>, AppError> {
    load_event(&state, id).await?;
    let participants = state.store.list_participants(Some(id)).await?;
    Ok(Json(participant_views(&state, participants).await?))
}

/// POST /api/v1/events/:id/participants
pub async fn handle_add_participant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewParticipant>,
) -> Result<(StatusCode, Json<EventParticipant>), AppError> {
    req.validate()?;
    load_event(&state, id).await?;
    if state.store.get_reporter(req.reporter_id).await?.is_none() {
        return Err(AppError::not_found("Reporter", req.reporter_id));
    }

    let participant = req.into_participant(id, Utc::now());
    if !state.store.insert_participant(&participant).await? {
        return Err(AppError::Validation(format!(
            "reporter {} already participates in event {id}",
            participant.reporter_id
        )));
    }
    info!(
        "Added reporter {} to event {id} ({})",
        participant.reporter_id, participant.exposure_status
    );
    Ok((StatusCode::CREATED, Json(participant)))
}

/// DELETE /api/v1/events/:id/participants/:participant_id
pub async fn handle_remove_participant(
    State(state): State<AppState>,
    Path((id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_participant(id, participant_id).await? {
        return Err(AppError::not_found("Participant", participant_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn load_event(state: &AppState, id: Uuid) -> Result<Event, AppError> {
    state
        .store
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))
}

async fn participant_views(
    state: &AppState,
    participants: Vec<EventParticipant>,
) -> Result<Vec<ParticipantView>, AppError> {
    let reporters: HashMap<Uuid, (String, String)> = state
        .store
        .list_reporters()
        .await?
        .into_iter()
        .map(|r| (r.id, (r.name, r.company)))
        .collect();

    Ok(participants
        .into_iter()
        .map(|participant| {
            let reporter = reporters.get(&participant.reporter_id);
            ParticipantView {
                reporter_name: reporter.map(|(name, _)| name.clone()),
                reporter_company: reporter.map(|(_, company)| company.clone()),
                participant,
            }
        })
        .collect())
}
