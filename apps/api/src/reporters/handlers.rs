use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::listing::{Page, SortState};
use crate::models::{
    Article, ContactHistory, NewArticle, NewContact, NewReporter, Reporter, ReporterPatch,
};
use crate::reporters::listing::{
    companies, filter_and_sort_reporters, summarize, ReporterListQuery, ReporterSortKey,
    ReporterSummary,
};
use crate::state::AppState;
use crate::themes::affinity::{match_themes_for_reporter, ThemeMatch, DEFAULT_TOP_N};

#[derive(Serialize)]
pub struct ReporterListResponse {
    #[serde(flatten)]
    pub page: Page<ReporterSummary>,
    pub sort: SortState<ReporterSortKey>,
    pub companies: Vec<String>,
}

#[derive(Serialize)]
pub struct ReporterDetail {
    pub reporter: Reporter,
    pub articles: Vec<Article>,
    pub contacts: Vec<ContactHistory>,
    pub matched_themes: Vec<ThemeMatch>,
}

#[derive(Deserialize)]
pub struct ThemeMatchQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/reporters
pub async fn handle_list_reporters(
    State(state): State<AppState>,
    Query(query): Query<ReporterListQuery>,
) -> Result<Json<ReporterListResponse>, AppError> {
    let reporters = state.store.list_reporters().await?;
    let articles = state.store.list_articles(None).await?;
    let contacts = state.store.list_contacts(None).await?;

    let companies = companies(&reporters);
    let rows = summarize(reporters, &articles, &contacts);
    let rows = filter_and_sort_reporters(rows, &query);
    Ok(Json(ReporterListResponse {
        page: Page::paginate(rows, query.page, query.limit),
        sort: query.sort_state(),
        companies,
    }))
}

/// GET /api/v1/reporters/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let reporters = state.store.list_reporters().await?;
    Ok(Json(companies(&reporters)))
}

/// POST /api/v1/reporters
pub async fn handle_create_reporter(
    State(state): State<AppState>,
    Json(req): Json<NewReporter>,
) -> Result<(StatusCode, Json<Reporter>), AppError> {
    req.validate()?;
    let reporter = req.into_reporter(Utc::now());
    state.store.insert_reporter(&reporter).await?;
    info!("Created reporter {} ({})", reporter.id, reporter.company);
    Ok((StatusCode::CREATED, Json(reporter)))
}

/// GET /api/v1/reporters/:id
pub async fn handle_get_reporter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReporterDetail>, AppError> {
    let reporter = load_reporter(&state, id).await?;
    let articles = newest_articles_first(state.store.list_articles(Some(id)).await?);
    let contacts = newest_contacts_first(state.store.list_contacts(Some(id)).await?);
    let themes = state.store.list_themes().await?;
    let matched_themes = match_themes_for_reporter(&reporter, &themes, DEFAULT_TOP_N);

    Ok(Json(ReporterDetail {
        reporter,
        articles,
        contacts,
        matched_themes,
    }))
}

/// PATCH /api/v1/reporters/:id
pub async fn handle_update_reporter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ReporterPatch>,
) -> Result<Json<Reporter>, AppError> {
    patch.validate()?;
    let mut reporter = load_reporter(&state, id).await?;
    patch.apply(&mut reporter, Utc::now());
    if !state.store.update_reporter(&reporter).await? {
        return Err(AppError::not_found("Reporter", id));
    }
    Ok(Json(reporter))
}

/// DELETE /api/v1/reporters/:id
/// Also removes the reporter's articles, contact log and event participations.
pub async fn handle_delete_reporter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_reporter(id).await? {
        return Err(AppError::not_found("Reporter", id));
    }
    info!("Deleted reporter {id}");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Articles and contact history
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/reporters/:id/articles
pub async fn handle_list_articles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Article>>, AppError> {
    load_reporter(&state, id).await?;
    let articles = state.store.list_articles(Some(id)).await?;
    Ok(Json(newest_articles_first(articles)))
}

/// POST /api/v1/reporters/:id/articles
pub async fn handle_create_article(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewArticle>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    req.validate()?;
    load_reporter(&state, id).await?;
    let article = req.into_article(id, Utc::now());
    state.store.insert_article(&article).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/v1/reporters/:id/contacts
pub async fn handle_list_reporter_contacts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ContactHistory>>, AppError> {
    load_reporter(&state, id).await?;
    let contacts = state.store.list_contacts(Some(id)).await?;
    Ok(Json(newest_contacts_first(contacts)))
}

/// POST /api/v1/reporters/:id/contacts
pub async fn handle_create_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewContact>,
) -> Result<(StatusCode, Json<ContactHistory>), AppError> {
    req.validate()?;
    load_reporter(&state, id).await?;
    let contact = req.into_contact(id, Utc::now());
    state.store.insert_contact(&contact).await?;
    info!(
        "Logged {} contact with reporter {id}: {}",
        contact.contact_type, contact.outcome
    );
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/v1/contacts
pub async fn handle_list_all_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactHistory>>, AppError> {
    let contacts = state.store.list_contacts(None).await?;
    Ok(Json(newest_contacts_first(contacts)))
}

/// GET /api/v1/reporters/:id/theme-matches
pub async fn handle_theme_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ThemeMatchQuery>,
) -> Result<Json<Vec<ThemeMatch>>, AppError> {
    let reporter = load_reporter(&state, id).await?;
    let themes = state.store.list_themes().await?;
    let top_n = query.limit.unwrap_or(DEFAULT_TOP_N);
    Ok(Json(match_themes_for_reporter(&reporter, &themes, top_n)))
}

pub(crate) async fn load_reporter(state: &AppState, id: Uuid) -> Result<Reporter, AppError> {
    state
        .store
        .get_reporter(id)
        .await?
        .ok_or_else(|| AppError::not_found("Reporter", id))
}

fn newest_articles_first(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles
}

fn newest_contacts_first(mut contacts: Vec<ContactHistory>) -> Vec<ContactHistory> {
    contacts.sort_by(|a, b| b.date.cmp(&a.date));
    contacts
}
