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
use crate::listing::{Page, SortState};
use crate::models::{NewTheme, Theme, ThemePatch};
use crate::state::AppState;
use crate::themes::affinity::{match_reporters_for_theme, ReporterMatch};
use crate::themes::listing::{filter_and_sort_themes, ThemeListQuery, ThemeSortKey};

/// Reporters listed on a theme's detail view.
const DETAIL_REPORTER_MATCHES: usize = 5;

#[derive(Serialize)]
pub struct ThemeListResponse {
    #[serde(flatten)]
    pub page: Page<Theme>,
    pub sort: SortState<ThemeSortKey>,
}

#[derive(Serialize)]
pub struct ThemeDetail {
    #[serde(flatten)]
    pub theme: Theme,
    pub matched_reporters: Vec<ReporterMatch>,
}

/// GET /api/v1/themes
pub async fn handle_list_themes(
    State(state): State<AppState>,
    Query(query): Query<ThemeListQuery>,
) -> Result<Json<ThemeListResponse>, AppError> {
    let themes = state.store.list_themes().await?;
    let themes = filter_and_sort_themes(themes, &query);
    Ok(Json(ThemeListResponse {
        page: Page::paginate(themes, query.page, query.limit),
        sort: query.sort_state(),
    }))
}

/// POST /api/v1/themes
pub async fn handle_create_theme(
    State(state): State<AppState>,
    Json(req): Json<NewTheme>,
) -> Result<(StatusCode, Json<Theme>), AppError> {
    req.validate()?;
    if let Some(upload_id) = req.upload_id {
        if state.store.get_upload(upload_id).await?.is_none() {
            return Err(AppError::not_found("Upload", upload_id));
        }
    }
    let theme = req.into_theme(Utc::now());
    state.store.insert_theme(&theme).await?;
    info!("Created theme {} ({})", theme.id, theme.title);
    Ok((StatusCode::CREATED, Json(theme)))
}

/// GET /api/v1/themes/:id
pub async fn handle_get_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ThemeDetail>, AppError> {
    let theme = load_theme(&state, id).await?;
    let reporters = state.store.list_reporters().await?;
    let matched_reporters = match_reporters_for_theme(&theme, &reporters, DETAIL_REPORTER_MATCHES);
    Ok(Json(ThemeDetail {
        theme,
        matched_reporters,
    }))
}

/// PATCH /api/v1/themes/:id
pub async fn handle_update_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ThemePatch>,
) -> Result<Json<Theme>, AppError> {
    patch.validate()?;
    let mut theme = load_theme(&state, id).await?;
    patch.apply(&mut theme, Utc::now());
    if !state.store.update_theme(&theme).await? {
        return Err(AppError::not_found("Theme", id));
    }
    Ok(Json(theme))
}

/// DELETE /api/v1/themes/:id
pub async fn handle_delete_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_theme(id).await? {
        return Err(AppError::not_found("Theme", id));
    }
    info!("Deleted theme {id}");
    Ok(StatusCode::NO_CONTENT)
}

async fn load_theme(state: &AppState, id: Uuid) -> Result<Theme, AppError> {
    state
        .store
        .get_theme(id)
        .await?
        .ok_or_else(|| AppError::not_found("Theme", id))
}
