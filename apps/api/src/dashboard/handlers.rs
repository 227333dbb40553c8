use axum::{extract::State, Json};
use chrono::Utc;

use crate::dashboard::stats::{compute_dashboard, DashboardStats};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let reporters = state.store.list_reporters().await?;
    let contacts = state.store.list_contacts(None).await?;
    let themes = state.store.list_themes().await?;
    let events = state.store.list_events().await?;

    Ok(Json(compute_dashboard(
        &reporters,
        &contacts,
        &themes,
        &events,
        Utc::now(),
    )))
}
