use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Article, Reporter, Theme};
use crate::outreach::service::{
    analyze_reporter, generate_pitch, match_content, ContentMatchReport, PitchMessage,
    PitchRequest, Purpose, ReporterAnalysis, Tone,
};
use crate::reporters::handlers::load_reporter;
use crate::state::AppState;
use crate::themes::affinity::{affinity_score, match_themes_for_reporter};
use crate::validation::sanitize_input;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub reporter_id: Uuid,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub reporter_id: Uuid,
    pub analysis: ReporterAnalysis,
}

#[derive(Deserialize)]
pub struct MessageRequest {
    pub reporter_id: Uuid,
    pub theme_id: Option<Uuid>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub purpose: Purpose,
    pub additional_context: Option<String>,
    pub communication_style: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: PitchMessage,
    /// Theme the pitch was written for; chosen by affinity when not given.
    pub theme: Option<Theme>,
    pub affinity_score: Option<u32>,
}

#[derive(Deserialize)]
pub struct MatchContentRequest {
    pub text: Option<String>,
    pub upload_id: Option<Uuid>,
}

/// POST /api/v1/outreach/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let reporter = load_reporter(&state, req.reporter_id).await?;
    let mut articles = state.store.list_articles(Some(reporter.id)).await?;
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let analysis = analyze_reporter(&state.llm, &reporter, &articles).await?;
    Ok(Json(AnalyzeResponse {
        reporter_id: reporter.id,
        analysis,
    }))
}

/// POST /api/v1/outreach/messages
pub async fn handle_generate_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let reporter = load_reporter(&state, req.reporter_id).await?;

    let theme = match req.theme_id {
        Some(theme_id) => Some(
            state
                .store
                .get_theme(theme_id)
                .await?
                .ok_or_else(|| AppError::not_found("Theme", theme_id))?,
        ),
        None => {
            let themes = state.store.list_themes().await?;
            match_themes_for_reporter(&reporter, &themes, 1)
                .into_iter()
                .next()
                .map(|m| m.theme)
        }
    };

    let additional_context = req
        .additional_context
        .as_deref()
        .map(sanitize_input)
        .filter(|c| !c.is_empty());

    let message = generate_pitch(
        &state.llm,
        &PitchRequest {
            reporter: &reporter,
            theme: theme.as_ref(),
            tone: req.tone,
            purpose: req.purpose,
            communication_style: req.communication_style.as_deref(),
            additional_context: additional_context.as_deref(),
        },
    )
    .await?;

    let affinity = theme.as_ref().map(|t| affinity_score(&reporter, t));
    Ok(Json(MessageResponse {
        message,
        theme,
        affinity_score: affinity,
    }))
}

/// POST /api/v1/outreach/match-content
/// Accepts either raw `text` or the id of an upload whose text was extracted.
pub async fn handle_match_content(
    State(state): State<AppState>,
    Json(req): Json<MatchContentRequest>,
) -> Result<Json<ContentMatchReport>, AppError> {
    let text = match (req.text, req.upload_id) {
        (Some(text), None) => text,
        (None, Some(upload_id)) => {
            let upload = state
                .store
                .get_upload(upload_id)
                .await?
                .ok_or_else(|| AppError::not_found("Upload", upload_id))?;
            upload.extracted_text.ok_or_else(|| {
                AppError::UnprocessableEntity(format!(
                    "upload {upload_id} has no extracted text to match against"
                ))
            })?
        }
        _ => {
            return Err(AppError::Validation(
                "provide exactly one of text or upload_id".to_string(),
            ))
        }
    };
    if text.trim().is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }

    let reporters = reporters_with_articles(&state).await?;
    if reporters.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "no reporters to match against".to_string(),
        ));
    }

    let report = match_content(&state.llm, &text, &reporters).await?;
    Ok(Json(report))
}

async fn reporters_with_articles(
    state: &AppState,
) -> Result<Vec<(Reporter, Vec<Article>)>, AppError> {
    let reporters = state.store.list_reporters().await?;
    let mut articles = state.store.list_articles(None).await?;
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    Ok(reporters
        .into_iter()
        .map(|r| {
            let own: Vec<Article> = articles
                .iter()
                .filter(|a| a.reporter_id == r.id)
                .cloned()
                .collect();
            (r, own)
        })
        .collect())
}
