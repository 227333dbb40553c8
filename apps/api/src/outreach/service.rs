//! AI-assisted outreach: reporter analysis, pitch drafting and matching
//! reporters to a document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::text_enum;
use crate::models::{Article, Reporter, Theme};
use crate::outreach::prompts::{
    build_analyze_prompt, build_match_prompt, build_pitch_prompt, PitchPromptInput,
    ANALYZE_SYSTEM_ROLE, MATCH_SYSTEM_ROLE, PITCH_SYSTEM_ROLE,
};

const ANALYZE_OPTIONS: CallOptions = CallOptions {
    temperature: 0.3,
    max_tokens: 1000,
};
const PITCH_OPTIONS: CallOptions = CallOptions {
    temperature: 0.4,
    max_tokens: 1500,
};
const MATCH_OPTIONS: CallOptions = CallOptions {
    temperature: 0.2,
    max_tokens: 2000,
};

/// Re-asks allowed when a match cites a reporter id that does not exist.
const MAX_MATCH_RETRIES: u32 = 2;
const MAX_PERCENT: u32 = 100;

text_enum! {
    #[derive(Default)]
    pub enum Tone {
        Formal => "formal",
        Casual => "casual",
        Friendly => "friendly",
        #[default]
        Professional => "professional",
    }
}

text_enum! {
    #[derive(Default)]
    pub enum Purpose {
        Introduction => "introduction",
        #[default]
        Pitch => "pitch",
        FollowUp => "follow_up",
        Invitation => "invitation",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterAnalysis {
    #[serde(default)]
    pub interests: Vec<String>,
    pub expertise_level: String,
    pub preferred_content_type: String,
    pub communication_style: String,
    pub best_contact_time: String,
    pub recommended_approach: String,
    pub confidence_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchMessage {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub call_to_action: String,
    pub estimated_response_probability: u32,
}

/// A match as the model wrote it; the id is not yet trusted.
#[derive(Debug, Clone, Deserialize)]
struct RawMatch {
    reporter_id: String,
    #[serde(default)]
    score: u32,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    suggested_approach: String,
    #[serde(default)]
    confidence: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMatchReport {
    #[serde(default)]
    document_summary: String,
    #[serde(default)]
    main_topics: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentMatch {
    pub reporter_id: Uuid,
    pub reporter_name: String,
    pub score: u32,
    pub reasons: Vec<String>,
    pub suggested_approach: String,
    pub confidence: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentMatchReport {
    pub document_summary: String,
    pub main_topics: Vec<String>,
    pub keywords: Vec<String>,
    pub matches: Vec<ContentMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

pub async fn analyze_reporter(
    llm: &LlmClient,
    reporter: &Reporter,
    articles: &[Article],
) -> Result<ReporterAnalysis, AppError> {
    let prompt = build_analyze_prompt(reporter, articles);
    let mut analysis: ReporterAnalysis = llm
        .call_json(&prompt, &json_system(ANALYZE_SYSTEM_ROLE), ANALYZE_OPTIONS)
        .await
        .map_err(|e| AppError::Llm(format!("Reporter analysis failed: {e}")))?;
    analysis.confidence_score = analysis.confidence_score.min(MAX_PERCENT);
    info!(
        "Analyzed reporter {} (confidence {})",
        reporter.id, analysis.confidence_score
    );
    Ok(analysis)
}

pub struct PitchRequest<'a> {
    pub reporter: &'a Reporter,
    pub theme: Option<&'a Theme>,
    pub tone: Tone,
    pub purpose: Purpose,
    pub communication_style: Option<&'a str>,
    pub additional_context: Option<&'a str>,
}

pub async fn generate_pitch(
    llm: &LlmClient,
    request: &PitchRequest<'_>,
) -> Result<PitchMessage, AppError> {
    let prompt = build_pitch_prompt(&PitchPromptInput {
        reporter: request.reporter,
        theme: request.theme,
        tone: request.tone.as_str(),
        purpose: request.purpose.as_str(),
        communication_style: request.communication_style,
        additional_context: request.additional_context,
    });
    let mut message: PitchMessage = llm
        .call_json(&prompt, &json_system(PITCH_SYSTEM_ROLE), PITCH_OPTIONS)
        .await
        .map_err(|e| AppError::Llm(format!("Pitch generation failed: {e}")))?;
    message.estimated_response_probability =
        message.estimated_response_probability.min(MAX_PERCENT);
    info!(
        "Generated {} pitch for reporter {}",
        request.purpose, request.reporter.id
    );
    Ok(message)
}

/// Asks the model which reporters fit `text`. Matches citing an unknown
/// reporter id trigger a re-ask; after the last attempt they are dropped.
pub async fn match_content(
    llm: &LlmClient,
    text: &str,
    reporters: &[(Reporter, Vec<Article>)],
) -> Result<ContentMatchReport, AppError> {
    let prompt = build_match_prompt(text, reporters);
    let system = json_system(MATCH_SYSTEM_ROLE);
    let known: HashMap<Uuid, &str> = reporters
        .iter()
        .map(|(r, _)| (r.id, r.name.as_str()))
        .collect();

    for attempt in 0..=MAX_MATCH_RETRIES {
        let raw: RawMatchReport = llm
            .call_json(&prompt, &system, MATCH_OPTIONS)
            .await
            .map_err(|e| AppError::Llm(format!("Content matching failed: {e}")))?;

        let (report, invalid_count) = validate_matches(raw, &known);
        if invalid_count == 0 {
            return Ok(report);
        }

        if attempt == MAX_MATCH_RETRIES {
            warn!(
                "Content matching: dropping {} matches with unknown reporter ids after {} attempts",
                invalid_count,
                MAX_MATCH_RETRIES + 1
            );
            return Ok(report);
        }

        warn!(
            "Content matching attempt {}/{}: {} matches cite unknown reporter ids, retrying",
            attempt + 1,
            MAX_MATCH_RETRIES + 1,
            invalid_count
        );
    }

    Err(AppError::Llm(
        "Content matching produced no usable result".to_string(),
    ))
}

/// Keeps matches whose id names a known reporter, using the stored name,
/// and sorts them by score descending. Returns the number dropped.
fn validate_matches(
    raw: RawMatchReport,
    known: &HashMap<Uuid, &str>,
) -> (ContentMatchReport, usize) {
    let total = raw.matches.len();
    let mut matches: Vec<ContentMatch> = raw
        .matches
        .into_iter()
        .filter_map(|m| {
            let id = Uuid::parse_str(m.reporter_id.trim()).ok()?;
            let name = known.get(&id)?;
            Some(ContentMatch {
                reporter_id: id,
                reporter_name: name.to_string(),
                score: m.score.min(MAX_PERCENT),
                reasons: m.reasons,
                suggested_approach: m.suggested_approach,
                confidence: m.confidence,
            })
        })
        .collect();
    let invalid_count = total - matches.len();
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    (
        ContentMatchReport {
            document_summary: raw.document_summary,
            main_topics: raw.main_topics,
            keywords: raw.keywords,
            matches,
        },
        invalid_count,
    )
}
