use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::catalog::{skills_by_category, SkillCategory};
use crate::analysis::{analyze, AnalysisReport, EMPTY_JD_MESSAGE};
use crate::errors::AppError;
use crate::routes::form::MultipartForm;
use crate::state::AppState;
use crate::stats::StatsResponse;

pub const EMPTY_RESUME_FILE_MESSAGE: &str = "Could not extract text from resume file.";

/// Field names accepted for an uploaded resume, in priority order.
const RESUME_FILE_FIELDS: &[&str] = &["resume_file", "resume"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

fn job_description(form: &MultipartForm) -> Result<String, AppError> {
    form.text("job_description")
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(EMPTY_JD_MESSAGE.to_string()))
}

/// POST /api/analyze
/// Resume comes from an uploaded file when present, otherwise from `resume_text`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let jd = job_description(&form)?;

    let resume_text = match form.take_file(RESUME_FILE_FIELDS) {
        Some(upload) => state.uploads.process(upload).await?.text,
        None => form.text("resume_text").unwrap_or_default().to_string(),
    };

    let report = analyze(state.scorer.as_ref(), &state.stats, &resume_text, &jd).await?;
    Ok(Json(report))
}

/// POST /api/analyze-with-file
pub async fn handle_analyze_with_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let jd = job_description(&form)?;

    let upload = form
        .take_file(RESUME_FILE_FIELDS)
        .ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;
    let doc = state.uploads.process(upload).await?;
    if doc.text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            EMPTY_RESUME_FILE_MESSAGE.to_string(),
        ));
    }

    let report = analyze(state.scorer.as_ref(), &state.stats, &doc.text, &jd).await?;
    Ok(Json(report))
}

/// POST /api/analyze-text
/// Missing fields count as empty text; a body that is not JSON is a validation error.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    let Json(req) = payload?;
    let report = analyze(
        state.scorer.as_ref(),
        &state.stats,
        &req.resume_text,
        &req.job_description,
    )
    .await?;
    Ok(Json(report))
}

/// GET /api/skills
pub async fn handle_skills() -> Json<BTreeMap<SkillCategory, Vec<&'static str>>> {
    Json(skills_by_category())
}

/// GET /api/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.stats.snapshot(state.config.max_upload_mb()))
}
