//! Axum route handlers for skill extraction and career recommendation.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::upload::RequestInput;
use crate::pipeline::RecommendationReport;
use crate::skills::SkillSet;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_career: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills
///
/// Extracts text from the upload (or takes raw text) and returns recognized skills.
/// Does not need the model.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Json<SkillsResponse>, AppError> {
    let text = input.into_text()?;
    let skills = state.pipeline.analyze(&text);
    Ok(Json(SkillsResponse { skills }))
}

/// POST /api/v1/recommendations
///
/// Full pipeline: extract → recognize → rank → gaps.
pub async fn handle_recommend(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Json<RecommendationReport>, AppError> {
    // Fail before touching the document when no model is loaded.
    state.pipeline.require_model()?;

    let text = input.into_text()?;
    let report = state.pipeline.recommend(&text)?;
    Ok(Json(report))
}

/// POST /predict
///
/// Single predicted career for the whole text.
pub async fn handle_predict(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Json<PredictResponse>, AppError> {
    state.pipeline.require_model()?;

    let text = input.into_text()?;
    let predicted_career = state.pipeline.predict_career(&text)?;
    Ok(Json(PredictResponse { predicted_career }))
}
