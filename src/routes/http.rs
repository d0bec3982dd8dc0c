//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! pipeline in `logic`; each logs its parameters and a summary of the result.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::logic::{do_evaluate, do_grade, do_rubric};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), language = ?body.language))]
pub async fn http_post_evaluate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EvaluateIn>,
) -> Result<Json<EvaluateOut>, AppError> {
  let (language, result) =
    do_evaluate(&state, &body.text, &body.config, body.language.as_deref()).await?;
  info!(target: "grader", %language, score = result.content_score, reasons = result.reasons.len(), "HTTP evaluate served");
  Ok(Json(EvaluateOut { language, result }))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), rubric = ?body.rubric))]
pub async fn http_post_rubric(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RubricIn>,
) -> Json<RubricOut> {
  let (language, result) = do_rubric(
    &state,
    &body.text,
    body.language.as_deref(),
    body.expected_answer.as_deref(),
    body.rubric.as_deref(),
  )
  .await;
  info!(target: "grader", %language, overall = result.overall, "HTTP rubric served");
  let lt_error = result.details.grammar.lt_error.clone();
  Json(RubricOut { language, lt_error, result })
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), rubric = ?body.rubric))]
pub async fn http_post_grade(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GradeIn>,
) -> Result<Json<GradeOut>, AppError> {
  let (language, content, rubric) = do_grade(
    &state,
    &body.text,
    &body.config,
    body.language.as_deref(),
    body.rubric.as_deref(),
  )
  .await?;
  info!(target: "grader", %language, content = content.content_score, overall = rubric.overall, "HTTP grade served");
  Ok(Json(GradeOut { language, content, rubric }))
}
