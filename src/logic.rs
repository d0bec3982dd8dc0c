//! Request pipeline shared by the HTTP handlers.
//!
//! Collaborators are awaited one after another (language → grammar →
//! semantic similarity); each degrades on its own, so a dead service never
//! aborts a grade.

use tracing::{debug, info, instrument};

use crate::domain::{ContentEvalResult, EvaluationConfig, RubricResult};
use crate::error::EvaluationError;
use crate::state::AppState;
use crate::text::trunc_for_log;

/// Use the caller's tag when given, otherwise ask the detector.
#[instrument(level = "debug", skip(state, text), fields(text_len = text.len()))]
pub async fn resolve_language(state: &AppState, hint: Option<&str>, text: &str) -> String {
  match hint.map(str::trim).filter(|h| !h.is_empty()) {
    Some(tag) => tag.to_string(),
    None => state.services.detect_language(text).await,
  }
}

#[instrument(level = "info", skip(state, text, config), fields(text_len = text.len()))]
pub async fn do_evaluate(
  state: &AppState,
  text: &str,
  config: &EvaluationConfig,
  language: Option<&str>,
) -> Result<(String, ContentEvalResult), EvaluationError> {
  debug!(target: "grader", preview = %trunc_for_log(text, 80), "Evaluating answer");
  let language = resolve_language(state, language, text).await;
  let result = state.engine.evaluate(text, config, &language)?;
  info!(target: "grader", %language, score = result.content_score, correct = result.is_correct, "Answer evaluated");
  Ok((language, result))
}

#[instrument(level = "info", skip(state, text, expected_answer), fields(text_len = text.len()))]
pub async fn do_rubric(
  state: &AppState,
  text: &str,
  language: Option<&str>,
  expected_answer: Option<&str>,
  rubric_name: Option<&str>,
) -> (String, RubricResult) {
  let language = resolve_language(state, language, text).await;
  let rubric = state.config.rubric(rubric_name);
  let check = state.services.check_grammar(text, &language).await;
  let result = state
    .aggregator
    .aggregate(text, &language, &check, expected_answer, &rubric)
    .await;
  info!(target: "grader", %language, rubric = %result.rubric, overall = result.overall, lt_error = check.error.is_some(), "Rubric graded");
  (language, result)
}

/// Content evaluation and rubric grade in one pass. The rubric uses the
/// config's expected answer.
#[instrument(level = "info", skip(state, text, config), fields(text_len = text.len()))]
pub async fn do_grade(
  state: &AppState,
  text: &str,
  config: &EvaluationConfig,
  language: Option<&str>,
  rubric_name: Option<&str>,
) -> Result<(String, ContentEvalResult, RubricResult), EvaluationError> {
  let language = resolve_language(state, language, text).await;
  let content = state.engine.evaluate(text, config, &language)?;
  let (_, rubric) = do_rubric(state, text, Some(&language), config.expected(), rubric_name).await;
  Ok((language, content, rubric))
}
