//! Public protocol structs for the HTTP endpoints (serde ready, camelCase).

use serde::{Deserialize, Serialize};

use crate::domain::{ContentEvalResult, EvaluationConfig, RubricResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateIn {
  pub text: String,
  #[serde(default)]
  pub config: EvaluationConfig,
  #[serde(default)]
  pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateOut {
  pub language: String,
  #[serde(flatten)]
  pub result: ContentEvalResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricIn {
  pub text: String,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub expected_answer: Option<String>,
  #[serde(default)]
  pub rubric: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricOut {
  pub language: String,
  pub lt_error: Option<String>,
  #[serde(flatten)]
  pub result: RubricResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeIn {
  pub text: String,
  #[serde(default)]
  pub config: EvaluationConfig,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub rubric: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOut {
  pub language: String,
  pub content: ContentEvalResult,
  pub rubric: RubricResult,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
