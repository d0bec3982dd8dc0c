//! Error types. Only `EvaluationError` ever reaches a caller of the scoring
//! core; `ServiceError`s are absorbed into neutral defaults by the pipeline.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
  #[error("invalid regex pattern {pattern:?}: {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),
  #[error("{service} HTTP {status}: {message}")]
  Status { service: &'static str, status: u16, message: String },
  #[error("{0} timed out after {1} ms")]
  Timeout(&'static str, u64),
  #[error("unexpected response: {0}")]
  Decode(String),
  #[error("{0} is not configured")]
  Disabled(&'static str),
}

#[derive(Debug, Error)]
pub enum AppError {
  #[error("evaluation error: {0}")]
  Evaluation(#[from] EvaluationError),
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = match self {
      AppError::Evaluation(_) => StatusCode::BAD_REQUEST,
      AppError::Config(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = Json(json!({ "error": self.to_string() }));
    (status, body).into_response()
  }
}
