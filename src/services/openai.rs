//! Minimal OpenAI client for semantic similarity.
//!
//! We only call `/embeddings` with both texts in one request and compare the
//! vectors by cosine similarity. Calls log model name, latency and input sizes
//! (never the texts or the API key).

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ServiceError;

const SERVICE: &str = "openai";

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub embedding_model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env(timeout: Duration) -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let embedding_model =
      std::env::var("OPENAI_EMBEDDING_MODEL").unwrap_or_else(|_| "text-embedding-3-small".into());
    Self::new(api_key, base_url, embedding_model, timeout).ok()
  }

  pub fn new(
    api_key: String,
    base_url: String,
    embedding_model: String,
    timeout: Duration,
  ) -> Result<Self, ServiceError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let base_url = base_url.trim_end_matches('/').to_string();
    Ok(Self { client, api_key, base_url, embedding_model })
  }

  #[instrument(level = "info", skip(self, inputs), fields(model = %self.embedding_model, inputs = inputs.len()))]
  async fn embed(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, ServiceError> {
    let url = format!("{}/embeddings", self.base_url);
    let req = EmbeddingRequest {
      model: self.embedding_model.clone(),
      input: inputs.iter().map(|s| s.to_string()).collect(),
    };

    let start = std::time::Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "answer-grader/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req)
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(ServiceError::Status { service: SERVICE, status, message });
    }

    let body: EmbeddingResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, total_tokens = ?usage.total_tokens, elapsed = ?start.elapsed(), "OpenAI usage");
    }

    let mut data = body.data;
    data.sort_by_key(|d| d.index);
    if data.len() != inputs.len() {
      return Err(ServiceError::Decode(format!(
        "expected {} embeddings, got {}",
        inputs.len(),
        data.len()
      )));
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
  }

  /// Cosine similarity of the two texts' embeddings, clamped to 0–100.
  #[instrument(level = "info", skip(self, a, b), fields(a_len = a.len(), b_len = b.len()))]
  pub async fn semantic_similarity(&self, a: &str, b: &str) -> Result<u32, ServiceError> {
    let vectors = self.embed(&[a, b]).await?;
    match vectors.as_slice() {
      [left, right] => Ok(similarity_percent(cosine(left, right))),
      _ => Err(ServiceError::Decode("embedding pair missing".into())),
    }
  }
}

pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
  if a.is_empty() || a.len() != b.len() {
    return 0.0;
  }
  let mut dot = 0.0f64;
  let mut na = 0.0f64;
  let mut nb = 0.0f64;
  for (x, y) in a.iter().zip(b) {
    let (x, y) = (*x as f64, *y as f64);
    dot += x * y;
    na += x * x;
    nb += y * y;
  }
  if na == 0.0 || nb == 0.0 {
    return 0.0;
  }
  dot / (na.sqrt() * nb.sqrt())
}

pub fn similarity_percent(cos: f64) -> u32 {
  (cos.clamp(0.0, 1.0) * 100.0).round() as u32
}

// --- Embedding DTOs ---

#[derive(Serialize)]
struct EmbeddingRequest {
  model: String,
  input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
  data: Vec<EmbeddingData>,
  #[serde(default)]
  usage: Option<Usage>,
}
#[derive(Deserialize)]
struct EmbeddingData {
  #[serde(default)]
  index: usize,
  embedding: Vec<f32>,
}
#[derive(Deserialize)]
struct Usage {
  #[serde(default)]
  prompt_tokens: Option<u32>,
  #[serde(default)]
  total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cosine_of_parallel_and_orthogonal_vectors() {
    assert!((cosine(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-9);
    assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    assert_eq!(cosine(&[], &[]), 0.0);
    assert_eq!(cosine(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
  }

  #[test]
  fn similarity_percent_clamps_negative_cosine() {
    assert_eq!(similarity_percent(-0.4), 0);
    assert_eq!(similarity_percent(0.876), 88);
    assert_eq!(similarity_percent(1.2), 100);
  }

  #[test]
  fn openai_error_body_is_unwrapped() {
    let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
    assert_eq!(extract_openai_error(body).as_deref(), Some("Incorrect API key provided"));
    assert_eq!(extract_openai_error("<html>"), None);
  }
}
