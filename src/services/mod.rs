//! External collaborators: language detection, grammar checking and semantic
//! similarity. Every call is bounded by a timeout and degrades to a neutral
//! default instead of failing the evaluation.

pub mod languagetool;
pub mod openai;

use std::future::Future;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::domain::GrammarFinding;
use crate::error::ServiceError;
use languagetool::{LanguageTool, UNDETERMINED};
use openai::OpenAI;

/// Findings plus the reason they may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrammarCheck {
  pub findings: Vec<GrammarFinding>,
  pub error: Option<String>,
}

/// Optional clients, shared read-only across requests.
#[derive(Clone)]
pub struct Services {
  pub grammar: Option<LanguageTool>,
  pub semantic: Option<OpenAI>,
  pub timeout_ms: u64,
}

impl Services {
  pub fn disabled(timeout_ms: u64) -> Self {
    Self { grammar: None, semantic: None, timeout_ms }
  }

  /// Build clients from environment (LANGUAGETOOL_URL, OPENAI_API_KEY, ...).
  pub fn from_env(timeout_ms: u64) -> Self {
    let timeout = Duration::from_millis(timeout_ms);
    let grammar = LanguageTool::from_env(timeout);
    let semantic = OpenAI::from_env(timeout);

    match &grammar {
      Some(lt) => info!(target: "services", base_url = %lt.base_url, "LanguageTool enabled."),
      None => info!(target: "services", "LanguageTool disabled (no LANGUAGETOOL_URL)."),
    }
    match &semantic {
      Some(oa) => info!(target: "services", base_url = %oa.base_url, model = %oa.embedding_model, "OpenAI embeddings enabled."),
      None => info!(target: "services", "OpenAI embeddings disabled (no OPENAI_API_KEY)."),
    }

    Self { grammar, semantic, timeout_ms }
  }

  /// Best-effort language detection; `"und"` when unavailable.
  #[instrument(level = "info", skip(self, text), fields(text_len = text.len()))]
  pub async fn detect_language(&self, text: &str) -> String {
    let Some(lt) = &self.grammar else {
      return UNDETERMINED.to_string();
    };
    match with_timeout("languagetool", self.timeout_ms, lt.detect(text)).await {
      Ok(code) => code,
      Err(e) => {
        warn!(target: "services", error = %e, "Language detection failed; using undetermined.");
        UNDETERMINED.to_string()
      }
    }
  }

  /// Grammar findings, or none plus an error marker.
  #[instrument(level = "info", skip(self, text), fields(text_len = text.len(), %language))]
  pub async fn check_grammar(&self, text: &str, language: &str) -> GrammarCheck {
    let result = match &self.grammar {
      Some(lt) => with_timeout("languagetool", self.timeout_ms, lt.check(text, language)).await,
      None => Err(ServiceError::Disabled("languagetool")),
    };
    match result {
      Ok(findings) => GrammarCheck { findings, error: None },
      Err(e) => {
        warn!(target: "services", error = %e, "Grammar check unavailable; continuing without findings.");
        GrammarCheck { findings: Vec::new(), error: Some(e.to_string()) }
      }
    }
  }

  /// Semantic similarity 0–100, or `None` when the service is unavailable.
  #[instrument(level = "info", skip(self, a, b), fields(a_len = a.len(), b_len = b.len()))]
  pub async fn semantic_similarity(&self, a: &str, b: &str) -> Option<u32> {
    let oa = self.semantic.as_ref()?;
    match with_timeout("openai", self.timeout_ms, oa.semantic_similarity(a, b)).await {
      Ok(score) => Some(score),
      Err(e) => {
        warn!(target: "services", error = %e, "Semantic similarity unavailable.");
        None
      }
    }
  }
}

/// Bound a collaborator call by `ms` milliseconds.
pub async fn with_timeout<T, F>(service: &'static str, ms: u64, fut: F) -> Result<T, ServiceError>
where
  F: Future<Output = Result<T, ServiceError>>,
{
  match tokio::time::timeout(Duration::from_millis(ms), fut).await {
    Ok(result) => result,
    Err(_) => Err(ServiceError::Timeout(service, ms)),
  }
}
