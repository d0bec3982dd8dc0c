//! LanguageTool client: grammar/spelling findings and language detection.
//!
//! Both operations hit `POST {base}/v2/check`; detection passes
//! `language=auto` and reads back the detected code.

use std::time::Duration;

use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::GrammarFinding;
use crate::error::ServiceError;

const SERVICE: &str = "languagetool";
pub const UNDETERMINED: &str = "und";

#[derive(Clone)]
pub struct LanguageTool {
  pub client: reqwest::Client,
  pub base_url: String,
}

impl LanguageTool {
  /// Construct the client if LANGUAGETOOL_URL is set; otherwise return None.
  pub fn from_env(timeout: Duration) -> Option<Self> {
    let base_url = std::env::var("LANGUAGETOOL_URL").ok().filter(|u| !u.trim().is_empty())?;
    Self::new(base_url, timeout).ok()
  }

  pub fn new(base_url: String, timeout: Duration) -> Result<Self, ServiceError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let base_url = base_url.trim_end_matches('/').to_string();
    Ok(Self { client, base_url })
  }

  async fn check_raw(&self, text: &str, language: &str) -> Result<CheckResponse, ServiceError> {
    let url = format!("{}/v2/check", self.base_url);
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "answer-grader/0.1")
      .form(&[("text", text), ("language", language)])
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let message = res.text().await.unwrap_or_default();
      return Err(ServiceError::Status { service: SERVICE, status, message });
    }
    Ok(res.json::<CheckResponse>().await?)
  }

  #[instrument(level = "info", skip(self, text), fields(text_len = text.len(), %language))]
  pub async fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarFinding>, ServiceError> {
    let body = self.check_raw(text, lt_language(language)).await?;
    let findings: Vec<GrammarFinding> = body.matches.into_iter().map(to_finding).collect();
    debug!(target: "services", findings = findings.len(), "LanguageTool check done");
    Ok(findings)
  }

  #[instrument(level = "info", skip(self, text), fields(text_len = text.len()))]
  pub async fn detect(&self, text: &str) -> Result<String, ServiceError> {
    let body = self.check_raw(text, "auto").await?;
    body
      .language
      .and_then(|l| l.detected_language.map(|d| d.code).or(Some(l.code)))
      .filter(|code| !code.trim().is_empty())
      .ok_or_else(|| ServiceError::Decode("no detected language in response".into()))
  }
}

/// LanguageTool wants `auto` rather than an undetermined tag.
fn lt_language(language: &str) -> &str {
  let trimmed = language.trim();
  if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNDETERMINED) {
    "auto"
  } else {
    trimmed
  }
}

fn to_finding(m: LtMatch) -> GrammarFinding {
  GrammarFinding {
    issue_category: m.rule.category.id,
    issue_type: m.rule.issue_type,
    offset: m.offset,
    length: m.length,
    message: m.message,
    replacements: m.replacements.into_iter().map(|r| r.value).collect(),
  }
}

// --- LanguageTool DTOs ---

#[derive(Deserialize)]
struct CheckResponse {
  #[serde(default)]
  matches: Vec<LtMatch>,
  #[serde(default)]
  language: Option<LtLanguage>,
}

#[derive(Deserialize)]
struct LtMatch {
  message: String,
  offset: usize,
  length: usize,
  #[serde(default)]
  replacements: Vec<LtReplacement>,
  rule: LtRule,
}

#[derive(Deserialize)]
struct LtReplacement {
  value: String,
}

#[derive(Deserialize)]
struct LtRule {
  #[serde(default, rename = "issueType")]
  issue_type: Option<String>,
  category: LtCategory,
}

#[derive(Deserialize)]
struct LtCategory {
  id: String,
}

#[derive(Deserialize)]
struct LtLanguage {
  code: String,
  #[serde(default, rename = "detectedLanguage")]
  detected_language: Option<LtDetected>,
}

#[derive(Deserialize)]
struct LtDetected {
  code: String,
}
