//! Loading grader configuration (rubrics, language profiles, penalties,
//! service timeout) from TOML.
//!
//! Everything is optional; missing sections fall back to the built-in seeds.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{Rubric, RubricWeights};
use crate::error::ConfigError;
use crate::language::LanguageProfile;
use crate::seeds::{seed_rubrics, DEFAULT_RUBRIC};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GraderConfig {
  #[serde(default)]
  pub rubrics: HashMap<String, RubricDef>,
  #[serde(default)]
  pub languages: HashMap<String, LanguageProfile>,
  #[serde(default)]
  pub penalties: PenaltyConfig,
  #[serde(default)]
  pub services: ServiceConfig,
}

/// Rubric entry accepted in TOML: `[rubrics.<name>.weights]`.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct RubricDef {
  #[serde(default)]
  pub weights: RubricWeights,
}

/// Points removed per finding, per category.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PenaltyConfig {
  pub grammar_per_error: u32,
  pub spelling_per_error: u32,
}

impl Default for PenaltyConfig {
  fn default() -> Self {
    Self { grammar_per_error: 5, spelling_per_error: 5 }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
  pub timeout_ms: u64,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self { timeout_ms: 8000 }
  }
}

impl GraderConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str::<GraderConfig>(s)?)
  }

  pub fn from_path(path: &str) -> Result<Self, ConfigError> {
    let s = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
    Self::from_toml_str(&s)
  }

  /// Resolve a rubric by name. Configured rubrics shadow the seeds; an unknown
  /// or missing name falls back to `default`.
  pub fn rubric(&self, name: Option<&str>) -> Rubric {
    let wanted = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(DEFAULT_RUBRIC);
    if let Some(def) = self.rubrics.get(wanted) {
      return Rubric { name: wanted.to_string(), weights: def.weights.clone() };
    }
    let seeds = seed_rubrics();
    if let Some(weights) = seeds.get(wanted) {
      return Rubric { name: wanted.to_string(), weights: weights.clone() };
    }

    warn!(target: "grader", rubric = %wanted, "Unknown rubric; using default weights");
    let weights = self
      .rubrics
      .get(DEFAULT_RUBRIC)
      .map(|d| d.weights.clone())
      .or_else(|| seeds.get(DEFAULT_RUBRIC).cloned())
      .unwrap_or_default();
    Rubric { name: DEFAULT_RUBRIC.to_string(), weights }
  }
}

/// Load `GraderConfig` from GRADER_CONFIG_PATH. On any IO/parse error, log it
/// and continue with defaults.
pub fn load_grader_config_from_env() -> GraderConfig {
  let Ok(path) = std::env::var("GRADER_CONFIG_PATH") else {
    info!(target: "grader", "GRADER_CONFIG_PATH not set; using built-in defaults");
    return GraderConfig::default();
  };
  match GraderConfig::from_path(&path) {
    Ok(cfg) => {
      info!(target: "grader", %path, rubrics = cfg.rubrics.len(), languages = cfg.languages.len(), "Loaded grader config (TOML)");
      cfg
    }
    Err(e) => {
      error!(target: "grader", %path, error = %e, "Failed to load grader config; using built-in defaults");
      GraderConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"
[rubrics.b1_writing.weights]
content = 40
organization = 20
lexis = 15
grammar = 15
mechanics = 10

[languages.de]
connectors = ["zuerst", "dann", "schließlich"]
stop_words = ["der", "die", "das"]

[languages.de.verb_heuristic]
auxiliaries = ["ist", "sind", "habe"]

[penalties]
spelling_per_error = 3

[services]
timeout_ms = 2500
"#;

  #[test]
  fn parses_full_sample() {
    let cfg = GraderConfig::from_toml_str(SAMPLE).expect("config");
    let r = cfg.rubric(Some("b1_writing"));
    assert_eq!(r.name, "b1_writing");
    assert_eq!(r.weights.content, 40.0);
    assert_eq!(cfg.penalties, PenaltyConfig { grammar_per_error: 5, spelling_per_error: 3 });
    assert_eq!(cfg.services.timeout_ms, 2500);
    let de = cfg.languages.get("de").expect("de profile");
    assert_eq!(de.connectors.len(), 3);
    assert_eq!(de.verb_heuristic.as_ref().map(|h| h.auxiliaries.len()), Some(3));
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = GraderConfig::from_toml_str("").expect("config");
    assert_eq!(cfg.penalties, PenaltyConfig::default());
    assert_eq!(cfg.services.timeout_ms, 8000);
    assert_eq!(cfg.rubric(None).weights, RubricWeights::default());
  }

  #[test]
  fn unknown_rubric_falls_back_to_default() {
    let cfg = GraderConfig::default();
    let r = cfg.rubric(Some("nope"));
    assert_eq!(r.name, "default");
    assert_eq!(r.weights, RubricWeights::default());
    assert_eq!(cfg.rubric(Some("essay")).name, "essay");
  }

  #[test]
  fn configured_default_shadows_seed() {
    let cfg = GraderConfig::from_toml_str("[rubrics.default.weights]\ncontent = 100\norganization = 0\nlexis = 0\ngrammar = 0\nmechanics = 0\n")
      .expect("config");
    assert_eq!(cfg.rubric(Some("missing")).weights.content, 100.0);
  }

  #[test]
  fn malformed_toml_is_a_parse_error() {
    assert!(matches!(GraderConfig::from_toml_str("rubrics = ["), Err(ConfigError::Parse(_))));
  }

  #[test]
  fn missing_file_is_a_read_error() {
    assert!(matches!(
      GraderConfig::from_path("/definitely/not/here.toml"),
      Err(ConfigError::Read { .. })
    ));
  }
}
