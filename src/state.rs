//! Application state: configuration, content engine, collaborator clients
//! and the rubric aggregator. The engine and the aggregator read one shared
//! language table.
//!
//! Everything here is immutable after startup and shared via `Arc`; requests
//! never write to it.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_grader_config_from_env, GraderConfig};
use crate::evaluation::ContentEngine;
use crate::language::{LanguageTable, LexiconTagger};
use crate::rubric::RubricAggregator;
use crate::services::Services;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<GraderConfig>,
  pub engine: ContentEngine,
  pub services: Services,
  pub aggregator: RubricAggregator,
}

impl AppState {
  /// Build state from env: load config, merge language profiles, init clients.
  #[instrument(level = "info", skip_all)]
  pub fn from_env() -> Self {
    let config = load_grader_config_from_env();
    let services = Services::from_env(config.services.timeout_ms);
    Self::build(config, services)
  }

  pub fn build(config: GraderConfig, services: Services) -> Self {
    let languages = Arc::new(LanguageTable::with_overrides(config.languages.clone()));
    let tagger = Arc::new(LexiconTagger::from_table(&languages));
    let engine = ContentEngine::new(languages.clone()).with_tagger(tagger);

    for (tag, profile) in languages.languages() {
      info!(
        target: "grader",
        %tag,
        connectors = profile.connectors.len(),
        stop_words = profile.stop_words.len(),
        verbs = profile.verbs.len(),
        verb_heuristic = profile.verb_heuristic.is_some(),
        "Language profile ready"
      );
    }

    let aggregator = RubricAggregator::new(services.clone(), languages, config.penalties.clone());

    Self { config: Arc::new(config), engine, services, aggregator }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::domain::{EvaluationConfig, Rubric, RubricWeights};
  use crate::language::LanguageProfile;
  use crate::services::GrammarCheck;

  #[tokio::test]
  async fn configured_languages_reach_engine_and_aggregator() {
    let mut languages = HashMap::new();
    languages.insert(
      "de".to_string(),
      LanguageProfile {
        connectors: vec!["zuerst".into()],
        verbs: vec!["esse".into()],
        ..Default::default()
      },
    );
    let state = AppState::build(GraderConfig { languages, ..Default::default() }, Services::disabled(50));

    let cfg = EvaluationConfig { require_verb: true, ..Default::default() };
    let out = state.engine.evaluate("Ich esse einen Apfel", &cfg, "de-DE").expect("evaluation");
    assert_eq!(out.content_score, 100);

    let rubric = Rubric { name: "default".into(), weights: RubricWeights::default() };
    let graded = state
      .aggregator
      .aggregate("Zuerst esse ich.", "de", &GrammarCheck::default(), None, &rubric)
      .await;
    assert_eq!(graded.details.organization.found_connectors, 1);
  }
}
