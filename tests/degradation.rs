//! Collaborators that cannot be reached must never fail a grade.

use std::sync::Arc;
use std::time::Duration;

use answer_grader::config::PenaltyConfig;
use answer_grader::domain::{Rubric, RubricWeights};
use answer_grader::language::LanguageTable;
use answer_grader::rubric::RubricAggregator;
use answer_grader::services::languagetool::LanguageTool;
use answer_grader::services::openai::OpenAI;
use answer_grader::services::Services;

const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

fn unreachable_services() -> Services {
  let timeout = Duration::from_millis(500);
  Services {
    grammar: Some(LanguageTool::new(DEAD_ENDPOINT.into(), timeout).expect("client")),
    semantic: Some(
      OpenAI::new("test-key".into(), DEAD_ENDPOINT.into(), "text-embedding-3-small".into(), timeout)
        .expect("client"),
    ),
    timeout_ms: 500,
  }
}

#[tokio::test]
async fn unreachable_collaborators_yield_neutral_defaults() {
  let services = unreachable_services();

  assert_eq!(services.detect_language("Bonjour tout le monde").await, "und");

  let check = services.check_grammar("Bonjour tout le monde", "fr").await;
  assert!(check.findings.is_empty());
  assert!(check.error.is_some());

  assert_eq!(services.semantic_similarity("a cat", "a dog").await, None);
}

#[tokio::test]
async fn rubric_completes_when_semantic_similarity_is_down() {
  let services = unreachable_services();
  let check = services.check_grammar("Je mange une pomme.", "fr").await;
  let aggregator =
    RubricAggregator::new(services, Arc::new(LanguageTable::builtin()), PenaltyConfig::default());
  let rubric = Rubric { name: "default".into(), weights: RubricWeights::default() };

  let out = aggregator
    .aggregate("Je mange une pomme.", "fr", &check, Some("Je mange une pomme."), &rubric)
    .await;

  assert_eq!(out.details.semantic, None);
  assert_eq!(out.breakdown.content, 0);
  assert_eq!(out.breakdown.grammar, 100);
  assert_eq!(out.breakdown.mechanics, 100);
  assert!(out.details.grammar.lt_error.is_some());
  assert!(out.overall >= 0 && out.overall <= 100);
}
