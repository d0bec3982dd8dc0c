//! Rubric aggregator: blends content, organization, lexis, grammar and
//! mechanics sub-scores into one weighted grade with a traceable breakdown.
//!
//! `score_rubric` is pure and works on signals already gathered;
//! `RubricAggregator::aggregate` awaits the semantic-similarity collaborator
//! first. Weights are applied as given, without renormalization.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::config::PenaltyConfig;
use crate::domain::{
  GrammarFinding, GrammarMetrics, LexisMetrics, Rubric, RubricBreakdown, RubricDetails,
  RubricResult,
};
use crate::language::LanguageTable;
use crate::metrics::{organization_score, repetition_penalty, token_frequencies, type_token_ratio};
use crate::services::{GrammarCheck, Services};
use crate::text::tokenize;

/// Externally produced inputs for one submission.
#[derive(Clone, Copy, Debug)]
pub struct RubricSignals<'a> {
  pub findings: &'a [GrammarFinding],
  pub lt_error: Option<&'a str>,
  pub expected_answer: Option<&'a str>,
  /// Semantic similarity, `None` when skipped or unavailable.
  pub semantic: Option<u32>,
}

fn error_score(errors: usize, per_error: u32) -> u32 {
  let lost = (errors as u64).saturating_mul(per_error as u64);
  100u64.saturating_sub(lost) as u32
}

pub fn grammar_metrics(findings: &[GrammarFinding], lt_error: Option<&str>) -> GrammarMetrics {
  let spelling_errors = findings.iter().filter(|f| f.is_spelling()).count();
  GrammarMetrics {
    grammar_errors: findings.len() - spelling_errors,
    spelling_errors,
    lt_error: lt_error.map(str::to_string),
  }
}

pub fn lexis_metrics(text: &str, stop_words: &[String]) -> LexisMetrics {
  let tokens = tokenize(text);
  let ttr = type_token_ratio(&tokens);
  let repetition = repetition_penalty(&token_frequencies(&tokens, stop_words));
  LexisMetrics {
    tokens: tokens.len(),
    ttr: ttr.ttr,
    ttr_score: ttr.ttr_score,
    repeated_top: repetition.repeated_top,
    penalty: repetition.penalty,
  }
}

/// Weighted overall: `Σ score × weight / 100`, rounded.
pub fn weighted_overall(breakdown: &RubricBreakdown, rubric: &Rubric) -> i64 {
  let w = &rubric.weights;
  let sum = breakdown.content as f64 * w.content
    + breakdown.organization as f64 * w.organization
    + breakdown.lexis as f64 * w.lexis
    + breakdown.grammar as f64 * w.grammar
    + breakdown.mechanics as f64 * w.mechanics;
  (sum / 100.0).round() as i64
}

pub fn score_rubric(
  text: &str,
  language: &str,
  rubric: &Rubric,
  signals: RubricSignals<'_>,
  languages: &LanguageTable,
  penalties: &PenaltyConfig,
) -> RubricResult {
  let profile = languages.profile(language);

  // Content is skipped (0) without an expected answer.
  let has_expected = signals
    .expected_answer
    .map(|e| !e.trim().is_empty())
    .unwrap_or(false);
  let semantic = if has_expected { signals.semantic } else { None };
  let content = semantic.unwrap_or(0).min(100);

  let organization = organization_score(text, &profile.connectors);
  let organization_pillar =
    (organization.para_score as f64 * 0.5 + organization.conn_score as f64 * 0.5).round() as u32;

  let lexis = lexis_metrics(text, &profile.stop_words);
  let lexis_pillar = lexis.ttr_score.saturating_sub(lexis.penalty);

  let grammar = grammar_metrics(signals.findings, signals.lt_error);
  let grammar_pillar = error_score(grammar.grammar_errors, penalties.grammar_per_error);
  let mechanics_pillar = error_score(grammar.spelling_errors, penalties.spelling_per_error);

  let breakdown = RubricBreakdown {
    content,
    organization: organization_pillar,
    lexis: lexis_pillar,
    grammar: grammar_pillar,
    mechanics: mechanics_pillar,
  };
  let overall = weighted_overall(&breakdown, rubric);

  debug!(
    target: "grader",
    rubric = %rubric.name,
    %language,
    overall,
    content,
    organization = organization_pillar,
    lexis = lexis_pillar,
    grammar = grammar_pillar,
    mechanics = mechanics_pillar,
    "Rubric aggregated"
  );

  RubricResult {
    rubric: rubric.name.clone(),
    overall,
    breakdown,
    details: RubricDetails { semantic, organization, lexis, grammar },
  }
}

/// Aggregator wired to the collaborators it needs.
#[derive(Clone)]
pub struct RubricAggregator {
  services: Services,
  languages: Arc<LanguageTable>,
  penalties: PenaltyConfig,
}

impl RubricAggregator {
  pub fn new(services: Services, languages: Arc<LanguageTable>, penalties: PenaltyConfig) -> Self {
    Self { services, languages, penalties }
  }

  /// Consult semantic similarity (only with an expected answer), then score.
  #[instrument(level = "info", skip(self, text, check, expected_answer), fields(text_len = text.len(), %language, rubric = %rubric.name))]
  pub async fn aggregate(
    &self,
    text: &str,
    language: &str,
    check: &GrammarCheck,
    expected_answer: Option<&str>,
    rubric: &Rubric,
  ) -> RubricResult {
    let expected = expected_answer.map(str::trim).filter(|e| !e.is_empty());
    let semantic = match expected {
      Some(e) => self.services.semantic_similarity(text, e).await,
      None => None,
    };

    let signals = RubricSignals {
      findings: &check.findings,
      lt_error: check.error.as_deref(),
      expected_answer: expected,
      semantic,
    };
    score_rubric(text, language, rubric, signals, &self.languages, &self.penalties)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::RubricWeights;

  fn rubric(weights: RubricWeights) -> Rubric {
    Rubric { name: "test".into(), weights }
  }

  fn finding(category: &str) -> GrammarFinding {
    GrammarFinding {
      issue_category: category.into(),
      issue_type: None,
      offset: 0,
      length: 1,
      message: String::new(),
      replacements: vec![],
    }
  }

  fn signals<'a>(findings: &'a [GrammarFinding], expected: Option<&'a str>, semantic: Option<u32>) -> RubricSignals<'a> {
    RubricSignals { findings, lt_error: None, expected_answer: expected, semantic }
  }

  const ESSAY: &str = "First, I wake up early.\n\nThen I eat breakfast with my family.\n\nFinally, however, I go to school by bus.";

  #[test]
  fn no_findings_means_perfect_grammar_and_mechanics() {
    let table = LanguageTable::builtin();
    let out = score_rubric(ESSAY, "en", &rubric(RubricWeights::default()), signals(&[], None, None), &table, &PenaltyConfig::default());
    assert_eq!(out.breakdown.grammar, 100);
    assert_eq!(out.breakdown.mechanics, 100);
    assert_eq!(out.details.grammar.grammar_errors, 0);
  }

  #[test]
  fn findings_split_into_grammar_and_spelling() {
    let table = LanguageTable::builtin();
    let findings = vec![finding("TYPOS"), finding("TYPOS"), finding("GRAMMAR")];
    let penalties = PenaltyConfig { grammar_per_error: 30, spelling_per_error: 60 };
    let out = score_rubric(ESSAY, "en", &rubric(RubricWeights::default()), signals(&findings, None, None), &table, &penalties);
    assert_eq!(out.details.grammar.spelling_errors, 2);
    assert_eq!(out.details.grammar.grammar_errors, 1);
    assert_eq!(out.breakdown.grammar, 70);
    assert_eq!(out.breakdown.mechanics, 0);
  }

  #[test]
  fn content_requires_an_expected_answer() {
    let table = LanguageTable::builtin();
    let r = rubric(RubricWeights::default());
    let p = PenaltyConfig::default();

    let skipped = score_rubric(ESSAY, "en", &r, signals(&[], None, Some(90)), &table, &p);
    assert_eq!(skipped.breakdown.content, 0);
    assert_eq!(skipped.details.semantic, None);

    let used = score_rubric(ESSAY, "en", &r, signals(&[], Some("an answer"), Some(90)), &table, &p);
    assert_eq!(used.breakdown.content, 90);
    assert_eq!(used.details.semantic, Some(90));

    let unavailable = score_rubric(ESSAY, "en", &r, signals(&[], Some("an answer"), None), &table, &p);
    assert_eq!(unavailable.breakdown.content, 0);
  }

  #[test]
  fn organization_and_lexis_pillars() {
    let table = LanguageTable::builtin();
    let out = score_rubric(ESSAY, "en", &rubric(RubricWeights::default()), signals(&[], None, None), &table, &PenaltyConfig::default());
    assert_eq!(out.details.organization.paragraphs, 3);
    // first, then, finally, however
    assert_eq!(out.details.organization.found_connectors, 4);
    assert_eq!(out.breakdown.organization, 100);
    assert_eq!(out.breakdown.lexis, out.details.lexis.ttr_score - out.details.lexis.penalty);
  }

  #[test]
  fn repetition_lowers_lexis_but_not_below_zero() {
    let table = LanguageTable::builtin();
    let text = "cake cake cake cake pie pie pie pie tea tea tea tea jam jam jam jam";
    let out = score_rubric(text, "en", &rubric(RubricWeights::default()), signals(&[], None, None), &table, &PenaltyConfig::default());
    assert_eq!(out.details.lexis.ttr_score, 50);
    assert_eq!(out.details.lexis.penalty, 40);
    assert_eq!(out.breakdown.lexis, 10);
  }

  #[test]
  fn overall_is_weighted_sum_without_renormalization() {
    let b = RubricBreakdown { content: 80, organization: 50, lexis: 100, grammar: 90, mechanics: 70 };
    let r = rubric(RubricWeights::default());
    // (80*30 + 50*20 + 100*20 + 90*20 + 70*10) / 100 = 79
    assert_eq!(weighted_overall(&b, &r), 79);

    let doubled = rubric(RubricWeights { content: 60.0, organization: 40.0, lexis: 40.0, grammar: 40.0, mechanics: 20.0 });
    assert_eq!(weighted_overall(&b, &doubled), 158);

    let zero = rubric(RubricWeights { content: 0.0, organization: 0.0, lexis: 0.0, grammar: 0.0, mechanics: 0.0 });
    assert_eq!(weighted_overall(&b, &zero), 0);
  }

  #[tokio::test]
  async fn aggregator_without_semantic_service_still_completes() {
    let aggregator = RubricAggregator::new(
      Services::disabled(50),
      Arc::new(LanguageTable::builtin()),
      PenaltyConfig::default(),
    );
    let check = GrammarCheck { findings: vec![], error: Some("languagetool is not configured".into()) };
    let out = aggregator
      .aggregate(ESSAY, "en", &check, Some("I go to school"), &rubric(RubricWeights::default()))
      .await;
    assert_eq!(out.breakdown.content, 0);
    assert_eq!(out.details.semantic, None);
    assert_eq!(out.details.grammar.lt_error.as_deref(), Some("languagetool is not configured"));
    assert_eq!(out.breakdown.grammar, 100);
    assert!(out.overall > 0);
  }
}
