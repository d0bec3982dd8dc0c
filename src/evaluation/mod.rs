//! Content evaluation engine: applies the configured rules to one submission
//! and turns partial satisfaction into a 0–100 score, a correctness verdict
//! and an ordered list of per-rule reasons.

mod rules;
mod verdict;


use std::sync::Arc;

use tracing::debug;

use crate::domain::{ContentEvalResult, EvaluationConfig};
use crate::error::EvaluationError;
use crate::language::{LanguageTable, LexiconTagger, VerbTagger};
use rules::score_submission;
use verdict::decide_correct;

/// Stateless evaluator. Cheap to clone; holds only immutable lookup data.
#[derive(Clone)]
pub struct ContentEngine {
  languages: Arc<LanguageTable>,
  tagger: Option<Arc<dyn VerbTagger>>,
}

impl ContentEngine {
  pub fn new(languages: Arc<LanguageTable>) -> Self {
    Self { languages, tagger: None }
  }

  pub fn with_tagger(mut self, tagger: Arc<dyn VerbTagger>) -> Self {
    self.tagger = Some(tagger);
    self
  }

  pub fn evaluate(
    &self,
    text: &str,
    config: &EvaluationConfig,
    language: &str,
  ) -> Result<ContentEvalResult, EvaluationError> {
    let tally = score_submission(self, text, config, language)?;
    let content_score = tally.content_score();
    let is_correct = decide_correct(config, &tally.signals);

    debug!(
      target: "grader",
      %language,
      content_score,
      is_correct,
      points = tally.points,
      max_points = tally.max_points,
      rules = tally.reasons.len(),
      "Content evaluated"
    );

    Ok(ContentEvalResult { content_score, is_correct, reasons: tally.reasons })
  }
}

impl Default for ContentEngine {
  /// Built-in language table with its lexicon tagger attached.
  fn default() -> Self {
    let table = Arc::new(LanguageTable::builtin());
    let tagger = Arc::new(LexiconTagger::from_table(&table));
    Self::new(table).with_tagger(tagger)
  }
}

/// Evaluate with the built-in language table.
pub fn evaluate_answer(
  text: &str,
  config: &EvaluationConfig,
  language: &str,
) -> Result<ContentEvalResult, EvaluationError> {
  ContentEngine::default().evaluate(text, config, language)
}
