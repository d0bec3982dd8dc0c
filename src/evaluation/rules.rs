use regex::RegexBuilder;

use super::ContentEngine;
use crate::domain::{EvaluationConfig, KeywordCount, Keywords, Reason};
use crate::error::EvaluationError;
use crate::metrics::{count_keywords, has_verb, similarity_ratio};
use crate::text::tokenize;

/// Outcomes of the active rules that the correctness verdict looks at.
/// `None` means the rule was inactive.
#[derive(Debug, Default)]
pub(crate) struct RuleSignals {
  pub similarity: Option<u32>,
  pub all: Option<KeywordCount>,
  pub any_points: Option<f64>,
  pub banned_found: Option<usize>,
  pub regex_points: Option<f64>,
}

/// Running totals. `max_points` grows by each active rule's weight; banned
/// keywords only ever subtract from `points`.
#[derive(Debug, Default)]
pub(crate) struct Tally {
  pub points: f64,
  pub max_points: f64,
  pub reasons: Vec<Reason>,
  pub signals: RuleSignals,
}

impl Tally {
  fn award(&mut self, weight: f64, points: f64, reason: Reason) {
    self.points += points;
    self.max_points += weight;
    self.reasons.push(reason);
  }

  /// 0–100, or 0 when no rule contributed to the denominator.
  pub fn content_score(&self) -> u32 {
    if self.max_points <= 0.0 {
      return 0;
    }
    let pct = (self.points / self.max_points * 100.0).round();
    if pct.is_nan() {
      return 0;
    }
    pct.clamp(0.0, 100.0) as u32
  }
}

/// `round(ratio × weight)`, never above the weight itself.
fn scaled(ratio: f64, weight: f64) -> f64 {
  (ratio * weight).round().min(weight)
}

fn binary(pass: bool, weight: f64) -> f64 {
  if pass { weight } else { 0.0 }
}

/// Apply the rules in their fixed order. Order matters: the banned-keyword
/// penalty is capped by the points accumulated before it.
pub(crate) fn score_submission(
  engine: &ContentEngine,
  text: &str,
  config: &EvaluationConfig,
  language: &str,
) -> Result<Tally, EvaluationError> {
  let weights = config.weights.clamped();
  let mut tally = Tally::default();

  if let Some(expected) = config.expected() {
    let score = similarity_ratio(text, expected);
    let points = scaled(f64::from(score) / 100.0, weights.similarity);
    tally.award(
      weights.similarity,
      points,
      Reason::Similarity {
        score,
        threshold: config.similarity_threshold,
        weight: weights.similarity,
        points,
      },
    );
    tally.signals.similarity = Some(score);
  }

  if Keywords::is_active(&config.keywords.all) {
    let count = count_keywords(text, &config.keywords.all);
    let ratio = count.found as f64 / count.total as f64;
    let points = scaled(ratio, weights.all);
    tally.award(
      weights.all,
      points,
      Reason::All { found: count.found, total: count.total, weight: weights.all, points },
    );
    tally.signals.all = Some(count);
  }

  if Keywords::is_active(&config.keywords.any) {
    let count = count_keywords(text, &config.keywords.any);
    let at_least = config.any_at_least.max(1);
    let points = binary(count.found >= at_least, weights.any);
    tally.award(
      weights.any,
      points,
      Reason::Any { found: count.found, total: count.total, at_least, weight: weights.any, points },
    );
    tally.signals.any_points = Some(points);
  }

  if Keywords::is_active(&config.keywords.banned) {
    let count = count_keywords(text, &config.keywords.banned);
    let penalty = if count.found > 0 { tally.points.min(weights.penalty_banned) } else { 0.0 };
    tally.points -= penalty;
    tally
      .reasons
      .push(Reason::Banned { found: count.found, total: count.total, penalty });
    tally.signals.banned_found = Some(count.found);
  }

  let patterns: Vec<&str> = config.patterns().collect();
  if !patterns.is_empty() {
    let failed_pattern = first_failing_pattern(&patterns, text)?;
    let points = binary(failed_pattern.is_none(), weights.regex);
    tally.award(
      weights.regex,
      points,
      Reason::Regex { patterns: patterns.len(), failed_pattern, weight: weights.regex, points },
    );
    tally.signals.regex_points = Some(points);
  }

  if config.min_words > 0 || config.max_words > 0 {
    let words = tokenize(text).len();
    let pass = (config.min_words == 0 || words >= config.min_words)
      && (config.max_words == 0 || words <= config.max_words);
    let points = binary(pass, weights.length);
    tally.award(
      weights.length,
      points,
      Reason::Length {
        words,
        min: config.min_words,
        max: config.max_words,
        weight: weights.length,
        points,
      },
    );
  }

  if config.require_verb {
    let found = has_verb(text, language, &engine.languages, engine.tagger.as_deref());
    let points = binary(found, weights.verb);
    tally.award(
      weights.verb,
      points,
      Reason::RequireVerb { has_verb: found, weight: weights.verb, points },
    );
  }

  Ok(tally)
}

/// Patterns are compiled and tested in order, stopping at the first that does
/// not match; anything after it is never compiled, malformed or not.
fn first_failing_pattern(
  patterns: &[&str],
  text: &str,
) -> Result<Option<String>, EvaluationError> {
  for pattern in patterns {
    let re = RegexBuilder::new(pattern)
      .case_insensitive(true)
      .build()
      .map_err(|source| EvaluationError::InvalidPattern { pattern: pattern.to_string(), source })?;
    if !re.is_match(text) {
      return Ok(Some(pattern.to_string()));
    }
  }
  Ok(None)
}
