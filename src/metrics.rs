//! Metric primitives: string similarity, keyword counting, verb presence,
//! lexical richness and organization measurements.
//!
//! All functions are pure. Keyword and connector matching is substring based
//! on normalized text, so "cat" also matches inside "category".

use std::collections::{HashMap, HashSet};

use crate::domain::{KeywordCount, OrganizationMetrics, Repetition, TypeTokenRatio};
use crate::language::{LanguageTable, VerbTagger};
use crate::text::{normalize, tokenize};

/// Tokens occurring at least this often are "repeated".
pub const REPEAT_THRESHOLD: usize = 4;
const REPEAT_TOP: usize = 5;
const REPEAT_PENALTY_STEP: u32 = 10;
const REPEAT_PENALTY_CAP: u32 = 40;
/// TTR at or above this saturates the score.
const TTR_SATURATION: f64 = 0.5;
const PARAGRAPH_SATURATION: f64 = 3.0;
const CONNECTOR_STEP: u32 = 25;

/// Sørensen–Dice coefficient over character bigrams of the normalized texts,
/// scaled to 0–100. Either side empty gives 0.
pub fn similarity_ratio(a: &str, b: &str) -> u32 {
  let a = normalize(a);
  let b = normalize(b);
  if a.is_empty() || b.is_empty() {
    return 0;
  }
  if a == b {
    return 100;
  }

  let left = bigrams(&a);
  let right = bigrams(&b);
  if left.is_empty() || right.is_empty() {
    return 0;
  }

  let mut pool: HashMap<(char, char), usize> = HashMap::new();
  for bg in &left {
    *pool.entry(*bg).or_default() += 1;
  }
  let mut shared = 0usize;
  for bg in &right {
    if let Some(n) = pool.get_mut(bg) {
      if *n > 0 {
        *n -= 1;
        shared += 1;
      }
    }
  }

  let dice = (2 * shared) as f64 / (left.len() + right.len()) as f64;
  (dice * 100.0).round() as u32
}

fn bigrams(s: &str) -> Vec<(char, char)> {
  let chars: Vec<char> = s.chars().collect();
  chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Count how many keywords occur in `text`. `total` is the list length, blank
/// entries included; `pct` is `None` for an empty list.
pub fn count_keywords(text: &str, list: &[String]) -> KeywordCount {
  let haystack = normalize(text);
  let found = list
    .iter()
    .map(|k| normalize(k))
    .filter(|k| !k.is_empty() && haystack.contains(k.as_str()))
    .count();
  let total = list.len();
  let pct = if total == 0 {
    None
  } else {
    Some((found as f64 / total as f64 * 100.0).round() as u32)
  };
  KeywordCount { found, total, pct }
}

/// Verb presence. A tagger that covers the language is asked first; the
/// language's heuristic (French only, out of the box) is the fallback.
pub fn has_verb(
  text: &str,
  language: &str,
  table: &LanguageTable,
  tagger: Option<&dyn VerbTagger>,
) -> bool {
  let tokens = tokenize(text);
  if tokens.is_empty() {
    return false;
  }
  if tagger.and_then(|t| t.detect_verb(&tokens, language)) == Some(true) {
    return true;
  }
  table
    .profile(language)
    .verb_heuristic
    .as_ref()
    .map(|h| h.matches(&tokens))
    .unwrap_or(false)
}

pub fn type_token_ratio(tokens: &[String]) -> TypeTokenRatio {
  if tokens.is_empty() {
    return TypeTokenRatio { ttr: 0.0, ttr_score: 0 };
  }
  let distinct: HashSet<&String> = tokens.iter().collect();
  let ttr = distinct.len() as f64 / tokens.len() as f64;
  let ttr_score = ((ttr / TTR_SATURATION).min(1.0) * 100.0).round() as u32;
  TypeTokenRatio { ttr, ttr_score }
}

/// Frequency of each token, skipping stop-words.
pub fn token_frequencies(tokens: &[String], stop_words: &[String]) -> HashMap<String, usize> {
  let stop: HashSet<String> = stop_words.iter().map(|w| normalize(w)).collect();
  let mut freq = HashMap::new();
  for t in tokens.iter().filter(|t| !stop.contains(*t)) {
    *freq.entry(t.clone()).or_insert(0usize) += 1;
  }
  freq
}

/// Penalty of 10 per repeated token, capped at 40. The reported list holds at
/// most five tokens, most frequent first, ties broken alphabetically.
pub fn repetition_penalty(frequencies: &HashMap<String, usize>) -> Repetition {
  let mut repeated: Vec<(&String, usize)> = frequencies
    .iter()
    .filter(|(_, n)| **n >= REPEAT_THRESHOLD)
    .map(|(t, n)| (t, *n))
    .collect();
  repeated.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

  let penalty = (repeated.len() as u32 * REPEAT_PENALTY_STEP).min(REPEAT_PENALTY_CAP);
  let repeated_top = repeated.iter().take(REPEAT_TOP).map(|(t, _)| (*t).clone()).collect();
  Repetition { repeated_top, penalty }
}

/// Paragraphs are blocks of non-blank lines separated by at least one blank
/// line; there is always at least one.
pub fn count_paragraphs(text: &str) -> usize {
  let mut blocks = 0usize;
  let mut in_block = false;
  for line in text.lines() {
    if line.trim().is_empty() {
      in_block = false;
    } else if !in_block {
      in_block = true;
      blocks += 1;
    }
  }
  blocks.max(1)
}

pub fn organization_score(text: &str, connectors: &[String]) -> OrganizationMetrics {
  let paragraphs = count_paragraphs(text);
  let haystack = normalize(text);
  let distinct: HashSet<String> = connectors
    .iter()
    .map(|c| normalize(c))
    .filter(|c| !c.is_empty())
    .collect();
  let found_connectors = distinct.iter().filter(|c| haystack.contains(c.as_str())).count();

  let para_score = ((paragraphs as f64 / PARAGRAPH_SATURATION * 100.0).round() as u32).min(100);
  let conn_score = (found_connectors as u32).saturating_mul(CONNECTOR_STEP).min(100);
  OrganizationMetrics { paragraphs, found_connectors, para_score, conn_score }
}
