//! Domain models: evaluation configuration, per-rule reasons, rubric weights,
//! grammar findings and the metric objects reported back to callers.

use serde::{Deserialize, Deserializer, Serialize};

/// How one submission should be graded. Every field is optional on the wire;
/// an absent field simply leaves its rule inactive.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationConfig {
  pub expected_answer: Option<String>,
  pub similarity_threshold: f64,
  pub keywords: Keywords,
  #[serde(deserialize_with = "lenient_count")]
  pub any_at_least: usize,
  pub regex: Vec<String>,
  #[serde(deserialize_with = "lenient_count")]
  pub min_words: usize,
  #[serde(deserialize_with = "lenient_count")]
  pub max_words: usize,
  pub require_verb: bool,
  pub weights: RuleWeights,
}

impl Default for EvaluationConfig {
  fn default() -> Self {
    Self {
      expected_answer: None,
      similarity_threshold: 70.0,
      keywords: Keywords::default(),
      any_at_least: 0,
      regex: Vec::new(),
      min_words: 0,
      max_words: 0,
      require_verb: false,
      weights: RuleWeights::default(),
    }
  }
}

/// Counts arrive as JSON numbers of any shape: fractions round, negatives
/// mean "unset".
fn lenient_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
  D: Deserializer<'de>,
{
  let n = f64::deserialize(deserializer)?;
  if n.is_nan() || n <= 0.0 {
    return Ok(0);
  }
  Ok(n.round().min(usize::MAX as f64) as usize)
}

impl EvaluationConfig {
  /// Expected answer, if one was supplied and it is not blank.
  pub fn expected(&self) -> Option<&str> {
    self
      .expected_answer
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
  }

  /// Configured regex patterns, ignoring blank entries.
  pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
    self.regex.iter().map(String::as_str).filter(|p| !p.trim().is_empty())
  }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Keywords {
  pub all: Vec<String>,
  pub any: Vec<String>,
  pub banned: Vec<String>,
}

impl Keywords {
  /// A keyword list activates its rule only if it holds a non-blank entry.
  pub fn is_active(list: &[String]) -> bool {
    list.iter().any(|k| !k.trim().is_empty())
  }
}

/// Point budget per rule kind. `penalty_banned` is only ever subtracted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleWeights {
  pub similarity: f64,
  pub all: f64,
  pub any: f64,
  pub regex: f64,
  pub length: f64,
  pub verb: f64,
  pub penalty_banned: f64,
}

impl Default for RuleWeights {
  fn default() -> Self {
    Self {
      similarity: 50.0,
      all: 20.0,
      any: 10.0,
      regex: 10.0,
      length: 5.0,
      verb: 5.0,
      penalty_banned: 15.0,
    }
  }
}

/// Largest weight a rule can carry; seven of them still sum to a finite total.
pub const WEIGHT_CEILING: f64 = f64::MAX / 16.0;

impl RuleWeights {
  /// Weights as scored: negatives and NaN become 0, huge values are capped
  /// at `WEIGHT_CEILING`.
  pub fn clamped(&self) -> Self {
    fn clamp(w: f64) -> f64 {
      if w.is_nan() || w <= 0.0 { 0.0 } else { w.min(WEIGHT_CEILING) }
    }
    Self {
      similarity: clamp(self.similarity),
      all: clamp(self.all),
      any: clamp(self.any),
      regex: clamp(self.regex),
      length: clamp(self.length),
      verb: clamp(self.verb),
      penalty_banned: clamp(self.penalty_banned),
    }
  }
}

/// Audit record for one evaluated rule, in evaluation order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Reason {
  Similarity { score: u32, threshold: f64, weight: f64, points: f64 },
  All { found: usize, total: usize, weight: f64, points: f64 },
  Any { found: usize, total: usize, at_least: usize, weight: f64, points: f64 },
  Banned { found: usize, total: usize, penalty: f64 },
  Regex { patterns: usize, failed_pattern: Option<String>, weight: f64, points: f64 },
  Length { words: usize, min: usize, max: usize, weight: f64, points: f64 },
  RequireVerb { has_verb: bool, weight: f64, points: f64 },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentEvalResult {
  pub content_score: u32,
  pub is_correct: bool,
  pub reasons: Vec<Reason>,
}

/// Pillar weights in percent. They are not renormalized.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RubricWeights {
  pub content: f64,
  pub organization: f64,
  pub lexis: f64,
  pub grammar: f64,
  pub mechanics: f64,
}

impl Default for RubricWeights {
  fn default() -> Self {
    Self { content: 30.0, organization: 20.0, lexis: 20.0, grammar: 20.0, mechanics: 10.0 }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rubric {
  pub name: String,
  pub weights: RubricWeights,
}

/// One issue reported by the grammar checker.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrammarFinding {
  pub issue_category: String,
  #[serde(default)]
  pub issue_type: Option<String>,
  pub offset: usize,
  pub length: usize,
  pub message: String,
  #[serde(default)]
  pub replacements: Vec<String>,
}

impl GrammarFinding {
  /// Spelling-type findings feed the mechanics pillar; everything else is grammar.
  pub fn is_spelling(&self) -> bool {
    let category = self.issue_category.to_uppercase();
    category.contains("TYPO")
      || category.contains("SPELL")
      || self.issue_type.as_deref() == Some("misspelling")
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCount {
  pub found: usize,
  pub total: usize,
  pub pct: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeTokenRatio {
  pub ttr: f64,
  pub ttr_score: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Repetition {
  pub repeated_top: Vec<String>,
  pub penalty: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMetrics {
  pub paragraphs: usize,
  pub found_connectors: usize,
  pub para_score: u32,
  pub conn_score: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LexisMetrics {
  pub tokens: usize,
  pub ttr: f64,
  pub ttr_score: u32,
  pub repeated_top: Vec<String>,
  pub penalty: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrammarMetrics {
  pub grammar_errors: usize,
  pub spelling_errors: usize,
  pub lt_error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RubricBreakdown {
  pub content: u32,
  pub organization: u32,
  pub lexis: u32,
  pub grammar: u32,
  pub mechanics: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RubricDetails {
  /// Raw semantic similarity; `None` when skipped or unavailable.
  pub semantic: Option<u32>,
  pub organization: OrganizationMetrics,
  pub lexis: LexisMetrics,
  pub grammar: GrammarMetrics,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RubricResult {
  pub rubric: String,
  pub overall: i64,
  pub breakdown: RubricBreakdown,
  pub details: RubricDetails,
}
