use super::rules::RuleSignals;
use crate::domain::EvaluationConfig;

/// With an expected answer, only similarity decides. Otherwise every active
/// gating rule must pass; inactive rules are vacuously satisfied.
pub(crate) fn decide_correct(config: &EvaluationConfig, signals: &RuleSignals) -> bool {
  if config.expected().is_some() {
    return signals
      .similarity
      .map(|score| f64::from(score) >= config.similarity_threshold)
      .unwrap_or(false);
  }

  let all_ok = signals
    .all
    .as_ref()
    .map(|c| c.found == c.total)
    .unwrap_or(true);
  let any_ok = signals.any_points.map(|p| p > 0.0).unwrap_or(true);
  let banned_ok = signals.banned_found.map(|n| n == 0).unwrap_or(true);
  let regex_ok = signals.regex_points.map(|p| p > 0.0).unwrap_or(true);

  all_ok && any_ok && banned_ok && regex_ok
}
