//! Properties that hold for every text/config pair.

use answer_grader::domain::{EvaluationConfig, Keywords, RuleWeights};
use answer_grader::{evaluate_answer, ContentEngine};

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

fn configs() -> Vec<EvaluationConfig> {
  vec![
    EvaluationConfig::default(),
    EvaluationConfig { expected_answer: Some("The cat sat on the mat".into()), ..Default::default() },
    EvaluationConfig {
      keywords: Keywords { all: strings(&["cat", "mat"]), any: strings(&["sat", "lay"]), banned: strings(&["dog"]) },
      any_at_least: 1,
      ..Default::default()
    },
    EvaluationConfig {
      keywords: Keywords { all: vec![], any: vec![], banned: strings(&["cat", "the"]) },
      regex: strings(&[r"\bmat\b"]),
      min_words: 3,
      max_words: 8,
      require_verb: true,
      weights: RuleWeights { penalty_banned: 1000.0, ..Default::default() },
      ..Default::default()
    },
    EvaluationConfig {
      expected_answer: Some("Le chat est sur le tapis".into()),
      keywords: Keywords { all: strings(&["chat"]), any: vec![], banned: strings(&["chien"]) },
      require_verb: true,
      weights: RuleWeights {
        similarity: 0.0,
        all: 0.0,
        any: 0.0,
        regex: 0.0,
        length: 0.0,
        verb: 0.0,
        penalty_banned: 0.0,
      },
      ..Default::default()
    },
  ]
}

const TEXTS: &[&str] = &[
  "",
  "The cat sat on the mat.",
  "A dog lay on the MAT",
  "Le chat est sur le tapis.",
  "cat cat cat cat dog dog dog dog",
  "¿Dónde está el gato?",
];

#[test]
fn content_score_stays_within_bounds() {
  for cfg in configs() {
    for lang in ["en", "fr", "es", "und"] {
      for text in TEXTS {
        let out = evaluate_answer(text, &cfg, lang).expect("evaluation");
        assert!(out.content_score <= 100, "{text:?} {cfg:?}");
      }
    }
  }
}

#[test]
fn repeated_evaluation_is_identical() {
  let engine = ContentEngine::default();
  for cfg in configs() {
    for text in TEXTS {
      let first = engine.evaluate(text, &cfg, "en").expect("first");
      let second = engine.evaluate(text, &cfg, "en").expect("second");
      assert_eq!(first, second);
    }
  }
}

#[test]
fn huge_banned_penalty_never_goes_negative() {
  let cfgs = configs();
  let cfg = &cfgs[3];
  let out = evaluate_answer("the cat sat on the mat", cfg, "en").expect("evaluation");
  let banned = out
    .reasons
    .iter()
    .find_map(|r| match r {
      answer_grader::Reason::Banned { penalty, .. } => Some(*penalty),
      _ => None,
    })
    .expect("banned reason");
  assert_eq!(banned, 0.0, "nothing accumulated before the banned rule");
  assert!(!out.is_correct);
}

#[test]
fn zero_weights_give_zero_score() {
  let cfgs = configs();
  let out = evaluate_answer("Le chat est sur le tapis.", &cfgs[4], "fr").expect("evaluation");
  assert_eq!(out.content_score, 0);
  assert!(out.is_correct);
  assert_eq!(out.reasons.len(), 4);
}
