//! Per-language lookup table: connectors, stop-words, verb lexicon and the
//! lexicon-free verb heuristic. Unknown tags resolve to an empty fallback
//! profile, so nothing language-specific leaks into the scoring code.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::seeds::seed_language_profiles;
use crate::text::normalize;

/// Everything the scorer needs to know about one language.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LanguageProfile {
  pub connectors: Vec<String>,
  pub stop_words: Vec<String>,
  /// Lexicon backing the `LexiconTagger` capability.
  pub verbs: Vec<String>,
  pub verb_heuristic: Option<VerbHeuristic>,
}

/// Fallback verb spotting used when the tagger finds nothing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerbHeuristic {
  /// Auxiliary and very frequent verb forms, matched as whole tokens.
  pub auxiliaries: Vec<String>,
  /// Verb-ending fragments, matched at the end of tokens long enough to carry them.
  pub endings: Vec<String>,
  /// Subject pronouns. The first token after a pronoun (skipping `clitics`)
  /// sits in verb position, unless it is one of `non_verbs`.
  pub pronouns: Vec<String>,
  /// Negation and object pronouns allowed between subject and verb.
  pub clitics: Vec<String>,
  /// Determiners and prepositions that cannot open a verb slot.
  pub non_verbs: Vec<String>,
}

impl VerbHeuristic {
  pub fn matches(&self, tokens: &[String]) -> bool {
    let aux: HashSet<String> = self.auxiliaries.iter().map(|a| normalize(a)).collect();
    if tokens.iter().any(|t| aux.contains(t)) {
      return true;
    }

    let pronouns: HashSet<String> = self.pronouns.iter().map(|p| normalize(p)).collect();
    let clitics: HashSet<String> = self.clitics.iter().map(|c| normalize(c)).collect();
    let non_verbs: HashSet<String> = self.non_verbs.iter().map(|n| normalize(n)).collect();
    for (i, tok) in tokens.iter().enumerate() {
      if pronouns.contains(tok) {
        let slot = tokens[i + 1..].iter().find(|t| !clitics.contains(*t));
        if slot.is_some_and(|t| !non_verbs.contains(t.as_str()) && !pronouns.contains(t.as_str())) {
          return true;
        }
      }
      // Elided pronoun glued to its verb ("j'aime").
      if let Some((head, rest)) = tok.split_once(['\'', '’']) {
        if pronouns.contains(&format!("{head}'")) && !rest.is_empty() {
          return true;
        }
      }
    }

    let endings: Vec<String> = self
      .endings
      .iter()
      .map(|e| normalize(e))
      .filter(|e| !e.is_empty())
      .collect();
    tokens.iter().any(|t| {
      let len = t.chars().count();
      endings
        .iter()
        .any(|e| len >= e.chars().count() + 3 && t.ends_with(e.as_str()))
    })
  }
}

/// Immutable table of language profiles keyed by primary subtag.
#[derive(Clone, Debug, Default)]
pub struct LanguageTable {
  profiles: HashMap<String, LanguageProfile>,
  fallback: LanguageProfile,
}

impl LanguageTable {
  pub fn new(profiles: HashMap<String, LanguageProfile>) -> Self {
    let profiles = profiles
      .into_iter()
      .map(|(tag, p)| (primary_subtag(&tag), p))
      .collect();
    Self { profiles, fallback: LanguageProfile::default() }
  }

  /// Built-in profiles, with `overrides` replacing whole entries by tag.
  pub fn with_overrides(overrides: HashMap<String, LanguageProfile>) -> Self {
    let mut profiles = seed_language_profiles();
    for (tag, p) in overrides {
      profiles.insert(primary_subtag(&tag), p);
    }
    Self::new(profiles)
  }

  pub fn builtin() -> Self {
    Self::new(seed_language_profiles())
  }

  pub fn profile(&self, language: &str) -> &LanguageProfile {
    self.profiles.get(&primary_subtag(language)).unwrap_or(&self.fallback)
  }

  pub fn languages(&self) -> impl Iterator<Item = (&str, &LanguageProfile)> + '_ {
    self.profiles.iter().map(|(k, v)| (k.as_str(), v))
  }
}

/// `fr-FR`, `FR_ca` and `fr` all resolve to `fr`.
pub fn primary_subtag(tag: &str) -> String {
  tag
    .trim()
    .split(['-', '_'])
    .next()
    .unwrap_or_default()
    .to_lowercase()
}

/// Structural verb detection offered by a language-processing capability.
///
/// Returns `None` when the capability does not cover `language`.
pub trait VerbTagger: Send + Sync {
  fn detect_verb(&self, tokens: &[String], language: &str) -> Option<bool>;
}

/// Verb tagger backed by the per-language verb lexicons of a `LanguageTable`.
#[derive(Clone, Debug, Default)]
pub struct LexiconTagger {
  lexicons: HashMap<String, HashSet<String>>,
}

impl LexiconTagger {
  pub fn from_table(table: &LanguageTable) -> Self {
    let lexicons = table
      .languages()
      .filter(|(_, p)| !p.verbs.is_empty())
      .map(|(tag, p)| (tag.to_string(), p.verbs.iter().map(|v| normalize(v)).collect()))
      .collect();
    Self { lexicons }
  }
}

impl VerbTagger for LexiconTagger {
  fn detect_verb(&self, tokens: &[String], language: &str) -> Option<bool> {
    let lexicon = self.lexicons.get(&primary_subtag(language))?;
    Some(tokens.iter().any(|t| lexicon.contains(t)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::text::tokenize;

  #[test]
  fn primary_subtag_folds_region_and_case() {
    assert_eq!(primary_subtag("fr-FR"), "fr");
    assert_eq!(primary_subtag("EN_us"), "en");
    assert_eq!(primary_subtag(""), "");
  }

  #[test]
  fn unknown_language_uses_empty_fallback() {
    let table = LanguageTable::builtin();
    let p = table.profile("xx");
    assert!(p.connectors.is_empty());
    assert!(p.verb_heuristic.is_none());
    assert!(!table.profile("fr-CA").connectors.is_empty());
  }

  #[test]
  fn overrides_replace_builtin_profiles() {
    let mut over = HashMap::new();
    over.insert(
      "EN".to_string(),
      LanguageProfile { connectors: vec!["whereupon".into()], ..Default::default() },
    );
    let table = LanguageTable::with_overrides(over);
    assert_eq!(table.profile("en").connectors, vec!["whereupon".to_string()]);
    assert!(!table.profile("fr").connectors.is_empty());
  }

  #[test]
  fn french_heuristic_finds_pronoun_aux_and_endings() {
    let table = LanguageTable::builtin();
    let h = table.profile("fr").verb_heuristic.clone().expect("fr heuristic");
    assert!(h.matches(&tokenize("Je mange une pomme.")));
    assert!(h.matches(&tokenize("Le chat est noir")));
    assert!(h.matches(&tokenize("J'aime le chocolat")));
    assert!(h.matches(&tokenize("Pour demain : travailler")));
    assert!(!h.matches(&tokenize("Une pomme rouge")));
  }

  #[test]
  fn french_pronoun_needs_a_verb_slot() {
    let table = LanguageTable::builtin();
    let h = table.profile("fr").verb_heuristic.clone().expect("fr heuristic");
    assert!(!h.matches(&tokenize("Je une pomme")));
    assert!(!h.matches(&tokenize("Il dans la maison")));
    assert!(!h.matches(&tokenize("Moi et toi, je")));
    assert!(h.matches(&tokenize("Je ne mange pas")));
    assert!(h.matches(&tokenize("Il la regarde")));
    assert!(h.matches(&tokenize("Nous mangeons")));
  }

  #[test]
  fn lexicon_tagger_covers_only_languages_with_lexicons() {
    let table = LanguageTable::builtin();
    let tagger = LexiconTagger::from_table(&table);
    assert_eq!(tagger.detect_verb(&tokenize("The cat sat"), "en"), Some(true));
    assert_eq!(tagger.detect_verb(&tokenize("A red apple"), "en-GB"), Some(false));
    assert_eq!(tagger.detect_verb(&tokenize("Je mange"), "fr"), None);
    assert_eq!(tagger.detect_verb(&tokenize("anything"), "de"), None);
  }
}
