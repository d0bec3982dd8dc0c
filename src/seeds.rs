//! Built-in defaults that keep the grader useful without any external config:
//! language profiles and the fallback rubric.

use std::collections::HashMap;

use crate::domain::RubricWeights;
use crate::language::{LanguageProfile, VerbHeuristic};

pub const DEFAULT_RUBRIC: &str = "default";

fn words(list: &[&str]) -> Vec<String> {
  list.iter().map(|w| w.to_string()).collect()
}

/// Rubric used when the caller names none, or names one we do not know.
pub fn seed_rubrics() -> HashMap<String, RubricWeights> {
  let mut m = HashMap::new();
  m.insert(DEFAULT_RUBRIC.to_string(), RubricWeights::default());
  m.insert(
    "essay".to_string(),
    RubricWeights { content: 25.0, organization: 25.0, lexis: 20.0, grammar: 20.0, mechanics: 10.0 },
  );
  m.insert(
    "short_answer".to_string(),
    RubricWeights { content: 60.0, organization: 0.0, lexis: 10.0, grammar: 20.0, mechanics: 10.0 },
  );
  m
}

pub fn seed_language_profiles() -> HashMap<String, LanguageProfile> {
  let mut m = HashMap::new();

  m.insert(
    "fr".to_string(),
    LanguageProfile {
      connectors: words(&[
        "d'abord", "ensuite", "puis", "enfin", "finalement", "cependant", "pourtant", "toutefois",
        "donc", "ainsi", "alors", "en effet", "de plus", "par exemple", "par consequent",
        "en conclusion", "parce que", "mais",
      ]),
      stop_words: words(&[
        "le", "la", "les", "l'", "un", "une", "des", "de", "du", "d'", "et", "ou", "a", "au", "aux",
        "en", "dans", "sur", "pour", "par", "avec", "que", "qui", "ce", "ces", "se", "ne", "pas",
        "je", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles",
      ]),
      verbs: Vec::new(),
      verb_heuristic: Some(VerbHeuristic {
        auxiliaries: words(&[
          "suis", "es", "est", "sommes", "etes", "sont", "etais", "etait", "etions", "etaient",
          "serai", "sera", "seront", "ai", "as", "avons", "avez", "ont", "avais", "avait",
          "avaient", "aura", "auront", "vais", "vas", "va", "allons", "allez", "vont", "fait",
          "font", "peux", "peut", "peuvent", "dois", "doit", "doivent", "veux", "veut", "veulent",
        ]),
        endings: words(&[
          "er", "ir", "ez", "ons", "ent", "ais", "ait", "aient", "ions", "iez", "erai", "erait",
          "ee",
        ]),
        pronouns: words(&["je", "j'", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles"]),
        clitics: words(&[
          "ne", "n'", "me", "m'", "te", "t'", "se", "s'", "le", "la", "les", "l'", "lui", "leur",
          "y", "en",
        ]),
        non_verbs: words(&[
          "un", "une", "des", "du", "de", "d'", "au", "aux", "ce", "cet", "cette", "ces", "mon",
          "ma", "mes", "ton", "ta", "tes", "son", "sa", "ses", "notre", "nos", "votre", "vos",
          "et", "ou", "mais", "dans", "sur", "sous", "pour", "par", "avec", "sans", "chez",
        ]),
      }),
    },
  );

  m.insert(
    "en".to_string(),
    LanguageProfile {
      connectors: words(&[
        "first", "second", "then", "next", "finally", "however", "therefore", "moreover",
        "furthermore", "in addition", "for example", "for instance", "in conclusion", "because",
        "although", "consequently", "meanwhile", "on the other hand",
      ]),
      stop_words: words(&[
        "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "with", "is",
        "are", "was", "were", "it", "this", "that", "i", "you", "he", "she", "we", "they",
      ]),
      verbs: words(&[
        "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
        "does", "did", "go", "goes", "went", "gone", "make", "makes", "made", "eat", "eats", "ate",
        "like", "likes", "liked", "want", "wants", "wanted", "think", "thinks", "thought", "see",
        "sees", "saw", "know", "knows", "knew", "get", "gets", "got", "take", "takes", "took",
        "come", "comes", "came", "say", "says", "said", "sit", "sits", "sat", "run", "runs", "ran",
        "play", "plays", "played", "write", "writes", "wrote", "read", "reads", "live", "lives",
        "lived", "work", "works", "worked", "study", "studies", "studied", "can", "will", "would",
        "should", "must", "need", "needs", "love", "loves", "use", "uses", "used",
      ]),
      verb_heuristic: None,
    },
  );

  m.insert(
    "es".to_string(),
    LanguageProfile {
      connectors: words(&[
        "primero", "luego", "despues", "entonces", "finalmente", "sin embargo", "ademas",
        "por ejemplo", "por lo tanto", "en conclusion", "porque", "aunque",
      ]),
      stop_words: words(&[
        "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "y", "o", "en", "a",
        "al", "con", "por", "para", "que", "se", "no", "yo", "tu", "el", "ella", "nosotros",
      ]),
      verbs: words(&[
        "es", "son", "soy", "eres", "somos", "esta", "estan", "estoy", "hay", "tengo", "tiene",
        "tienen", "voy", "va", "van", "quiero", "quiere", "como", "come", "vivo", "vive", "hago",
        "hace", "fue", "era", "puedo", "puede",
      ]),
      verb_heuristic: None,
    },
  );

  m
}
