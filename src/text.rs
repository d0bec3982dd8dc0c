//! Text normalization shared by every scoring rule.
//!
//! `normalize` folds case, strips diacritics and punctuation and collapses
//! whitespace. `tokenize` splits the normalized form into words. Both work on
//! `char`s, so accented and non-Latin scripts survive intact.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-case, decompose (NFD), drop combining marks, replace anything that is
/// not a letter/number/space/apostrophe/hyphen with a space, collapse runs of
/// whitespace and trim.
pub fn normalize(text: &str) -> String {
  let folded: String = text
    .to_lowercase()
    .nfd()
    .filter(|c| !is_combining_mark(*c))
    .map(|c| if is_word_char(c) { c } else { ' ' })
    .collect();

  folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into words. Never yields empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
  normalize(text)
    .split_whitespace()
    .map(str::to_string)
    .collect()
}

fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c.is_whitespace() || matches!(c, '\'' | '’' | '-')
}

/// Log-safe truncation for large strings, on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}
