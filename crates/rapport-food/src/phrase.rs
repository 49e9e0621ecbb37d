//! Normalised phrase index.
//!
//! Free text is reduced to a stream of lowercase alphanumeric tokens; known
//! phrases are stored as token sequences keyed by their first token. Scanning
//! takes the longest phrase at each position, so "peanut butter" is one match
//! rather than "peanut" plus "butter", and "egg" never matches inside
//! "eggplant".

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

/// A run of letters or digits.
static TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+").unwrap());

/// Split `text` into lowercase tokens. Apostrophes are dropped so that
/// "shepherd's pie" and "shepherds pie" agree; every other non-alphanumeric
/// character separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
  let text = text.replace(['\'', '\u{2019}'], "");
  TOKEN_RE
    .find_iter(&text)
    .map(|m| m.as_str().to_lowercase())
    .collect()
}

/// The canonical key for a phrase: its tokens joined by single spaces.
pub fn phrase_key(text: &str) -> String { tokenize(text).join(" ") }

/// A phrase found by [`PhraseIndex::scan`].
#[derive(Debug, Clone, Copy)]
pub struct PhraseMatch<'a, V> {
  /// Index of the first matched token.
  pub start: usize,
  /// Number of tokens matched.
  pub len:   usize,
  pub value: &'a V,
}

#[derive(Debug, Clone)]
pub struct PhraseIndex<V> {
  entries: Vec<(Vec<String>, V)>,
  by_head: HashMap<String, Vec<usize>>,
  exact:   HashMap<String, usize>,
}

impl<V> Default for PhraseIndex<V> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
      by_head: HashMap::new(),
      exact:   HashMap::new(),
    }
  }
}

impl<V> PhraseIndex<V> {
  /// Insert `phrase`, replacing any value already stored under the same
  /// normalised key. Phrases with no tokens are ignored.
  pub fn insert(&mut self, phrase: &str, value: V) {
    let tokens = tokenize(phrase);
    if tokens.is_empty() {
      return;
    }
    let key = tokens.join(" ");
    if let Some(&i) = self.exact.get(&key) {
      self.entries[i].1 = value;
      return;
    }
    let i = self.entries.len();
    self.by_head.entry(tokens[0].clone()).or_default().push(i);
    self.exact.insert(key, i);
    self.entries.push((tokens, value));
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Look up a phrase that must match in full.
  pub fn get(&self, phrase: &str) -> Option<&V> {
    self
      .exact
      .get(&phrase_key(phrase))
      .map(|&i| &self.entries[i].1)
  }

  /// Find every non-overlapping phrase in `tokens`, preferring the longest
  /// phrase at each position.
  pub fn scan<'a>(&'a self, tokens: &[String]) -> Vec<PhraseMatch<'a, V>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
      match self.longest_at(tokens, pos) {
        Some((len, value)) => {
          found.push(PhraseMatch {
            start: pos,
            len,
            value,
          });
          pos += len;
        }
        None => pos += 1,
      }
    }
    found
  }

  fn longest_at(&self, tokens: &[String], pos: usize) -> Option<(usize, &V)> {
    let candidates = self.by_head.get(&tokens[pos])?;
    candidates
      .iter()
      .map(|&i| &self.entries[i])
      .filter(|(phrase, _)| tokens[pos..].starts_with(phrase))
      .max_by_key(|(phrase, _)| phrase.len())
      .map(|(phrase, value)| (phrase.len(), value))
  }
}

impl<V, P: AsRef<str>> FromIterator<(P, V)> for PhraseIndex<V> {
  fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
    let mut index = Self::default();
    for (phrase, value) in iter {
      index.insert(phrase.as_ref(), value);
    }
    index
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokenize_normalises_case_and_punctuation() {
    assert_eq!(tokenize("  Mac-&-Cheese!! "), vec!["mac", "cheese"]);
    assert_eq!(tokenize("Shepherd's Pie"), vec!["shepherds", "pie"]);
    assert!(tokenize(" \t ").is_empty());
  }

  #[test]
  fn scan_prefers_longest_phrase() {
    let index: PhraseIndex<u8> =
      [("peanut", 1), ("butter", 2), ("peanut butter", 3)]
        .into_iter()
        .collect();
    let tokens = tokenize("peanut butter and butter");
    let values: Vec<u8> =
      index.scan(&tokens).iter().map(|m| *m.value).collect();
    assert_eq!(values, vec![3, 2]);
  }

  #[test]
  fn scan_matches_whole_tokens_only() {
    let index: PhraseIndex<()> = [("egg", ())].into_iter().collect();
    assert!(index.scan(&tokenize("grilled eggplant")).is_empty());
    assert_eq!(index.scan(&tokenize("fried egg")).len(), 1);
  }

  #[test]
  fn insert_replaces_same_key() {
    let mut index = PhraseIndex::default();
    index.insert("Ice Cream", 1);
    index.insert("ice   cream", 2);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("ICE CREAM"), Some(&2));
  }
}
