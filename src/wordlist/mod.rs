//! BIP-39 wordlist with fuzzy (Damerau–Levenshtein OSA) neighbor lookup.
//!
//! The default English BIP-39 list is embedded in the binary; a caller may
//! also build a [`Wordlist`] from an arbitrary sequence of lines, e.g. one
//! read from a file by a CLI front-end.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

const ENGLISH: &str = include_str!("raw/english.txt");

/// Number of words a valid BIP-39 wordlist must contain.
pub const SIZE: usize = 2048;

/// Errors raised while constructing a [`Wordlist`].
#[derive(Error, Debug)]
pub enum WordlistError {
    /// The given line sequence did not contain exactly [`SIZE`] words.
    #[error("wordlist must contain exactly {SIZE} words, got {0}")]
    WrongSize(usize),
    /// The given line sequence contained a duplicate word.
    #[error("duplicate word in wordlist: {0}")]
    Duplicate(String),
}

/// An ordered, immutable list of exactly 2048 BIP-39 words.
///
/// Index ↔ word is a bijection on `[0, 2047]`.
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    index: OnceLock<HashMap<String, usize>>,
}

impl Default for Wordlist {
    /// Load the embedded BIP-39 English wordlist.
    fn default() -> Self {
        Self::english()
    }
}

impl Wordlist {
    /// Load the embedded BIP-39 English wordlist.
    pub fn english() -> Self {
        Self {
            words: ENGLISH.split_whitespace().map(String::from).collect(),
            index: OnceLock::new(),
        }
    }

    /// Build a wordlist from an already-read sequence of lines.
    ///
    /// Each line is stripped of surrounding whitespace; blank lines are
    /// rejected, as is any count other than exactly [`SIZE`] words.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, WordlistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if words.len() != SIZE {
            return Err(WordlistError::WrongSize(words.len()));
        }
        for (i, w) in words.iter().enumerate() {
            if words[..i].contains(w) {
                return Err(WordlistError::Duplicate(w.clone()));
            }
        }
        Ok(Self {
            words,
            index: OnceLock::new(),
        })
    }

    /// Number of words in the list (always [`SIZE`]).
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// A wordlist is never empty; present for clippy's `len_without_is_empty`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the words, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Get the index for a given word.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        let dic = self.index.get_or_init(|| {
            self.words
                .iter()
                .enumerate()
                .map(|(i, w)| (w.clone(), i))
                .collect()
        });
        dic.get(word).copied()
    }

    /// Get the word at a given index.
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Check whether a word is in the list.
    pub fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    /// Get the closest words in the list to `word`, up to OSA edit distance
    /// `max_distance`.
    ///
    /// If `word` is itself in the list, the initial neighborhood is just
    /// `{word}`; otherwise it is every wordlist entry tied for minimum OSA
    /// distance to `word`. With `max_distance == 0` the initial neighborhood
    /// is returned (in wordlist order); otherwise every wordlist entry within
    /// `max_distance` of any initial-neighborhood member is returned, in
    /// wordlist order.
    pub fn neighbors(&self, word: &str, max_distance: usize) -> Vec<&str> {
        let initial: Vec<&str> = if self.contains(word) {
            vec![word]
        } else {
            let mut closest = None;
            let mut initial = Vec::new();
            for w in self.iter() {
                let d = osa_distance(w, word);
                match closest {
                    None => {
                        closest = Some(d);
                        initial.push(w);
                    }
                    Some(c) if d < c => {
                        closest = Some(d);
                        initial.clear();
                        initial.push(w);
                    }
                    Some(c) if d == c => initial.push(w),
                    _ => {}
                }
            }
            initial
        };
        if max_distance == 0 {
            return initial;
        }
        self.iter()
            .filter(|w| initial.iter().any(|i| osa_distance(w, i) <= max_distance))
            .collect()
    }
}

/// Optimal string alignment (OSA) variant of the Damerau–Levenshtein edit
/// distance: insertion, deletion, and substitution cost 1; transposing two
/// adjacent characters costs 1; no further edit may reuse a position already
/// consumed by a transposition.
pub fn osa_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (la, lb) = (a.len(), b.len());
    let mut d = vec![vec![0usize; lb + 1]; la + 1];
    for (i, row) in d.iter_mut().enumerate().take(la + 1) {
        row[0] = i;
    }
    for j in 0..=lb {
        d[0][j] = j;
    }
    for i in 1..=la {
        for j in 1..=lb {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let delete = d[i - 1][j] + 1;
            let insert = d[i][j - 1] + 1;
            let substitute = d[i - 1][j - 1] + cost;
            d[i][j] = delete.min(insert).min(substitute);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
            }
        }
    }
    d[la][lb]
}
