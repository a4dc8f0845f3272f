//! Search configuration and its validation, reproducing the CLI-level
//! checks of the external interface as pure data validation.

use thiserror::Error;

use crate::entropy::VALID_SIZES;

/// Errors raised by [`SearchConfig::validate`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("target length {0} is not a valid BIP-39 length")]
    InvalidLength(usize),
    #[error("known word count {known} exceeds target length {length}")]
    TooManyKnownWords { known: usize, length: usize },
    #[error(
        "missing-position list has {given} entries but {needed} words are actually missing"
    )]
    NotEnoughMissingPositions { given: usize, needed: usize },
}

/// All inputs needed to drive a search, validated once before use.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-position candidate word groups, in phrase order.
    pub known_groups: Vec<Vec<String>>,
    /// Whether to additionally try the jump-based reorderings of
    /// `known_groups` (see [`crate::candidate::reorder`]).
    pub reorder: bool,
    /// Target phrase length in words.
    pub target_len: usize,
    /// 1-based positions at which to insert unknown words.
    pub missing_positions: Vec<usize>,
    /// Alphabet used to fill unknown positions (typically the full
    /// wordlist).
    pub fill_alphabet: Vec<String>,
    /// Optional address templates to match derived addresses against.
    pub address_templates: Vec<String>,
}

impl SearchConfig {
    /// Validate the configuration, reproducing the CLI surface's checks:
    /// target length must be a valid BIP-39 length, known words must not
    /// exceed it, and the missing-position list must have at least as many
    /// entries as the number of words actually missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_SIZES.contains(&self.target_len) {
            return Err(ConfigError::InvalidLength(self.target_len));
        }
        let known = self.known_groups.len();
        if known > self.target_len {
            return Err(ConfigError::TooManyKnownWords {
                known,
                length: self.target_len,
            });
        }
        let needed = self.target_len - known;
        if self.missing_positions.len() < needed {
            return Err(ConfigError::NotEnoughMissingPositions {
                given: self.missing_positions.len(),
                needed,
            });
        }
        Ok(())
    }
}
