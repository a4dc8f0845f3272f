//! BIP-39 word-sequence <-> entropy codec, with checksum verification.

use sha2::{Digest, Sha256};
use thiserror::Error;
use xbits::{FromBits, XBits};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::wordlist::Wordlist;

/// Valid BIP-39 phrase lengths, in words.
pub const VALID_SIZES: &[usize] = &[12, 15, 18, 21, 24];

/// Errors raised while decoding a word sequence into entropy.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EntropyError {
    #[error("phrase length {0} is not a valid BIP-39 length")]
    InvalidLength(usize),
    #[error("word {0:?} is not in the active wordlist")]
    NotInWordlist(String),
    #[error("checksum verification failed")]
    Checksum,
}

/// A raw entropy buffer, zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop, Debug, Clone, PartialEq, Eq)]
pub struct Entropy(Vec<u8>);

impl Entropy {
    /// The raw entropy bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Entropy {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

/// Checksum bit-width for an N-word phrase (N must be in [`VALID_SIZES`]).
fn checksum_bits(n: usize) -> usize {
    n / 3
}

/// Decode a sequence of BIP-39 words into its entropy, verifying the
/// embedded checksum.
pub fn words_to_entropy(words: &[&str], wordlist: &Wordlist) -> Result<Entropy, EntropyError> {
    if !VALID_SIZES.contains(&words.len()) {
        return Err(EntropyError::InvalidLength(words.len()));
    }

    let indices: Vec<usize> = words
        .iter()
        .map(|&w| {
            wordlist
                .index_of(w)
                .ok_or_else(|| EntropyError::NotInWordlist(w.to_string()))
        })
        .collect::<Result<_, _>>()?;

    let mut packed: Vec<u8> = Vec::from_bits_chunk(indices.iter().copied(), 11);
    let tail = packed.pop();

    let cs = checksum_bits(words.len());
    let check_mask = 0xffu8 << (8 - cs);
    let expected = Sha256::digest(&packed)[0] & check_mask;

    if Some(expected) != tail.map(|t| t & check_mask) {
        return Err(EntropyError::Checksum);
    }

    Ok(Entropy(packed))
}

/// Encode `entropy` back into its BIP-39 word sequence.
pub fn entropy_to_words(entropy: &[u8], wordlist: &Wordlist) -> Result<Vec<String>, EntropyError> {
    if !matches!(entropy.len(), 16 | 20 | 24 | 28 | 32) {
        return Err(EntropyError::InvalidLength(entropy.len()));
    }
    let n = entropy.len() / 4 * 3;
    let cs = checksum_bits(n);
    let check_mask = 0xffu8 << (8 - cs);
    let checksum = Sha256::digest(entropy)[0] & check_mask;

    let indices: Vec<usize> = [entropy.to_vec(), vec![checksum]]
        .concat()
        .bits()
        .chunks(11)
        .take(n)
        .collect();

    indices
        .into_iter()
        .map(|i| {
            wordlist
                .word_at(i)
                .map(str::to_string)
                .ok_or(EntropyError::InvalidLength(i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t1_all_abandon() {
        let wl = Wordlist::english();
        let words = vec!["abandon"; 11]
            .into_iter()
            .chain(std::iter::once("about"))
            .collect::<Vec<_>>();
        let entropy = words_to_entropy(&words, &wl).unwrap();
        assert_eq!(entropy.as_bytes(), &[0u8; 16]);
    }

    #[test]
    fn test_t2_all_zoo() {
        let wl = Wordlist::english();
        let words = vec!["zoo"; 11]
            .into_iter()
            .chain(std::iter::once("wrong"))
            .collect::<Vec<_>>();
        let entropy = words_to_entropy(&words, &wl).unwrap();
        assert_eq!(entropy.as_bytes(), &[0xffu8; 16]);
    }

    #[test]
    fn test_bad_checksum() {
        let wl = Wordlist::english();
        let mut words = vec!["abandon"; 11]
            .into_iter()
            .chain(std::iter::once("about"))
            .collect::<Vec<_>>();
        words[11] = "zoo";
        assert_eq!(words_to_entropy(&words, &wl), Err(EntropyError::Checksum));
    }

    #[test]
    fn test_not_in_wordlist() {
        let wl = Wordlist::english();
        let mut words = vec!["abandon"; 12];
        words[0] = "notaword";
        assert!(matches!(
            words_to_entropy(&words, &wl),
            Err(EntropyError::NotInWordlist(_))
        ));
    }

    #[test]
    fn test_roundtrip_all_lengths() {
        let wl = Wordlist::english();
        for ent_len in [16usize, 20, 24, 28, 32] {
            let entropy: Vec<u8> = (0..ent_len).map(|i| (i * 7 + 3) as u8).collect();
            let words = entropy_to_words(&entropy, &wl).unwrap();
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            let back = words_to_entropy(&refs, &wl).unwrap();
            assert_eq!(back.as_bytes(), entropy.as_slice());
        }
    }

    #[test]
    fn test_invalid_length() {
        let wl = Wordlist::english();
        let words = vec!["abandon"; 13];
        assert_eq!(
            words_to_entropy(&words, &wl),
            Err(EntropyError::InvalidLength(13))
        );
    }
}
