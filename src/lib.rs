#![warn(missing_docs)]
//! # cardano-seed-recover
//!
//! Recovery of a Cardano Shelley stake address (and the underlying BIP-39
//! mnemonic) from a partially known or partially misspelled seed phrase.
//!
//! Given known words (each possibly slightly misspelled), optional unknown
//! positions, optional reordering hypotheses, and a target phrase length,
//! this crate enumerates candidate phrases, rejects those failing the
//! BIP-39 checksum, derives the stake address via the Cardano Icarus /
//! CIP-3 / CIP-19 path, and either matches derived addresses against
//! caller-supplied templates or queries a [`LookupOracle`].
//!
//! This crate performs no process I/O: progress and results are surfaced
//! through the [`Reporter`] trait, and on-chain lookups through the
//! [`LookupOracle`] trait. A thin CLI front-end supplies argument parsing,
//! terminal output, wordlist file loading, and an HTTP-backed oracle
//! adapter.
//!
//! # Examples
//! ```
//! use cardano_seed_recover::{SearchConfig, Driver, Wordlist, VecReporter};
//!
//! let wordlist = Wordlist::english();
//! let words: Vec<String> = "ladder long kangaroo inherit unknown prize else second enter addict mystery valve riot attitude area blind fabric symbol skill sunset goose shock gasp grape"
//!     .split_whitespace().map(String::from).collect();
//! let config = SearchConfig {
//!     known_groups: words.iter().map(|w| vec![w.clone()]).collect(),
//!     reorder: false,
//!     target_len: 24,
//!     missing_positions: vec![],
//!     fill_alphabet: vec![],
//!     address_templates: vec![],
//! };
//! config.validate()?;
//!
//! let mut driver = Driver::new(&config, &wordlist, None)?;
//! let mut reporter = VecReporter::default();
//! let outcome = driver.run(&mut reporter);
//! assert_eq!(outcome.unique_ok, 1);
//! assert_eq!(reporter.results[0].address, "stake1u9t04dtwptk5776eluj6ruyd782k66npnf55tdrp6dvwnzs24r8yq");
//!
//! # Ok::<(), cardano_seed_recover::Error>(())
//! ```

mod address;
mod bech32;
pub mod candidate;
mod config;
mod entropy;
mod keys;
mod masterkey;
mod matcher;
mod oracle;
mod reporter;
mod search;
mod wordlist;

pub use address::{compose as compose_address, stake_address, AddressError};
pub use bech32::Bech32Error;
pub use config::{ConfigError, SearchConfig};
pub use entropy::{entropy_to_words, words_to_entropy, Entropy, EntropyError, VALID_SIZES};
pub use keys::{DerivationError, ExtendedKeyNode};
pub use masterkey::MasterKey;
pub use matcher::{AddressMatcher, MatcherError};
pub use oracle::{LookupOracle, MockOracle, NullOracle, OracleError, OracleOutcome};
pub use reporter::{Reporter, ResultRow, SilentReporter, VecReporter};
pub use search::{Driver, SearchOutcome};
pub use wordlist::{osa_distance, Wordlist, WordlistError};

/// Global error definition.
pub mod error {
    use crate::{address, bech32, config, entropy, keys, matcher, oracle, wordlist};

    /// Crate-wide error, aggregating every module's error enum.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        /// Wordlist construction or lookup error.
        #[error("wordlist error: {0}")]
        Wordlist(#[from] wordlist::WordlistError),
        /// BECH32 encode/decode error.
        #[error("bech32 error: {0}")]
        Bech32(#[from] bech32::Bech32Error),
        /// Entropy codec error.
        #[error("entropy error: {0}")]
        Entropy(#[from] entropy::EntropyError),
        /// Child-key derivation error.
        #[error("derivation error: {0}")]
        Derivation(#[from] keys::DerivationError),
        /// Address composition error.
        #[error("address error: {0}")]
        Address(#[from] address::AddressError),
        /// Address matcher template error.
        #[error("matcher error: {0}")]
        Matcher(#[from] matcher::MatcherError),
        /// Search configuration error.
        #[error("invalid configuration: {0}")]
        Config(#[from] config::ConfigError),
        /// Lookup oracle error.
        #[error("oracle error: {0}")]
        Oracle(#[from] oracle::OracleError),
    }
}
pub use error::Error;

/// The CIP-3 path to the Cardano Shelley stake key.
pub const STAKE_KEY_PATH: &str = "1852'/1815'/0'/2/0";
