//! The search driver: pipes candidate phrases through the checksum,
//! derivation, and matching/lookup stages, de-duplicating by derived
//! address.

use std::collections::HashSet;

use crate::address;
use crate::candidate::iterate;
use crate::config::SearchConfig;
use crate::entropy::{words_to_entropy, Entropy, EntropyError};
use crate::keys::ExtendedKeyNode;
use crate::masterkey::MasterKey;
use crate::matcher::AddressMatcher;
use crate::oracle::{LookupOracle, OracleOutcome};
use crate::reporter::{Reporter, ResultRow};
use crate::wordlist::Wordlist;
use crate::STAKE_KEY_PATH;

/// Summary of a completed (or partially stepped) search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub total: u64,
    pub checksum_ok: u64,
    pub unique_ok: u64,
    pub emitted: u64,
}

/// Drives candidate generation through derivation and matching/lookup.
///
/// Holds no per-candidate state beyond the set of addresses already seen
/// this run, so a caller can pump it incrementally via [`Driver::step`]
/// rather than draining the whole candidate space in one call.
pub struct Driver<'a> {
    candidates: Box<dyn Iterator<Item = Vec<String>>>,
    wordlist: &'a Wordlist,
    matcher: AddressMatcher,
    oracle: Option<Box<dyn LookupOracle + 'a>>,
    oracle_disabled: bool,
    seen: HashSet<String>,
    outcome: SearchOutcome,
    verbose: bool,
}

impl<'a> Driver<'a> {
    /// Build a driver from a validated config. Returns an error only if the
    /// address templates themselves are malformed regexes once `...` is
    /// expanded (see [`crate::matcher::AddressMatcher`]).
    pub fn new(
        config: &SearchConfig,
        wordlist: &'a Wordlist,
        oracle: Option<Box<dyn LookupOracle + 'a>>,
    ) -> Result<Self, crate::matcher::MatcherError> {
        let matcher = AddressMatcher::new(config.address_templates.iter().map(String::as_str))?;
        let verbose = matcher.is_empty() && oracle.is_none();
        let candidates = iterate(
            config.known_groups.clone(),
            config.reorder,
            config.fill_alphabet.clone(),
            config.target_len,
            config.missing_positions.clone(),
        );
        Ok(Self {
            candidates,
            wordlist,
            matcher,
            oracle,
            oracle_disabled: false,
            seen: HashSet::new(),
            outcome: SearchOutcome::default(),
            verbose,
        })
    }

    /// Run to completion, reporting through `reporter`.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> SearchOutcome {
        while self.step(reporter) {}
        self.outcome
    }

    /// Run at most `budget` candidates, reporting through `reporter`.
    /// Returns `true` if candidates remain.
    pub fn run_steps(&mut self, budget: u64, reporter: &mut dyn Reporter) -> bool {
        for _ in 0..budget {
            if !self.step(reporter) {
                return false;
            }
        }
        true
    }

    /// Process exactly one candidate phrase. Returns `false` once the
    /// candidate stream is exhausted.
    fn step(&mut self, reporter: &mut dyn Reporter) -> bool {
        let Some(words) = self.candidates.next() else {
            return false;
        };
        self.outcome.total += 1;

        let Some((words, entropy)) = recover_entropy(words, self.wordlist, reporter) else {
            return true;
        };
        self.outcome.checksum_ok += 1;

        let master = MasterKey::from_entropy(entropy.as_bytes());
        let root = ExtendedKeyNode::from_master(&master);
        let stake_node = match root.derive_path(STAKE_KEY_PATH) {
            Ok(n) => n,
            Err(_) => return true,
        };
        let Ok(addr) = address::stake_address(stake_node.public_key()) else {
            return true;
        };

        if self.seen.contains(&addr) {
            return true;
        }
        self.seen.insert(addr.clone());
        self.outcome.unique_ok += 1;

        let mut matched = self.matcher.matches(&addr);

        if !self.oracle_disabled {
            if let Some(oracle) = self.oracle.as_deref_mut() {
                match oracle.check(&addr) {
                    Ok(OracleOutcome::Active) => matched = true,
                    Ok(OracleOutcome::Inactive) => {}
                    Err(e) => {
                        reporter.on_warning(&format!("lookup oracle disabled: {e}"));
                        self.oracle_disabled = true;
                    }
                }
            }
        }

        if matched || self.verbose {
            self.outcome.emitted += 1;
            reporter.on_result(&ResultRow {
                address: addr,
                phrase: words,
            });
        }

        reporter.on_progress(self.outcome.total, self.outcome.checksum_ok, self.outcome.unique_ok);
        true
    }

    /// Summary so far.
    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }
}

/// Decode `words` into entropy, substituting near-miss wordlist neighbors for
/// any word not in the wordlist and retrying, per the `NotInWordlist` policy
/// ("warn once via `Reporter`, proceed using neighbors"). Returns the phrase
/// actually used (with substitutions applied) alongside its entropy.
fn recover_entropy(
    words: Vec<String>,
    wordlist: &Wordlist,
    reporter: &mut dyn Reporter,
) -> Option<(Vec<String>, Entropy)> {
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    match words_to_entropy(&refs, wordlist) {
        Ok(entropy) => Some((words, entropy)),
        Err(EntropyError::NotInWordlist(bad)) => {
            reporter.on_warning(&format!("{bad:?} not in wordlist, trying near-miss neighbors"));
            wordlist.neighbors(&bad, 0).into_iter().find_map(|candidate| {
                let substituted: Vec<String> = words
                    .iter()
                    .map(|w| if *w == bad { candidate.to_string() } else { w.clone() })
                    .collect();
                recover_entropy(substituted, wordlist, reporter)
            })
        }
        Err(_) => None,
    }
}
