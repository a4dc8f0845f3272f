//! Glob-style address matching: `...` stands for "zero or more characters".

use regex::Regex;
use thiserror::Error;

/// Errors raised while building an [`AddressMatcher`].
#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("invalid address template {0:?}: {1}")]
    BadTemplate(String, regex::Error),
}

/// Matches derived addresses against a set of user-supplied templates, each
/// of which may contain the literal substring `...` to mean "anything".
pub struct AddressMatcher {
    patterns: Vec<Regex>,
}

impl AddressMatcher {
    /// Build a matcher from a set of templates. Each `...` in a template is
    /// translated to `.*`; every other character is matched literally.
    pub fn new<'a, I>(templates: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let patterns = templates
            .into_iter()
            .map(|t| {
                let escaped = t
                    .split("...")
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*");
                let anchored = format!("^{escaped}$");
                Regex::new(&anchored).map_err(|e| MatcherError::BadTemplate(t.to_string(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `address` fully matches any configured template. Always
    /// `false` if no templates were configured.
    pub fn matches(&self, address: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(address))
    }

    /// Whether any templates are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
