//! The crate-internal stand-in for stdout/stderr: a CLI front-end
//! implements [`Reporter`] to surface progress and results without the
//! core touching process I/O directly.

/// A single emitted search result: the derived address and the phrase it
/// came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub address: String,
    pub phrase: Vec<String>,
}

/// Callback boundary the search driver uses instead of `print!`/`eprintln!`.
pub trait Reporter {
    /// Called periodically as candidates are processed.
    fn on_progress(&mut self, _total: u64, _checksum_ok: u64, _unique_ok: u64) {}

    /// Called once for each recoverable, non-fatal warning (e.g. a word not
    /// found in the wordlist, an oracle going unavailable).
    fn on_warning(&mut self, _message: &str) {}

    /// Called for every emitted match or verbose result row.
    fn on_result(&mut self, _row: &ResultRow) {}
}

/// A [`Reporter`] that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// A [`Reporter`] test double that records every call for later inspection.
#[derive(Debug, Default, Clone)]
pub struct VecReporter {
    pub progress: Vec<(u64, u64, u64)>,
    pub warnings: Vec<String>,
    pub results: Vec<ResultRow>,
}

impl Reporter for VecReporter {
    fn on_progress(&mut self, total: u64, checksum_ok: u64, unique_ok: u64) {
        self.progress.push((total, checksum_ok, unique_ok));
    }

    fn on_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn on_result(&mut self, row: &ResultRow) {
        self.results.push(row.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_reporter_records_calls() {
        let mut r = VecReporter::default();
        r.on_progress(1, 1, 1);
        r.on_warning("careful");
        r.on_result(&ResultRow {
            address: "stake1x".into(),
            phrase: vec!["abandon".into()],
        });
        assert_eq!(r.progress, vec![(1, 1, 1)]);
        assert_eq!(r.warnings, vec!["careful".to_string()]);
        assert_eq!(r.results.len(), 1);
    }

    #[test]
    fn test_silent_reporter_does_not_panic() {
        let mut r = SilentReporter;
        r.on_progress(0, 0, 0);
        r.on_warning("x");
        r.on_result(&ResultRow {
            address: "a".into(),
            phrase: vec![],
        });
    }
}
