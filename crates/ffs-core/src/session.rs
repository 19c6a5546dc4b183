use tracing::debug;

use crate::candidate::{Candidate, fold_case};
use crate::error::FfsError;
use crate::matcher::{self, MatchOptions};

/// Produces the full candidate set for a session.
pub trait CandidateSource {
    fn list(&self) -> Result<Vec<Candidate>, FfsError>;
}

/// A fixed, in-memory candidate set.
impl CandidateSource for Vec<Candidate> {
    fn list(&self) -> Result<Vec<Candidate>, FfsError> {
        Ok(self.clone())
    }
}

/// Search state carried across keystrokes.
///
/// Holds the full candidate set, the result of the latest query and the
/// query that produced it, so that extending a query only rescans the
/// previous matches.
pub struct Session<S> {
    source: S,
    options: MatchOptions,
    full_set: Vec<Candidate>,
    filtered: Vec<Candidate>,
    previous_query: String,
}

impl<S: CandidateSource> Session<S> {
    /// Start a session by listing the full candidate set once.
    pub fn new(source: S, options: MatchOptions) -> Result<Self, FfsError> {
        let full_set = source.list()?;
        debug!(candidates = full_set.len(), "session started");
        Ok(Self {
            source,
            options,
            filtered: full_set.clone(),
            full_set,
            previous_query: String::new(),
        })
    }

    /// Rebuild the full set from the source and forget the last query.
    pub fn refresh_full_set(&mut self) -> Result<(), FfsError> {
        self.full_set = self.source.list()?;
        self.filtered = self.full_set.clone();
        self.previous_query.clear();
        debug!(candidates = self.full_set.len(), "refreshed full set");
        Ok(())
    }

    /// Evaluate `new_query` and return the ranked matches.
    pub fn on_query_changed(&mut self, new_query: &str) -> &[Candidate] {
        let query = fold_case(new_query, self.options.case_insensitive);
        self.filtered = matcher::evaluate(
            &query,
            &self.previous_query,
            &self.full_set,
            &self.filtered,
            &self.options,
        );
        self.previous_query = query;
        &self.filtered
    }

    pub fn full_set(&self) -> &[Candidate] {
        &self.full_set
    }

    pub fn filtered(&self) -> &[Candidate] {
        &self.filtered
    }

    pub fn previous_query(&self) -> &str {
        &self.previous_query
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use pretty_assertions::assert_eq;

    fn candidates(keys: &[&str]) -> Vec<Candidate> {
        keys.iter()
            .map(|k| Candidate::new(*k, format!("/project{k}")))
            .collect()
    }

    fn keys(set: &[Candidate]) -> Vec<&str> {
        set.iter().map(|c| c.display_key.as_str()).collect()
    }

    /// Source whose listing can change between calls.
    struct Swappable(RefCell<Vec<Candidate>>);

    impl CandidateSource for Swappable {
        fn list(&self) -> Result<Vec<Candidate>, FfsError> {
            Ok(self.0.borrow().clone())
        }
    }

    #[test]
    fn starts_with_full_set_and_empty_query() {
        let full = candidates(&["/b.rs", "/a.rs"]);
        let session = Session::new(full.clone(), MatchOptions::default()).unwrap();
        assert_eq!(session.full_set(), full.as_slice());
        assert_eq!(session.filtered(), full.as_slice());
        assert_eq!(session.previous_query(), "");
    }

    #[test]
    fn typing_narrows_and_deleting_widens() {
        let full = candidates(&["/src/main.rs", "/src/lib.rs", "/readme.md"]);
        let mut session = Session::new(full, MatchOptions::default()).unwrap();

        assert_eq!(keys(session.on_query_changed("m")), vec!["/readme.md", "/src/main.rs"]);
        assert_eq!(keys(session.on_query_changed("ma")), vec!["/src/main.rs"]);
        assert_eq!(session.previous_query(), "ma");
        assert_eq!(
            keys(session.on_query_changed("m")),
            vec!["/readme.md", "/src/main.rs"]
        );
        assert_eq!(session.on_query_changed("").len(), 3);
    }

    #[test]
    fn query_is_folded_when_case_insensitive() {
        let full = candidates(&["/src/main.rs"]);
        let mut session = Session::new(full, MatchOptions::new(true)).unwrap();
        assert_eq!(keys(session.on_query_changed("MAIN")), vec!["/src/main.rs"]);
        assert_eq!(session.previous_query(), "main");
        assert!(session.options().case_insensitive);
    }

    #[test]
    fn refresh_resets_incremental_state() {
        let source = Swappable(RefCell::new(candidates(&["/old.rs"])));
        let mut session = Session::new(source, MatchOptions::default()).unwrap();
        assert_eq!(keys(session.on_query_changed("o")), vec!["/old.rs"]);

        *session.source().0.borrow_mut() = candidates(&["/old.rs", "/other.rs"]);
        session.refresh_full_set().unwrap();
        assert_eq!(session.previous_query(), "");
        assert_eq!(session.filtered().len(), 2);

        // Without the reset "ot" would only search the stale one-item result.
        assert_eq!(keys(session.on_query_changed("ot")), vec!["/other.rs"]);
    }
}
