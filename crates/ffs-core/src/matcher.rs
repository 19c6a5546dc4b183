//! Scoring and ranking of candidates against a typed query.
//!
//! Scores are `<= 0` and lower is better. Short queries (one to three
//! characters) use cheap bracketing rules; longer queries require an ordered
//! subsequence match and are scored by the longest run they share with the
//! key. `None` means the candidate does not match and is dropped.

use tracing::trace;

use crate::candidate::{Candidate, fold_case};

/// How three-character queries are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrigramScoring {
    /// The middle character must fall between the first and last ones.
    #[default]
    Bracketed,
    /// The two-character rule applied to the first two characters. Only a
    /// contiguous match of the whole query earns the better score.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    pub case_insensitive: bool,
    pub trigram: TrigramScoring,
}

impl MatchOptions {
    pub fn new(case_insensitive: bool) -> Self {
        Self {
            case_insensitive,
            trigram: TrigramScoring::default(),
        }
    }
}

/// A query prepared for scoring many candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    chars: Vec<char>,
}

impl Query {
    pub fn new(text: &str, case_insensitive: bool) -> Self {
        let text = fold_case(text, case_insensitive);
        let chars = text.chars().collect();
        Self { text, chars }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Score `key` against this query, or `None` if it does not match.
    pub fn score(&self, key: &str, trigram: TrigramScoring) -> Option<i32> {
        let q = &self.chars;
        match q.len() {
            0 => Some(0),
            1 => key.contains(q[0]).then_some(0),
            2 => score_pair(key, q[0], q[1], &self.text),
            3 => match trigram {
                TrigramScoring::Bracketed => self.score_trigram(key),
                TrigramScoring::Legacy => score_pair(key, q[0], q[1], &self.text),
            },
            _ => score_subsequence(key, q),
        }
    }

    fn score_trigram(&self, key: &str) -> Option<i32> {
        let (first, middle, last) = (self.chars[0], self.chars[1], self.chars[2]);
        // Byte offsets from find/rfind always sit on char boundaries.
        let p1 = key.find(first)?;
        let p2 = key.rfind(last)?;
        if p2 < p1 {
            return None;
        }
        if !key[p1..p2 + last.len_utf8()].contains(middle) {
            return None;
        }
        if key.contains(self.text.as_str()) {
            return Some(-3);
        }
        let second = first.len_utf8();
        let third = second + middle.len_utf8();
        let head = &self.text[..third];
        let tail = &self.text[second..];
        if key.contains(head) || key.contains(tail) {
            Some(-2)
        } else {
            Some(-1)
        }
    }
}

/// Two-character rule: `first` must occur no later than the last `last`.
fn score_pair(key: &str, first: char, last: char, whole: &str) -> Option<i32> {
    let p1 = key.find(first)?;
    let p2 = key.rfind(last)?;
    if p2 < p1 {
        return None;
    }
    if key.contains(whole) { Some(-2) } else { Some(-1) }
}

fn score_subsequence(key: &str, needle: &[char]) -> Option<i32> {
    if !is_ordered_subsequence(key, needle) {
        return None;
    }
    let hay: Vec<char> = key.chars().collect();
    let run = lcs_chars(&hay, needle);
    Some(i32::try_from(run).map_or(i32::MIN, |run| -run))
}

/// Score `key` against `query` without case folding.
pub fn score(key: &str, query: &str, trigram: TrigramScoring) -> Option<i32> {
    Query::new(query, false).score(key, trigram)
}

/// True if every character of `needle` occurs in `haystack`, each strictly
/// after the previous one's match.
pub fn is_ordered_subsequence(haystack: &str, needle: &[char]) -> bool {
    let mut rest = haystack.chars();
    needle.iter().all(|&n| rest.by_ref().any(|c| c == n))
}

/// Length of the longest contiguous run of characters shared by `a` and `b`.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    lcs_chars(&a, &b)
}

fn lcs_chars(a: &[char], b: &[char]) -> usize {
    // Only the previous row of the run-length table is needed.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

/// A candidate paired with its score for one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub score: i32,
    pub candidate: &'a Candidate,
}

/// Score every candidate, drop non-matches, and sort best first.
///
/// Equal scores are ordered by display key, then by full path.
pub fn rank<'a>(
    query: &Query,
    candidates: &'a [Candidate],
    trigram: TrigramScoring,
) -> Vec<ScoredCandidate<'a>> {
    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = query.score(&candidate.display_key, trigram)?;
            Some(ScoredCandidate { score, candidate })
        })
        .collect();

    scored.sort_by(|a, b| {
        a.score
            .cmp(&b.score)
            .then_with(|| a.candidate.display_key.cmp(&b.candidate.display_key))
            .then_with(|| a.candidate.full_path.cmp(&b.candidate.full_path))
    });
    scored
}

/// Evaluate `query` and return the matching candidates, best first.
///
/// When `query` contains `previous_query`, only `previous_filtered` is
/// searched, since every match of the longer query already matched the
/// shorter one. The caller must pass the set that `previous_query` actually
/// produced. An empty query returns `full_set` unchanged.
pub fn evaluate(
    query: &str,
    previous_query: &str,
    full_set: &[Candidate],
    previous_filtered: &[Candidate],
    options: &MatchOptions,
) -> Vec<Candidate> {
    let query = Query::new(query, options.case_insensitive);
    if query.is_empty() {
        return full_set.to_vec();
    }

    let previous = fold_case(previous_query, options.case_insensitive);
    let narrowed = can_narrow(&query, &previous, options.trigram);
    let space = if narrowed { previous_filtered } else { full_set };

    let ranked = rank(&query, space, options.trigram);
    trace!(
        query = query.as_str(),
        narrowed,
        searched = space.len(),
        matched = ranked.len(),
        "evaluated query"
    );
    ranked.into_iter().map(|s| s.candidate.clone()).collect()
}

fn can_narrow(query: &Query, previous: &str, trigram: TrigramScoring) -> bool {
    if previous.is_empty() {
        return false;
    }
    // The legacy rule can accept keys that a shorter query rejected.
    if trigram == TrigramScoring::Legacy && query.len() == 3 {
        return false;
    }
    query.as_str().contains(previous)
}
