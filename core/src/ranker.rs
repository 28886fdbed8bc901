use crate::tfidf::ScoredTerm;

pub const DEFAULT_TOP_N: usize = 10;

/// The first `n` terms of an already score-ordered list, scores dropped.
/// Shorter lists come back whole.
pub fn top_n(scored: &[ScoredTerm], n: usize) -> Vec<String> {
    scored.iter().take(n).map(|s| s.term.clone()).collect()
}
