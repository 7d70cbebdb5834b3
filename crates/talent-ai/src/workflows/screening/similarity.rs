//! String similarity seam shared by the parser and the scoring rules.
//!
//! Every fuzzy text comparison in the workflow goes through [`similarity`] so
//! the algorithm can be swapped in one place. Jaro-Winkler is used because it
//! rewards shared prefixes, which certification matching depends on: "aws
//! certified" against "aws certified solutions architect" has to clear the
//! 0.7 matching threshold, and pure edit distance leaves it far below.

use strsim::jaro_winkler;

/// Similarity between two strings in `[0.0, 1.0]`, where 1.0 means identical.
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(&a.trim().to_lowercase(), &b.trim().to_lowercase())
}

/// Best similarity between `needle` and any of `candidates`.
pub(crate) fn best_similarity<'a, I>(needle: &str, candidates: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| similarity(needle, candidate))
        .fold(0.0, f64::max)
}
