//! Approximate string matching, to accommodate typos or names the user
//! cannot easily type exactly.

use strsim::normalized_levenshtein;

/// The candidate most similar to `input`, case-insensitively.
///
/// Always answers as long as there is at least one candidate; ties go to the
/// candidate seen first.
pub fn closest_match<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.to_lowercase();
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = normalized_levenshtein(&needle, &candidate.to_lowercase());
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(name, _)| name)
}
