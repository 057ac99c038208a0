/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 5;
/// Largest edit distance still considered a plausible typo
pub const MAX_EDIT_DISTANCE: usize = 3;

/// "Did you mean" matcher based on case-insensitive Levenshtein distance
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    max_distance: usize,
    limit: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            max_distance: MAX_EDIT_DISTANCE,
            limit: MAX_SUGGESTIONS,
        }
    }
}

impl FuzzyMatcher {
    #[must_use]
    pub const fn new(max_distance: usize, limit: usize) -> Self {
        Self {
            max_distance,
            limit,
        }
    }

    /// Names from `pool` within the distance bound, closest first.
    ///
    /// Ties keep pool order.
    pub fn find_similar<I, S>(&self, candidate: &str, pool: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidate = candidate.to_lowercase();

        let mut scored: Vec<(String, usize)> = pool
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let distance = levenshtein(&candidate, &name.to_lowercase());
                (distance <= self.max_distance).then(|| (name.to_string(), distance))
            })
            .collect();

        // stable sort keeps pool order among equal distances
        scored.sort_by_key(|(_, distance)| *distance);
        scored.truncate(self.limit);

        scored.into_iter().map(|(name, _)| name).collect()
    }
}

/// Suggestions with the default bounds (distance <= 3, at most 5 names)
pub fn find_similar_names<I, S>(candidate: &str, pool: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FuzzyMatcher::default().find_similar(candidate, pool)
}

/// Classic Levenshtein distance over Unicode scalar values.
///
/// Insertion, deletion and substitution each cost 1. Computes the full table (two rows at a
/// time) without cut-offs.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("foundaton", "foundation"), 1);
    }

    #[test]
    fn test_levenshtein_is_symmetric() {
        for (a, b) in [("space", "spaces"), ("org", "organization"), ("tas", "tkg")] {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("naïve", "naive"), 1);
    }

    #[test]
    fn test_did_you_mean_foundation() {
        let suggestions = find_similar_names("foundaton", ["Foundation", "Organization"]);
        assert_eq!(suggestions, vec!["Foundation".to_string()]);
    }

    #[test]
    fn test_orders_by_distance_then_pool_order() {
        let pool = ["Spacey", "Spaces", "Space", "Place"];
        let suggestions = find_similar_names("space", pool);
        assert_eq!(suggestions, vec!["Space", "Spacey", "Spaces", "Place"]);
    }

    #[test]
    fn test_limits_suggestions() {
        let pool = ["ab", "ac", "ad", "ae", "af", "ag", "ah"];
        assert_eq!(find_similar_names("aa", pool).len(), MAX_SUGGESTIONS);

        let narrow = FuzzyMatcher::new(0, 10);
        assert!(narrow.find_similar("aa", pool).is_empty());
    }
}
